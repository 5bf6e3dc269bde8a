use tracing::error;

use crate::{
    api::SIMILAR_USERS,
    models::{FilterParams, PageData},
};

use super::Store;

impl Store {
    /// Replace the similar-users page wholesale. On failure the previous
    /// page stays.
    pub async fn fetch_similar_users(&self, params: FilterParams) {
        match self.api().get_json_with::<PageData, _>(SIMILAR_USERS, &params).await {
            Ok(PageData { similar_users, page, total_pages, .. }) => {
                let mut state = self.inner.state.write().await;
                state.similar_users = similar_users;
                state.current_page = page;
                state.total_pages = total_pages;
            }
            Err(err) => {
                error!("error fetching similar users (page {}): {err}", params.page);
            }
        }
    }

    pub async fn fetch_page(&self, page: u32, min_age: Option<u32>, max_age: Option<u32>) {
        self.fetch_similar_users(FilterParams::page(page).ages(min_age, max_age)).await
    }
}
