mod friends;
mod hobbies;
mod profile;
mod similar;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::error;

use crate::{
    credentials::CsrfSource,
    models::{Hobby, SimilarUser, User},
    navigate::{LogNavigator, Navigator},
    ApiClient, AppError, AppResult, Config,
};

#[derive(Debug, Clone, PartialEq)]
pub struct StoreState {
    pub user: Option<User>,
    pub similar_users: Vec<SimilarUser>,
    pub current_page: u32,
    pub total_pages: u32,
    /// Every hobby the server knows about, not just the user's.
    pub hobbies: Vec<Hobby>,
}

impl Default for StoreState {
    fn default() -> Self {
        StoreState {
            user: None,
            similar_users: Vec::new(),
            current_page: 1,
            total_pages: 1,
            hobbies: Vec::new(),
        }
    }
}

/// Clones share the same state. Actions aren't serialized; the last
/// response to land wins.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

struct Inner {
    api: ApiClient,
    csrf: Arc<dyn CsrfSource>,
    navigator: Arc<dyn Navigator>,
    state: RwLock<StoreState>,
}

impl Store {
    pub fn new(api: ApiClient, csrf: Arc<dyn CsrfSource>, navigator: Arc<dyn Navigator>) -> Self {
        Store {
            inner: Arc::new(Inner {
                api,
                csrf,
                navigator,
                state: RwLock::new(StoreState::default()),
            }),
        }
    }

    /// Token read from the client's cookie jar, navigation only logged.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let api = ApiClient::new(config.api_base.clone())?;
        let csrf = Arc::new(api.cookie_csrf());
        Ok(Store::new(api, csrf, Arc::new(LogNavigator)))
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub async fn snapshot(&self) -> StoreState {
        self.inner.state.read().await.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.inner.state.read().await.user.clone()
    }

    /// Hobbies attached to the current user.
    pub async fn user_hobbies(&self) -> Vec<Hobby> {
        self.inner.state.read().await
            .user
            .as_ref()
            .map(|user| user.hobbies.clone())
            .unwrap_or_default()
    }

    pub async fn hobbies(&self) -> Vec<Hobby> {
        self.inner.state.read().await.hobbies.clone()
    }

    pub async fn similar_users(&self) -> Vec<SimilarUser> {
        self.inner.state.read().await.similar_users.clone()
    }

    pub async fn current_page(&self) -> u32 {
        self.inner.state.read().await.current_page
    }

    pub async fn total_pages(&self) -> u32 {
        self.inner.state.read().await.total_pages
    }

    fn csrf_token(&self, action: &str) -> AppResult<String> {
        self.inner.csrf.csrf_token().ok_or_else(|| {
            error!("{action}: CSRF token not found");
            AppError::MissingCsrfToken
        })
    }

    fn navigate(&self, path: &str) {
        self.inner.navigator.navigate(path);
    }
}
