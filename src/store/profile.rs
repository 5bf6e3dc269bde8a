use reqwest::Method;
use serde_json::Value;
use tracing::{error, info};

use crate::{
    api::{self, PROFILE},
    models::{ProfileUpdate, User},
    navigate::LOGIN_PATH,
    AppError, AppResult,
};

use super::Store;

impl Store {
    /// Replace the user with the server's copy. Any failure sends the
    /// browser to the login page and leaves the state as it was.
    pub async fn fetch_user_profile(&self) -> AppResult<()> {
        match self.api().get_json::<User>(PROFILE).await {
            Ok(user) => {
                self.inner.state.write().await.user = Some(user);
                Ok(())
            }
            Err(err) => {
                if err.is_auth_failure() {
                    info!("profile fetch unauthorized, redirecting to login");
                } else {
                    error!("error fetching user profile: {err}");
                }
                self.navigate(LOGIN_PATH);
                Err(err)
            }
        }
    }

    /// Send a partial user, then reload the whole profile. The refetch
    /// handles its own failure, so once the write is accepted this is `Ok`.
    pub async fn update_profile(&self, mut update: ProfileUpdate) -> AppResult<()> {
        let token = self.csrf_token("update_profile")?;
        update.normalize_hobbies();

        let result: AppResult<()> = async {
            let body: Value = self.api()
                .send(Method::PUT, PROFILE, &token, &update)
                .await?
                .json()
                .await
                .unwrap_or(Value::Null);
            // a bare 2xx with neither `status` nor `errors` is accepted
            if body.get("status").is_some() {
                return api::ensure_success(&body);
            }
            match api::error_detail(&body) {
                Some(errors) => Err(AppError::Rejected(errors)),
                None => Ok(()),
            }
        }.await;

        if let Err(err) = result {
            error!("error updating profile: {err}");
            return Err(err);
        }

        let _ = self.fetch_user_profile().await;
        Ok(())
    }
}
