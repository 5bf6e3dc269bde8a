use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::error;

use crate::{
    api::{self, HOBBIES, PROFILE_ADD_HOBBY, PROFILE_DELETE_HOBBY},
    models::{Hobby, HobbyId},
    AppResult, GetField,
};

use super::Store;

#[derive(Deserialize)]
struct HobbyList {
    hobbies: Vec<Hobby>,
}

#[derive(Serialize)]
struct HobbyTarget {
    hobby_id: HobbyId,
}

impl Store {
    /// Create a hobby, then reload the global list. The user's own hobbies
    /// are untouched; attaching is a separate step.
    pub async fn add_hobby(&self, name: &str) -> AppResult<Hobby> {
        let token = self.csrf_token("add_hobby")?;

        let result: AppResult<Hobby> = async {
            let body: Value = self.api()
                .send(Method::POST, HOBBIES, &token, &json!({ "name": name }))
                .await?
                .json()
                .await?;
            api::ensure_success(&body)?;
            Ok(serde_json::from_value(body.get_obj_field("hobby")?.clone())?)
        }.await;

        match result {
            Ok(hobby) => {
                self.fetch_hobbies().await;
                Ok(hobby)
            }
            Err(err) => {
                error!("error adding hobby {name:?}: {err}");
                Err(err)
            }
        }
    }

    pub async fn add_existing_hobby_to_profile(&self, hobby_id: HobbyId) -> AppResult<()> {
        self.change_profile_hobby("add_existing_hobby_to_profile", PROFILE_ADD_HOBBY, hobby_id).await
    }

    pub async fn delete_hobby_from_profile(&self, hobby_id: HobbyId) -> AppResult<()> {
        self.change_profile_hobby("delete_hobby_from_profile", PROFILE_DELETE_HOBBY, hobby_id).await
    }

    async fn change_profile_hobby(&self, action: &str, endpoint: &str, hobby_id: HobbyId) -> AppResult<()> {
        let token = self.csrf_token(action)?;

        let result: AppResult<()> = async {
            let body: Value = self.api()
                .send(Method::POST, endpoint, &token, &HobbyTarget { hobby_id })
                .await?
                .json()
                .await?;
            api::ensure_success(&body)
        }.await;

        if let Err(err) = result {
            error!("{action} failed for hobby {hobby_id}: {err}");
            return Err(err);
        }

        let _ = self.fetch_user_profile().await;
        Ok(())
    }

    /// Replace the global hobby list. Failures are logged and the previous
    /// list kept.
    pub async fn fetch_hobbies(&self) {
        match self.api().get_json::<HobbyList>(HOBBIES).await {
            Ok(HobbyList { hobbies }) => {
                self.inner.state.write().await.hobbies = hobbies;
            }
            Err(err) => {
                error!("error fetching hobbies: {err}");
            }
        }
    }
}
