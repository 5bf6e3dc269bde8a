use reqwest::Method;
use serde::Serialize;
use tracing::{error, info};

use crate::{api::SEND_FRIEND_REQUEST, AppResult};

use super::Store;

#[derive(Serialize)]
struct FriendTarget<'a> {
    username: &'a str,
}

impl Store {
    /// Ask `username` to be friends. Nothing local changes; the friends
    /// page reloads its own data.
    pub async fn send_friend_request(&self, username: &str) -> AppResult<()> {
        let token = self.csrf_token("send_friend_request")?;

        match self.api()
            .send(Method::POST, SEND_FRIEND_REQUEST, &token, &FriendTarget { username })
            .await
        {
            Ok(_) => {
                info!("friend request sent to {username}");
                Ok(())
            }
            Err(err) => {
                error!("error sending friend request to {username}: {err}");
                Err(err)
            }
        }
    }
}
