use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use super::minute_stamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendStatus {
    Sent,
    Accepted,
    Rejected,
}

/// A friend relationship as seen from the current user: `friend_username`
/// is whichever side isn't them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequest {
    pub id: i64,
    pub friend_username: String,
    pub from_user: String,
    pub to_user: String,
    #[serde(with = "minute_stamp")]
    pub timestamp: PrimitiveDateTime,
    pub status: FriendStatus,
}
