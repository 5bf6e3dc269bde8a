use std::path::PathBuf;

use serde::{ser::Error as _, Deserialize, Serialize, Serializer};
use time::Date;

use super::{day_stamp, Hobby, HobbyRef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
    #[serde(default, with = "day_stamp::option")]
    pub date_of_birth: Option<Date>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub hobbies: Vec<Hobby>,
    /// Computed by the server from `date_of_birth`; 0 when unknown,
    /// negative for a birthday in the future.
    #[serde(default)]
    pub age: i32,
}

/// Owned by its [`User`]. The server may send `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "avatar_unsendable")]
    pub avatar: Option<Avatar>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "String")]
pub enum Avatar {
    /// Reference already held by the server.
    Stored(String),
    /// Picked locally, not uploaded yet.
    Pending(PathBuf),
}

impl Avatar {
    pub fn is_pending(&self) -> bool {
        matches!(self, Avatar::Pending(_))
    }
}

impl From<String> for Avatar {
    fn from(url: String) -> Self {
        Avatar::Stored(url)
    }
}

impl Serialize for Avatar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Avatar::Stored(url) => serializer.serialize_str(url),
            Avatar::Pending(path) => Err(S::Error::custom(format!(
                "avatar {} has not been uploaded",
                path.display()
            ))),
        }
    }
}

fn avatar_unsendable(avatar: &Option<Avatar>) -> bool {
    avatar.as_ref().is_none_or(Avatar::is_pending)
}

/// Partial user sent with `PUT /api/profile/`. Unset fields are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "day_stamp::option")]
    pub date_of_birth: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hobbies: Option<Vec<HobbyRef>>,
}

impl ProfileUpdate {
    /// Collapse every hobby reference to its id.
    pub fn normalize_hobbies(&mut self) {
        if let Some(hobbies) = self.hobbies.as_mut() {
            for hobby in hobbies.iter_mut() {
                *hobby = HobbyRef::Id(hobby.id());
            }
        }
    }
}

impl From<&User> for ProfileUpdate {
    fn from(user: &User) -> Self {
        ProfileUpdate {
            username: Some(user.username.clone()),
            email: Some(user.email.clone()),
            first_name: Some(user.first_name.clone()),
            last_name: Some(user.last_name.clone()),
            date_of_birth: user.date_of_birth,
            profile: user.profile.clone(),
            hobbies: Some(user.hobbies.iter().cloned().map(HobbyRef::from).collect()),
        }
    }
}
