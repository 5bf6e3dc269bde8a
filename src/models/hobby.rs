use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use super::minute_stamp;

pub type HobbyId = i64;

/// A hobby known to the server. Many users may point at the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hobby {
    pub id: HobbyId,
    pub name: String,
    #[serde(with = "minute_stamp")]
    pub created_at: PrimitiveDateTime,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// How a hobby may be named in a profile update: either the bare id or a
/// whole record picked from a list. Only ids go over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HobbyRef {
    Id(HobbyId),
    Hobby(Hobby),
}

impl HobbyRef {
    pub fn id(&self) -> HobbyId {
        match self {
            HobbyRef::Id(id) => *id,
            HobbyRef::Hobby(hobby) => hobby.id,
        }
    }
}

impl From<HobbyId> for HobbyRef {
    fn from(id: HobbyId) -> Self {
        HobbyRef::Id(id)
    }
}

impl From<Hobby> for HobbyRef {
    fn from(hobby: Hobby) -> Self {
        HobbyRef::Hobby(hobby)
    }
}
