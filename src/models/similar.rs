use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarUser {
    pub username: String,
    #[serde(default)]
    pub common_hobbies: u32,
    /// Hobby names, not records.
    #[serde(default)]
    pub hobbies: Vec<String>,
}

/// One page of `GET /api/users/similar_with_filters/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageData {
    pub similar_users: Vec<SimilarUser>,
    pub page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub total_users: Option<u32>,
    #[serde(default)]
    pub users_per_page: Option<u32>,
}

/// Query string for the similar-users listing. Field order is the order
/// the parameters appear in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterParams {
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
}

impl FilterParams {
    pub fn page(page: u32) -> Self {
        FilterParams { page, min_age: None, max_age: None }
    }

    pub fn ages(self, min_age: Option<u32>, max_age: Option<u32>) -> Self {
        FilterParams { min_age, max_age, ..self }
    }
}

impl Default for FilterParams {
    fn default() -> Self {
        FilterParams::page(1)
    }
}
