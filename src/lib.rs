pub mod api;
pub mod config;
pub mod credentials;
pub mod models;
pub mod navigate;
pub mod res;
pub mod routes;
pub mod store;

use std::fmt;

use reqwest::StatusCode;
use serde_json::{json, Value};

pub use api::ApiClient;
pub use config::Config;
pub use store::Store;

pub trait GetField {
    fn get_obj_field(&self, field: &str) -> AppResult<&Value>;
}

impl GetField for serde_json::Value {
    fn get_obj_field(&self, field: &str) -> AppResult<&Value> {
        self.get(field)
        .ok_or(format!("expected {field} in {self}").into())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Failure returned by every store action.
#[derive(Debug)]
pub enum AppError {
    /// No `csrftoken` cookie was available, so no request was sent.
    MissingCsrfToken,
    /// The server answered with a non-2xx status.
    Status {
        status: StatusCode,
        detail: Option<Value>,
    },
    /// The server answered 2xx but reported `status` other than `success`.
    Rejected(Value),
    Other(anyhow::Error),
}

impl AppError {
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AppError::Status { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }

    /// Error content supplied by the server, if any.
    pub fn detail(&self) -> Option<&Value> {
        match self {
            AppError::Status { detail, .. } => detail.as_ref(),
            AppError::Rejected(detail) => Some(detail),
            _ => None,
        }
    }

    /// `{"success": false, "error": ...}`, the shape pages render from.
    pub fn to_json(&self) -> Value {
        let error = match self.detail() {
            Some(detail) => detail.clone(),
            None => Value::String(self.to_string()),
        };
        json!({ "success": false, "error": error })
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use AppError::*;
        match self {
            MissingCsrfToken => write!(f, "CSRF token not found"),
            Status { status, detail: Some(detail) } => write!(f, "HTTP error! status: {status}: {detail}"),
            Status { status, detail: None } => write!(f, "HTTP error! status: {status}"),
            Rejected(detail) => write!(f, "request rejected: {detail}"),
            Other(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Other(err) => Some(&**err),
            _ => None,
        }
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        Self::Other(anyhow::Error::msg(err))
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        Self::Other(anyhow::Error::msg(err.to_owned()))
    }
}

macro_rules! apperr_impl {
    ($E:ty) => {
        impl From<$E> for AppError {
            fn from(err: $E) -> Self {
                Self::Other(anyhow::Error::from(err))
            }
        }
    };
}

apperr_impl!(anyhow::Error);
apperr_impl!(serde_json::Error);
apperr_impl!(reqwest::Error);
apperr_impl!(std::io::Error);
