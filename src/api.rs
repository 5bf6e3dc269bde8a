use std::sync::Arc;

use reqwest::{cookie::Jar, Method, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{
    credentials::{CookieCsrf, CSRF_HEADER},
    AppError, AppResult,
};

pub const PROFILE: &str = "api/profile/";
pub const PROFILE_ADD_HOBBY: &str = "api/profile/add_hobby";
pub const PROFILE_DELETE_HOBBY: &str = "api/profile/delete_hobby";
pub const HOBBIES: &str = "api/hobbies/";
pub const SIMILAR_USERS: &str = "api/users/similar_with_filters/";
pub const SEND_FRIEND_REQUEST: &str = "api/send_request/";

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    jar: Arc<Jar>,
}

impl ApiClient {
    pub fn new(mut base: Url) -> AppResult<Self> {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let jar = Arc::new(Jar::default());
        let http = reqwest::ClientBuilder::new()
            .cookie_provider(jar.clone())
            .build()?;

        Ok(ApiClient { http, base, jar })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Token source backed by this client's own cookies.
    pub fn cookie_csrf(&self) -> CookieCsrf {
        CookieCsrf::new(self.jar.clone(), self.base.clone())
    }

    pub fn url(&self, endpoint: &str) -> AppResult<Url> {
        Ok(self.base.join(endpoint).map_err(anyhow::Error::from)?)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<T> {
        let url = self.url(endpoint)?;
        debug!("GET {url}");

        let response = self.http.get(url).send().await?;
        Ok(checked(response).await?.json().await?)
    }

    pub async fn get_json_with<T, Q>(&self, endpoint: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(endpoint)?;
        debug!("GET {url}");

        let response = self.http.get(url).query(query).send().await?;
        Ok(checked(response).await?.json().await?)
    }

    /// State-changing request: JSON body plus the CSRF header.
    pub async fn send<B>(&self, method: Method, endpoint: &str, csrf_token: &str, body: &B) -> AppResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(endpoint)?;
        debug!("{method} {url}");

        let response = self.http
            .request(method, url)
            .header(CSRF_HEADER, csrf_token)
            .json(body)
            .send()
            .await?;
        checked(response).await
    }
}

/// Turn a non-2xx response into [`AppError::Status`], keeping whatever
/// error content the body carried.
async fn checked(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| error_detail(&body));
    Err(AppError::Status { status, detail })
}

pub(crate) fn error_detail(body: &Value) -> Option<Value> {
    body.get("errors")
        .or_else(|| body.get("message"))
        .or_else(|| body.get("detail"))
        .cloned()
}

/// Endpoints that answer 2xx with `{"status": "error", ...}` on logical
/// failure.
pub(crate) fn ensure_success(body: &Value) -> AppResult<()> {
    match body.get("status").and_then(Value::as_str) {
        Some("success") => Ok(()),
        _ => Err(AppError::Rejected(error_detail(body).unwrap_or(Value::Null))),
    }
}
