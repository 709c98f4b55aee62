//! HTTP implementation of [`RecipeBackend`] for the hosted recipe backend.
//!
//! Endpoints (relative to the configured API root):
//! - `GET  /health`
//! - `POST /auth/{entity}/login` -> `{ "token": "..." }`
//! - `GET  /auth/{entity}/me` (bearer token)
//! - `GET  /collections/{slug}?{field}_eq=..&relations=..&orderBy=..&order=..&perPage=..`
//!
//! Tokens are stateless on the server, so logout only forgets the local token.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use plate_palette_core::{Email, Identity, Order, Recipe};
use reqwest::{RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{BackendError, RecipeBackend, RecordQuery};
use crate::config::BackendConfig;

const RECIPES_SLUG: &str = "recipes";
const ORDERS_SLUG: &str = "orders";

/// Paginated collection envelope.
#[derive(Debug, Deserialize)]
struct Paginated<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Client for the hosted recipe backend.
///
/// Cheap to clone; clones share the HTTP pool and the session token.
#[derive(Clone)]
pub struct ManifestBackend {
    inner: Arc<ManifestBackendInner>,
}

struct ManifestBackendInner {
    client: reqwest::Client,
    api_root: String,
    auth_entity: String,
    token: RwLock<Option<SecretString>>,
}

impl std::fmt::Debug for ManifestBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestBackend")
            .field("api_root", &self.inner.api_root)
            .field("auth_entity", &self.inner.auth_entity)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl ManifestBackend {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ManifestBackendInner {
                client,
                api_root: config.base_url.as_str().trim_end_matches('/').to_string(),
                auth_entity: config.auth_entity.clone(),
                token: RwLock::new(None),
            }),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.api_root)
    }

    fn token(&self) -> Option<SecretString> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_token(&self, token: Option<SecretString>) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Fetch one collection page and unwrap the envelope.
    async fn find<T: DeserializeOwned>(
        &self,
        slug: &str,
        query: &RecordQuery,
    ) -> Result<Vec<T>, BackendError> {
        let mut url = Url::parse(&self.endpoint(&format!("collections/{slug}"))).map_err(|e| {
            BackendError::Api {
                status: 0,
                message: format!("invalid collection URL: {e}"),
            }
        })?;
        let pairs = query.to_query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        let response = self.authorized(self.inner.client.get(url)).send().await?;
        let body = read_success_body(response).await?;
        let page: Paginated<T> = parse_body(&body)?;
        debug!(count = page.data.len(), "Fetched collection page");
        Ok(page.data)
    }
}

#[async_trait]
impl RecipeBackend for ManifestBackend {
    #[instrument(skip(self))]
    async fn health(&self) -> Result<(), BackendError> {
        let response = self.inner.client.get(self.endpoint("health")).send().await?;
        read_success_body(response).await.map(|_| ())
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: &Email, password: &SecretString) -> Result<(), BackendError> {
        let body = serde_json::json!({
            "email": email.as_str(),
            "password": password.expose_secret(),
        });

        let response = self
            .inner
            .client
            .post(self.endpoint(&format!("auth/{}/login", self.inner.auth_entity)))
            .json(&body)
            .send()
            .await?;

        if is_auth_rejection(response.status()) {
            return Err(BackendError::Unauthorized);
        }

        let body = read_success_body(response).await?;
        let login: LoginResponse = parse_body(&body)?;
        self.set_token(Some(SecretString::from(login.token)));
        Ok(())
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<(), BackendError> {
        self.set_token(None);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn current_session(&self) -> Result<Option<Identity>, BackendError> {
        let Some(token) = self.token() else {
            return Ok(None);
        };

        let response = self
            .inner
            .client
            .get(self.endpoint(&format!("auth/{}/me", self.inner.auth_entity)))
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        if is_auth_rejection(response.status()) {
            // Expired or revoked token
            self.set_token(None);
            return Ok(None);
        }

        let body = read_success_body(response).await?;
        parse_body(&body).map(Some)
    }

    #[instrument(skip(self, query), fields(params = ?query.to_query_pairs()))]
    async fn find_recipes(&self, query: &RecordQuery) -> Result<Vec<Recipe>, BackendError> {
        self.find(RECIPES_SLUG, query).await
    }

    #[instrument(skip(self, query), fields(params = ?query.to_query_pairs()))]
    async fn find_orders(&self, query: &RecordQuery) -> Result<Vec<Order>, BackendError> {
        self.find(ORDERS_SLUG, query).await
    }
}

const fn is_auth_rejection(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Read the body, turning non-success statuses into [`BackendError::Api`].
async fn read_success_body(response: reqwest::Response) -> Result<String, BackendError> {
    let status = response.status();

    // Get response body as text first for better error diagnostics
    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %body.chars().take(500).collect::<String>(),
            "Recipe backend returned non-success status"
        );
        return Err(BackendError::Api {
            status: status.as_u16(),
            message: body.chars().take(200).collect(),
        });
    }

    Ok(body)
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, BackendError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %body.chars().take(500).collect::<String>(),
            "Failed to parse recipe backend response"
        );
        BackendError::Parse(e)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use plate_palette_core::{Role, UserId};

    use super::*;

    fn backend(base: &str) -> ManifestBackend {
        ManifestBackend::new(&BackendConfig {
            base_url: Url::parse(base).unwrap(),
            auth_entity: "users".to_string(),
            probe_timeout: Duration::from_secs(1),
            request_timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        assert_eq!(
            backend("http://localhost:1111/api/").endpoint("health"),
            "http://localhost:1111/api/health"
        );
        assert_eq!(
            backend("http://localhost:1111/api").endpoint("auth/users/me"),
            "http://localhost:1111/api/auth/users/me"
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let backend = backend("http://localhost:1111/api");
        backend.set_token(Some(SecretString::from("very-secret-jwt")));
        let debug_output = format!("{backend:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("very-secret-jwt"));
    }

    #[tokio::test]
    async fn test_logout_forgets_token_and_session() {
        let backend = backend("http://localhost:1111/api");
        backend.set_token(Some(SecretString::from("jwt")));
        backend.logout().await.unwrap();
        assert!(backend.token().is_none());
        // No token means no request at all
        assert!(backend.current_session().await.unwrap().is_none());
    }

    #[test]
    fn test_parse_paginated_orders() {
        let body = r#"{
            "data": [{"id": 3, "totalAmount": 20, "status": "Pending", "recipes": []}],
            "currentPage": 1, "lastPage": 1, "from": 1, "to": 1, "total": 1, "perPage": 20
        }"#;
        let page: Paginated<Order> = parse_body(body).unwrap();
        assert_eq!(page.data.len(), 1);
    }

    #[test]
    fn test_parse_me_response() {
        let body = r#"{"id": 5, "name": "Ada", "email": "ada@example.com", "role": "admin"}"#;
        let identity: Identity = parse_body(body).unwrap();
        assert_eq!(identity.id, UserId::new(5));
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn test_parse_failure_is_parse_error() {
        let result: Result<LoginResponse, _> = parse_body("<html>oops</html>");
        assert!(matches!(result, Err(BackendError::Parse(_))));
    }

    #[test]
    fn test_auth_rejection_statuses() {
        assert!(is_auth_rejection(StatusCode::UNAUTHORIZED));
        assert!(is_auth_rejection(StatusCode::FORBIDDEN));
        assert!(!is_auth_rejection(StatusCode::NOT_FOUND));
    }
}
