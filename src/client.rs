//! Browser-side SDK for the REST API served by `api.rs`.
use crate::error::AppError;
use crate::models::college::{College, FavoriteCollege, FavoriteRequest};
use crate::models::review::{NewReview, Review};
use crate::models::user::Session;
use crate::store::{CollegeStore, SessionStore};
use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::logging::log;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SignInRequest {
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SignOutRequest {
    pub token: String,
}

/// Calls the REST API. Requests carry `Authorization: Bearer <token>` when a
/// session token is set; the server resolves the user from it.
#[derive(Debug, Clone)]
pub struct HttpStore {
    base_url: String,
    token: Option<String>,
}

impl Default for HttpStore {
    /// Talks to the server that served the page.
    fn default() -> Self {
        HttpStore::new("")
    }
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpStore {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {}", token))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.authorization() {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn check(response: Response) -> Result<Response, AppError> {
        if response.ok() {
            Ok(response)
        } else {
            let status = response.status();
            let url = response.url();
            let body = response.text().await.unwrap_or_default();
            log!("[CLIENT] {} {} -> {}", status, url, body);
            Err(match status {
                401 => AppError::Unauthenticated,
                403 => AppError::Forbidden,
                _ => AppError::Remote(format!("{} {}", status, body)),
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self
            .authorize(Request::get(&self.url(path)))
            .send()
            .await
            .map_err(AppError::remote)?;
        Self::check(response)
            .await?
            .json::<T>()
            .await
            .map_err(AppError::remote)
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, AppError> {
        let response = self
            .authorize(Request::post(&self.url(path)))
            .json(body)
            .map_err(AppError::remote)?
            .send()
            .await
            .map_err(AppError::remote)?;
        Self::check(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        let response = self
            .authorize(Request::delete(&self.url(path)))
            .send()
            .await
            .map_err(AppError::remote)?;
        Self::check(response).await.map(|_| ())
    }
}

#[async_trait(?Send)]
impl CollegeStore for HttpStore {
    async fn list_colleges(&self) -> Result<Vec<College>, AppError> {
        self.get_json("/colleges").await
    }

    async fn favorite_college_ids(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        self.get_json(&format!("/users/{}/favorites/ids", urlencoding::encode(user_id)))
            .await
    }

    async fn list_favorites(&self, user_id: &str) -> Result<Vec<FavoriteCollege>, AppError> {
        self.get_json(&format!("/users/{}/favorites", urlencoding::encode(user_id)))
            .await
    }

    async fn add_favorite(&self, college_id: &str, user_id: &str) -> Result<(), AppError> {
        let body = FavoriteRequest {
            college_id: college_id.to_string(),
            user_id: user_id.to_string(),
        };
        self.post_json("/favorites", &body).await.map(|_| ())
    }

    async fn remove_favorite(&self, college_id: &str, user_id: &str) -> Result<(), AppError> {
        self.delete(&format!(
            "/favorites?college_id={}&user_id={}",
            urlencoding::encode(college_id),
            urlencoding::encode(user_id)
        ))
        .await
    }

    async fn remove_favorite_by_id(&self, favorite_id: &str) -> Result<(), AppError> {
        self.delete(&format!("/favorites/{}", urlencoding::encode(favorite_id)))
            .await
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, AppError> {
        self.get_json("/reviews").await
    }

    async fn insert_review(&self, review: &NewReview) -> Result<Review, AppError> {
        self.post_json("/reviews", review)
            .await?
            .json::<Review>()
            .await
            .map_err(AppError::remote)
    }
}

#[async_trait(?Send)]
impl SessionStore for HttpStore {
    async fn sign_in(&self, email: &str) -> Result<Session, AppError> {
        let body = SignInRequest {
            email: email.to_string(),
        };
        self.post_json("/auth/sign-in", &body)
            .await?
            .json::<Session>()
            .await
            .map_err(AppError::remote)
    }

    async fn sign_out(&self, token: &str) -> Result<(), AppError> {
        let body = SignOutRequest {
            token: token.to_string(),
        };
        self.post_json("/auth/sign-out", &body).await.map(|_| ())
    }
}
