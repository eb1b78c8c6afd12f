//! The remote store the views read from and write to.
//!
//! `Database` implements these traits on the server, `HttpStore` implements
//! them in the browser by calling the REST API. Futures are not `Send` because
//! the browser side runs on a single-threaded executor.
use crate::error::AppError;
use crate::models::college::{College, FavoriteCollege};
use crate::models::review::{NewReview, Review};
use crate::models::user::Session;
use async_trait::async_trait;

#[async_trait(?Send)]
pub trait CollegeStore {
    async fn list_colleges(&self) -> Result<Vec<College>, AppError>;

    /// Ids of the colleges `user_id` has favorited.
    async fn favorite_college_ids(&self, user_id: &str) -> Result<Vec<String>, AppError>;

    /// Favorite rows of `user_id` joined with their colleges.
    async fn list_favorites(&self, user_id: &str) -> Result<Vec<FavoriteCollege>, AppError>;

    async fn add_favorite(&self, college_id: &str, user_id: &str) -> Result<(), AppError>;

    /// Deletes the row matching both the college and the user.
    async fn remove_favorite(&self, college_id: &str, user_id: &str) -> Result<(), AppError>;

    /// Deletes a favorite row by its own id.
    async fn remove_favorite_by_id(&self, favorite_id: &str) -> Result<(), AppError>;

    /// All reviews, newest first.
    async fn list_reviews(&self) -> Result<Vec<Review>, AppError>;

    async fn insert_review(&self, review: &NewReview) -> Result<Review, AppError>;
}

#[async_trait(?Send)]
pub trait SessionStore {
    async fn sign_in(&self, email: &str) -> Result<Session, AppError>;

    async fn sign_out(&self, token: &str) -> Result<(), AppError>;
}
