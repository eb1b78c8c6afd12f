// src/models/review.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: String,
    pub college_name: String, // free text, not tied to the catalog
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>, // set by the store
    pub user_id: String,
}

/// Body of a review insert. Built from a validated draft.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub college_name: String,
    pub rating: u8,
    pub comment: String,
    pub user_id: String,
}

/// What the review form holds while the user is typing.
/// A rating of 0 means no star has been picked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub college_name: String,
    pub rating: u8,
    pub comment: String,
}

impl ReviewDraft {
    pub fn clear(&mut self) {
        *self = ReviewDraft::default();
    }
}
