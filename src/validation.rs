//! Schema checks for review drafts.
use crate::error::ValidationError;
use crate::models::review::{NewReview, ReviewDraft};

pub const COLLEGE_NAME_MAX: usize = 100;
pub const COMMENT_MIN: usize = 10;
pub const COMMENT_MAX: usize = 500;
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// A draft that passed every rule. Name and comment are already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidReview {
    pub college_name: String,
    pub rating: u8,
    pub comment: String,
}

impl ValidReview {
    pub fn into_new_review(self, user_id: &str) -> NewReview {
        NewReview {
            college_name: self.college_name,
            rating: self.rating,
            comment: self.comment,
            user_id: user_id.to_string(),
        }
    }
}

/// Checks the draft rule by rule and stops at the first one it breaks.
/// Lengths are counted in characters.
pub fn validate_review(draft: &ReviewDraft) -> Result<ValidReview, ValidationError> {
    let college_name = draft.college_name.trim();
    let name_len = college_name.chars().count();
    if name_len == 0 {
        return Err(ValidationError::CollegeNameRequired);
    }
    if name_len > COLLEGE_NAME_MAX {
        return Err(ValidationError::CollegeNameTooLong);
    }

    if !RATING_RANGE.contains(&draft.rating) {
        return Err(ValidationError::RatingOutOfRange);
    }

    let comment = draft.comment.trim();
    let comment_len = comment.chars().count();
    if comment_len < COMMENT_MIN {
        return Err(ValidationError::CommentTooShort);
    }
    if comment_len > COMMENT_MAX {
        return Err(ValidationError::CommentTooLong);
    }

    Ok(ValidReview {
        college_name: college_name.to_string(),
        rating: draft.rating,
        comment: comment.to_string(),
    })
}

/// Same rules, applied to an insert body that arrived over the wire.
pub fn validate_new_review(review: &NewReview) -> Result<ValidReview, ValidationError> {
    validate_review(&ReviewDraft {
        college_name: review.college_name.clone(),
        rating: review.rating,
        comment: review.comment.clone(),
    })
}
