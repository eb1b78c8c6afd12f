use thiserror::Error;

/// Rules a review draft can break. Display text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("College name is required")]
    CollegeNameRequired,
    #[error("College name must be at most 100 characters")]
    CollegeNameTooLong,
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,
    #[error("Comment must be at least 10 characters")]
    CommentTooShort,
    #[error("Comment must be at most 500 characters")]
    CommentTooLong,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("you need to be signed in to do that")]
    Unauthenticated,
    #[error("that belongs to another user")]
    Forbidden,
    #[error("remote operation failed: {0}")]
    Remote(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AppError {
    pub fn remote(err: impl std::fmt::Display) -> Self {
        AppError::Remote(err.to_string())
    }

    /// Turns the error into the toast shown for a failed `action`
    /// (e.g. "Error loading colleges").
    pub fn notice(&self, title: &str) -> Notice {
        match self {
            AppError::Unauthenticated => Notice::error("Please sign in")
                .with_description("You need to be logged in to do that"),
            AppError::Forbidden => {
                Notice::error(title).with_description("That belongs to another account")
            }
            AppError::Remote(_) => Notice::error(title),
            AppError::Validation(rule) => {
                Notice::error("Validation error").with_description(rule.to_string())
            }
        }
    }
}

#[cfg(feature = "ssr")]
impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::Remote(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Destructive,
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: Option<String>,
    pub tone: Tone,
}

impl Notice {
    pub fn info(title: impl Into<String>) -> Self {
        Notice {
            title: title.into(),
            description: None,
            tone: Tone::Info,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Notice {
            title: title.into(),
            description: None,
            tone: Tone::Destructive,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
