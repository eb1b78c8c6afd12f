//! What each view does when it mounts or when the user clicks something.
//!
//! Every write is followed by a full re-read, so callers only ever display
//! state the store has confirmed. Nothing here mutates caller state on failure.
use crate::catalog::{merge_favorites, ToggleAction};
use crate::error::AppError;
use crate::models::college::{College, FavoriteCollege};
use crate::models::review::{Review, ReviewDraft};
use crate::models::user::User;
use crate::store::{CollegeStore, SessionStore};
use crate::validation::validate_review;
use leptos::logging::log;
use std::collections::HashSet;

/// Reads the catalog and flags the user's favorites. Anonymous visitors get
/// every flag cleared and no favorites read is issued.
pub async fn load_catalog<S>(store: &S, user: Option<&User>) -> Result<Vec<College>, AppError>
where
    S: CollegeStore + ?Sized,
{
    let colleges = store.list_colleges().await?;
    let favorite_ids: HashSet<String> = match user {
        Some(user) => store.favorite_college_ids(&user.id).await?.into_iter().collect(),
        None => HashSet::new(),
    };
    log!(
        "[CATALOG] Loaded {} colleges, {} favorites",
        colleges.len(),
        favorite_ids.len()
    );
    Ok(merge_favorites(colleges, &favorite_ids))
}

/// Flips the favorite state of `college_id` as the user saw it in `colleges`,
/// then reloads the catalog.
pub async fn toggle_favorite<S>(
    store: &S,
    user: Option<&User>,
    colleges: &[College],
    college_id: &str,
) -> Result<(ToggleAction, Vec<College>), AppError>
where
    S: CollegeStore + ?Sized,
{
    let action = write_toggle(store, user, colleges, college_id).await?;
    let refreshed = load_catalog(store, user).await?;
    Ok((action, refreshed))
}

/// The write half of [`toggle_favorite`], for callers that order their own
/// reloads.
pub async fn write_toggle<S>(
    store: &S,
    user: Option<&User>,
    colleges: &[College],
    college_id: &str,
) -> Result<ToggleAction, AppError>
where
    S: CollegeStore + ?Sized,
{
    let user = user.ok_or(AppError::Unauthenticated)?;
    let shown_as_favorite = colleges
        .iter()
        .find(|c| c.id == college_id)
        .map(|c| c.is_favorite)
        .unwrap_or(false);

    let action = ToggleAction::for_flag(shown_as_favorite);
    match action {
        ToggleAction::Add => store.add_favorite(college_id, &user.id).await?,
        ToggleAction::Remove => store.remove_favorite(college_id, &user.id).await?,
    }
    log!("[CATALOG] {:?} favorite {} for {}", action, college_id, user.id);
    Ok(action)
}

pub async fn load_favorites<S>(store: &S, user: Option<&User>) -> Result<Vec<FavoriteCollege>, AppError>
where
    S: CollegeStore + ?Sized,
{
    let user = user.ok_or(AppError::Unauthenticated)?;
    store.list_favorites(&user.id).await
}

/// Deletes a favorite by its row id and reloads the user's favorites.
pub async fn remove_favorite<S>(
    store: &S,
    user: Option<&User>,
    favorite_id: &str,
) -> Result<Vec<FavoriteCollege>, AppError>
where
    S: CollegeStore + ?Sized,
{
    let user = user.ok_or(AppError::Unauthenticated)?;
    store.remove_favorite_by_id(favorite_id).await?;
    log!("[FAVORITES] Removed favorite {}", favorite_id);
    store.list_favorites(&user.id).await
}

pub async fn load_reviews<S>(store: &S) -> Result<Vec<Review>, AppError>
where
    S: CollegeStore + ?Sized,
{
    store.list_reviews().await
}

/// Validates and stores the draft, clears it, and reloads the review list.
///
/// The draft is left untouched when the user is signed out, when a rule is
/// broken, or when the insert fails. Once the insert succeeds the draft is
/// cleared even if the reload then fails.
pub async fn submit_review<S>(
    store: &S,
    user: Option<&User>,
    draft: &mut ReviewDraft,
) -> Result<Vec<Review>, AppError>
where
    S: CollegeStore + ?Sized,
{
    let user = user.ok_or(AppError::Unauthenticated)?;
    let valid = validate_review(draft)?;

    let stored = store.insert_review(&valid.into_new_review(&user.id)).await?;
    log!("[REVIEWS] Submitted review {} for '{}'", stored.id, stored.college_name);
    draft.clear();

    store.list_reviews().await
}

pub async fn sign_out<S>(store: &S, token: &str) -> Result<(), AppError>
where
    S: SessionStore + ?Sized,
{
    store.sign_out(token).await?;
    log!("[AUTH] Signed out");
    Ok(())
}
