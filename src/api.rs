#[cfg(feature = "ssr")]
use actix_web::{http::header, web, HttpRequest, HttpResponse};
#[cfg(feature = "ssr")]
use crate::client::{SignInRequest, SignOutRequest};
#[cfg(feature = "ssr")]
use crate::db::Database;
#[cfg(feature = "ssr")]
use crate::error::AppError;
#[cfg(feature = "ssr")]
use crate::models::college::FavoriteRequest;
#[cfg(feature = "ssr")]
use crate::models::review::NewReview;
#[cfg(feature = "ssr")]
use crate::models::user::User;
#[cfg(feature = "ssr")]
use crate::store::{CollegeStore, SessionStore};
#[cfg(feature = "ssr")]
use leptos::logging::log;
#[cfg(feature = "ssr")]
use std::sync::Arc;
#[cfg(feature = "ssr")]
use tokio::sync::Mutex;

#[cfg(feature = "ssr")]
pub type SharedDb = web::Data<Arc<Mutex<Database>>>;

/// Registers the REST routes under `/api`.
#[cfg(feature = "ssr")]
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/colleges", web::get().to(get_colleges))
            .route("/users/{user_id}/favorites/ids", web::get().to(get_favorite_ids))
            .route("/users/{user_id}/favorites", web::get().to(get_favorites))
            .route("/favorites", web::post().to(create_favorite))
            .route("/favorites", web::delete().to(delete_favorite))
            .route("/favorites/{id}", web::delete().to(delete_favorite_by_id))
            .route("/reviews", web::get().to(get_reviews))
            .route("/reviews", web::post().to(create_review))
            .route("/auth/sign-in", web::post().to(sign_in))
            .route("/auth/sign-out", web::post().to(sign_out)),
    );
}

#[cfg(feature = "ssr")]
fn error_response(context: &str, err: AppError) -> HttpResponse {
    match err {
        AppError::Validation(rule) => {
            log!("[API] {} rejected: {}", context, rule);
            HttpResponse::BadRequest().body(rule.to_string())
        }
        AppError::Unauthenticated => {
            log!("[API] {} refused: no valid session", context);
            HttpResponse::Unauthorized().body("Sign in required")
        }
        AppError::Forbidden => {
            log!("[API] {} refused: not the session's user", context);
            HttpResponse::Forbidden().body("Not allowed for this account")
        }
        AppError::Remote(msg) => {
            leptos::logging::error!("[API] {} failed: {}", context, msg);
            HttpResponse::InternalServerError().body(format!("Failed to {}", context))
        }
    }
}

#[cfg(feature = "ssr")]
fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolves the caller from its session token. When the request names a
/// user (path, query or body) it has to be that same user.
#[cfg(feature = "ssr")]
async fn authorize(db: &Database, req: &HttpRequest, named_user: Option<&str>) -> Result<User, AppError> {
    let token = bearer_token(req).ok_or(AppError::Unauthenticated)?;
    let user = db
        .user_for_token(token)
        .await?
        .ok_or(AppError::Unauthenticated)?;
    match named_user {
        Some(user_id) if user_id != user.id => Err(AppError::Forbidden),
        _ => Ok(user),
    }
}

#[cfg(feature = "ssr")]
pub async fn get_colleges(db: SharedDb) -> HttpResponse {
    let db = db.lock().await;
    match db.list_colleges().await {
        Ok(colleges) => {
            log!("[API] Returning {} colleges", colleges.len());
            HttpResponse::Ok().json(colleges)
        }
        Err(err) => error_response("fetch colleges", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn get_favorite_ids(db: SharedDb, req: HttpRequest, user_id: web::Path<String>) -> HttpResponse {
    let db = db.lock().await;
    let user = match authorize(&db, &req, Some(user_id.as_str())).await {
        Ok(user) => user,
        Err(err) => return error_response("fetch favorite ids", err),
    };
    match db.favorite_college_ids(&user.id).await {
        Ok(ids) => HttpResponse::Ok().json(ids),
        Err(err) => error_response("fetch favorite ids", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn get_favorites(db: SharedDb, req: HttpRequest, user_id: web::Path<String>) -> HttpResponse {
    let db = db.lock().await;
    let user = match authorize(&db, &req, Some(user_id.as_str())).await {
        Ok(user) => user,
        Err(err) => return error_response("fetch favorites", err),
    };
    match db.list_favorites(&user.id).await {
        Ok(favorites) => HttpResponse::Ok().json(favorites),
        Err(err) => error_response("fetch favorites", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn create_favorite(
    db: SharedDb,
    req: HttpRequest,
    request: web::Json<FavoriteRequest>,
) -> HttpResponse {
    log!(
        "[API] Favorite request - user: {}, college: {}",
        request.user_id,
        request.college_id
    );
    let db = db.lock().await;
    let user = match authorize(&db, &req, Some(request.user_id.as_str())).await {
        Ok(user) => user,
        Err(err) => return error_response("add favorite", err),
    };
    match db.add_favorite(&request.college_id, &user.id).await {
        Ok(()) => HttpResponse::Created().finish(),
        Err(err) => error_response("add favorite", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn delete_favorite(
    db: SharedDb,
    req: HttpRequest,
    query: web::Query<FavoriteRequest>,
) -> HttpResponse {
    let db = db.lock().await;
    let user = match authorize(&db, &req, Some(query.user_id.as_str())).await {
        Ok(user) => user,
        Err(err) => return error_response("remove favorite", err),
    };
    match db.remove_favorite(&query.college_id, &user.id).await {
        Ok(()) => HttpResponse::Ok().body("Favorite removed"),
        Err(err) => error_response("remove favorite", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn delete_favorite_by_id(db: SharedDb, req: HttpRequest, id: web::Path<String>) -> HttpResponse {
    let db = db.lock().await;
    let user = match authorize(&db, &req, None).await {
        Ok(user) => user,
        Err(err) => return error_response("remove favorite", err),
    };
    match db.favorite_owner(&id).await {
        Ok(Some(owner)) if owner != user.id => {
            return error_response("remove favorite", AppError::Forbidden)
        }
        Ok(_) => {}
        Err(err) => return error_response("remove favorite", err),
    }
    match db.remove_favorite_by_id(&id).await {
        Ok(()) => HttpResponse::Ok().body("Favorite removed"),
        Err(err) => error_response("remove favorite", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn get_reviews(db: SharedDb) -> HttpResponse {
    let db = db.lock().await;
    match db.list_reviews().await {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(err) => error_response("fetch reviews", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn create_review(db: SharedDb, req: HttpRequest, review: web::Json<NewReview>) -> HttpResponse {
    log!("[API] Review request for '{}'", review.college_name);
    let db = db.lock().await;
    if let Err(err) = authorize(&db, &req, Some(review.user_id.as_str())).await {
        return error_response("store review", err);
    }
    match db.insert_review(&review).await {
        Ok(stored) => HttpResponse::Created().json(stored),
        Err(err) => error_response("store review", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn sign_in(db: SharedDb, request: web::Json<SignInRequest>) -> HttpResponse {
    let db = db.lock().await;
    match db.sign_in(&request.email).await {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(err) => error_response("sign in", err),
    }
}

#[cfg(feature = "ssr")]
pub async fn sign_out(db: SharedDb, request: web::Json<SignOutRequest>) -> HttpResponse {
    let db = db.lock().await;
    match db.sign_out(&request.token).await {
        Ok(()) => HttpResponse::Ok().body("Signed out"),
        Err(err) => error_response("sign out", err),
    }
}
