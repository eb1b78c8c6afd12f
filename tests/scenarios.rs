//! User journeys through the catalog, favorites and reviews views, run
//! against an in-memory store.
#![cfg(feature = "ssr")]

use edufinder::actions::{load_catalog, load_reviews, submit_review, toggle_favorite};
use edufinder::catalog::{apply_filters, CatalogFilter, FeeRange, ToggleAction};
use edufinder::db::Database;
use edufinder::error::AppError;
use edufinder::models::college::{College, Course, Location};
use edufinder::models::review::ReviewDraft;
use edufinder::store::{CollegeStore, SessionStore};

async fn create_test_db() -> Database {
    let db = Database::new(":memory:").unwrap();
    db.create_schema().await.unwrap();
    db
}

async fn add_college(db: &Database, id: &str, name: &str, fee: u32) -> College {
    let college = College {
        id: id.to_string(),
        name: name.to_string(),
        location: Location::Hyderabad,
        course: Course::ComputerScience,
        fee,
        is_favorite: false,
    };
    db.insert_college(&college).await.unwrap();
    college
}

#[tokio::test]
async fn anonymous_visitor_sees_no_favorites_and_cannot_toggle() {
    let db = create_test_db().await;
    add_college(&db, "c1", "IIT Hyderabad", 220_000).await;
    add_college(&db, "c2", "IIIT Hyderabad", 180_000).await;
    add_college(&db, "c3", "Osmania University", 75_000).await;

    let colleges = load_catalog(&db, None).await.unwrap();
    assert_eq!(colleges.len(), 3);
    assert!(colleges.iter().all(|c| !c.is_favorite));

    let err = toggle_favorite(&db, None, &colleges, "c2").await.unwrap_err();
    assert_eq!(err, AppError::Unauthenticated);
    assert_eq!(err.notice("Error updating favorites").title, "Please sign in");

    let after = load_catalog(&db, None).await.unwrap();
    assert_eq!(after, colleges);
}

#[tokio::test]
async fn signed_in_user_unfavorites_an_existing_favorite() {
    let db = create_test_db().await;
    let user = db.sign_in("asha@example.com").await.unwrap().user;
    add_college(&db, "c1", "IIT Hyderabad", 220_000).await;
    add_college(&db, "c2", "IIIT Hyderabad", 180_000).await;
    add_college(&db, "c3", "Osmania University", 75_000).await;
    db.add_favorite("c2", &user.id).await.unwrap();

    let colleges = load_catalog(&db, Some(&user)).await.unwrap();
    let flagged: Vec<&str> = colleges
        .iter()
        .filter(|c| c.is_favorite)
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(flagged, vec!["c2"]);

    let (action, refreshed) = toggle_favorite(&db, Some(&user), &colleges, "c2")
        .await
        .unwrap();
    assert_eq!(action, ToggleAction::Remove);
    assert!(refreshed.iter().all(|c| !c.is_favorite));
    assert!(db.list_favorites(&user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn submitted_review_clears_the_draft_and_lists_first() {
    let db = create_test_db().await;
    let user = db.sign_in("asha@example.com").await.unwrap().user;

    let mut earlier = ReviewDraft {
        college_name: "Anna University".into(),
        rating: 3,
        comment: "Good value for the fees.".into(),
    };
    submit_review(&db, Some(&user), &mut earlier).await.unwrap();

    let mut draft = ReviewDraft {
        college_name: "IIT Delhi".into(),
        rating: 5,
        comment: "Excellent faculty and infrastructure.".into(),
    };
    let listed = submit_review(&db, Some(&user), &mut draft).await.unwrap();

    assert_eq!(draft, ReviewDraft::default());
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].college_name, "IIT Delhi");
    assert_eq!(listed[0].rating, 5);
    assert_eq!(listed[0].comment, "Excellent faculty and infrastructure.");
    assert_eq!(listed[0].user_id, user.id);

    // anyone can read the list
    assert_eq!(load_reviews(&db).await.unwrap(), listed);
}

#[tokio::test]
async fn fee_range_keeps_only_colleges_inside_it() {
    let db = create_test_db().await;
    add_college(&db, "cheap", "Budget Institute", 40_000).await;
    add_college(&db, "mid", "Midrange College", 75_000).await;

    let colleges = load_catalog(&db, None).await.unwrap();
    let filter = CatalogFilter {
        fee_range: FeeRange {
            min: 50_000,
            max: 100_000,
        },
        ..Default::default()
    };
    let visible = apply_filters(&colleges, &filter);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "mid");
    assert_eq!(visible[0].fee, 75_000);
}
