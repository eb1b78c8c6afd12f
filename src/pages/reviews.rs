use crate::actions;
use crate::client::HttpStore;
use crate::components::review_form::ReviewForm;
use crate::components::reviews_list::ReviewsList;
use crate::components::toast::use_toasts;
use crate::error::{AppError, Notice};
use crate::models::review::{Review, ReviewDraft};
use crate::session::use_auth;
use leptos::*;

#[component]
pub fn ReviewsPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();

    let reviews = create_rw_signal(Vec::<Review>::new());
    let draft = create_rw_signal(ReviewDraft::default());
    let submitting = create_rw_signal(false);

    // The list is public, so it loads regardless of who is signed in
    create_effect(move |_| {
        spawn_local(async move {
            match actions::load_reviews(&HttpStore::default()).await {
                Ok(list) => {
                    let _ = reviews.try_set(list);
                }
                Err(err) => toasts.push(err.notice("Error loading reviews")),
            }
        });
    });

    let submit = move |_: ()| {
        if submitting.get_untracked() {
            return;
        }
        let user = auth.user_untracked();
        let store = auth.store_untracked();
        let mut working = draft.get_untracked();
        submitting.set(true);

        spawn_local(async move {
            let result = actions::submit_review(&store, user.as_ref(), &mut working).await;
            // cleared once the insert went through, untouched otherwise
            let _ = draft.try_set(working);
            match result {
                Ok(list) => {
                    toasts.push(Notice::info("Review submitted").with_description("Thanks for sharing!"));
                    let _ = reviews.try_set(list);
                }
                Err(AppError::Unauthenticated) => toasts.push(
                    Notice::error("Please sign in")
                        .with_description("You need to be logged in to submit reviews"),
                ),
                Err(err) => toasts.push(err.notice("Error submitting review")),
            }
            let _ = submitting.try_set(false);
        });
    };

    view! {
        <h1 class="page-title">"College Reviews"</h1>
        <div class="two-columns">
            <ReviewForm
                draft=draft
                submitting=submitting
                signed_in=Signal::derive(move || auth.is_signed_in())
                on_submit=submit
            />
            <ReviewsList reviews=reviews/>
        </div>
    }
}
