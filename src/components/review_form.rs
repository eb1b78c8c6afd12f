use crate::components::star_rating::StarRating;
use crate::models::review::ReviewDraft;
use leptos::ev::SubmitEvent;
use leptos::*;

#[component]
pub fn ReviewForm(
    draft: RwSignal<ReviewDraft>,
    #[prop(into)] submitting: Signal<bool>,
    #[prop(into)] signed_in: Signal<bool>,
    #[prop(into)] on_submit: Callback<()>,
) -> impl IntoView {
    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit.call(());
    };

    view! {
        <form class="card review-form" on:submit=handle_submit>
            <h2>"Submit a Review"</h2>
            <p class="muted">"Share your experience with a college"</p>

            <label for="college-name">"College Name"</label>
            <input
                id="college-name"
                type="text"
                placeholder="Enter college name"
                prop:value=move || draft.with(|d| d.college_name.clone())
                on:input=move |e| draft.update(|d| d.college_name = event_target_value(&e))
            />

            <label>"Rating"</label>
            <StarRating
                rating=Signal::derive(move || draft.with(|d| d.rating))
                on_select=move |stars: u8| draft.update(|d| d.rating = stars)
            />

            <label for="comment">"Your Review"</label>
            <textarea
                id="comment"
                rows="4"
                placeholder="Share your thoughts..."
                prop:value=move || draft.with(|d| d.comment.clone())
                on:input=move |e| draft.update(|d| d.comment = event_target_value(&e))
            ></textarea>

            <button type="submit" class="button" disabled=move || submitting.get() || !signed_in.get()>
                {move || if submitting.get() { "Submitting..." } else { "Submit Review" }}
            </button>
            <Show when=move || !signed_in.get()>
                <p class="muted">"Please sign in to submit reviews"</p>
            </Show>
        </form>
    }
}
