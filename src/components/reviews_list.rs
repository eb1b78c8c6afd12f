use crate::components::star_rating::StarRating;
use crate::models::review::Review;
use leptos::*;

#[component]
pub fn ReviewsList(#[prop(into)] reviews: Signal<Vec<Review>>) -> impl IntoView {
    view! {
        <div class="reviews-list">
            <h2>"Recent Reviews"</h2>
            <Show
                when=move || reviews.with(|r| !r.is_empty())
                fallback=|| view! {
                    <div class="card empty">"No reviews yet. Be the first to review!"</div>
                }
            >
                <For
                    each=move || reviews.get()
                    key=|review| review.id.clone()
                    children=move |review: Review| {
                        view! {
                            <div class="card review">
                                <div class="card-header">
                                    <h3>{review.college_name}</h3>
                                    <StarRating rating=review.rating/>
                                </div>
                                <p class="muted">{review.created_at.format("%d %b %Y").to_string()}</p>
                                <p>{review.comment}</p>
                            </div>
                        }
                    }
                />
            </Show>
        </div>
    }
}
