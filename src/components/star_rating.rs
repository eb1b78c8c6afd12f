use leptos::*;

/// Five stars, the first `rating` of them filled. Clicking a star reports its
/// value when `on_select` is given.
#[component]
pub fn StarRating(
    #[prop(into)] rating: MaybeSignal<u8>,
    #[prop(optional, into)] on_select: Option<Callback<u8>>,
) -> impl IntoView {
    let interactive = on_select.is_some();
    let rating = Signal::derive(move || rating.get());

    view! {
        <div class="stars" class:interactive=interactive>
            {(1..=5u8)
                .map(|star| {
                    view! {
                        <span
                            class="star"
                            class:filled=move || star <= rating.get()
                            title=format!("{star} star")
                            on:click=move |_| {
                                if let Some(on_select) = on_select {
                                    on_select.call(star);
                                }
                            }
                        >
                            "★"
                        </span>
                    }
                })
                .collect_view()}
        </div>
    }
}
