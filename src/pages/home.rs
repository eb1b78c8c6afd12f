use leptos::*;
use leptos_router::*;

const FEATURES: &[(&str, &str, &str)] = &[
    (
        "/colleges",
        "Explore Colleges",
        "Browse colleges across Hyderabad, Bangalore and Chennai. Filter by course, location and fee.",
    ),
    (
        "/reviews",
        "Read Reviews",
        "See what students say about their colleges, or share your own experience.",
    ),
    (
        "/favorites",
        "Save Favorites",
        "Shortlist the colleges you like and come back to them any time.",
    ),
];

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <section class="hero">
            <h1>"Find the right college for you"</h1>
            <p class="muted">
                "Compare colleges by course, location and fee, and learn from the people who studied there."
            </p>
            <A href="/colleges" class="button">"Start exploring"</A>
        </section>
        <section class="features">
            {FEATURES
                .iter()
                .map(|&(href, title, blurb)| {
                    view! {
                        <A href=href class="card feature">
                            <h3>{title}</h3>
                            <p class="muted">{blurb}</p>
                        </A>
                    }
                })
                .collect_view()}
        </section>
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="card empty">
            <h2>"Page not found"</h2>
            <A href="/">"Back to home"</A>
        </div>
    }
}
