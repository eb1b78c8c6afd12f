use crate::session::use_auth;
use leptos::*;
use leptos_router::*;

const NAV_ITEMS: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/colleges", "Colleges"),
    ("/reviews", "Reviews"),
    ("/favorites", "Favorites"),
];

#[component]
pub fn Navigation() -> impl IntoView {
    let auth = use_auth();
    let pathname = use_location().pathname;
    let is_active = move |path: &str| pathname.with(|current| current == path);

    view! {
        <nav class="navbar">
            <A href="/" class="brand">"🎓 EduFinder"</A>
            <div class="nav-links">
                {NAV_ITEMS
                    .iter()
                    .map(|&(path, label)| {
                        view! {
                            <A href=path class="nav-link">
                                <span class:active=move || is_active(path)>{label}</span>
                            </A>
                        }
                    })
                    .collect_view()}
                {move || match auth.user() {
                    Some(user) => view! {
                        <span class="nav-user">{user.email}</span>
                        <A href="/logout" class="nav-link">"Logout"</A>
                    }
                    .into_view(),
                    None => view! { <A href="/signin" class="nav-link">"Sign in"</A> }.into_view(),
                }}
            </div>
        </nav>
    }
}
