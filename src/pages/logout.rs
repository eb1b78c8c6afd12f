use crate::actions;
use crate::client::HttpStore;
use crate::components::toast::use_toasts;
use crate::session::use_auth;
use leptos::*;
use leptos_router::*;

/// Ends the session as soon as the page mounts.
#[component]
pub fn LogoutPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();

    create_effect(move |_| {
        if !auth.ready.get() {
            return;
        }
        let Some(token) = auth.session.with_untracked(|s| s.as_ref().map(|s| s.token.clone())) else {
            return;
        };
        spawn_local(async move {
            if let Err(err) = actions::sign_out(&HttpStore::default(), &token).await {
                toasts.push(err.notice("Error signing out"));
            }
            // the local session goes either way
            auth.clear();
        });
    });

    view! {
        <div class="card narrow empty">
            <span class="icon">"👋"</span>
            <h1>"You've been signed out"</h1>
            <p class="muted">"Thanks for visiting EduFinder. Come back soon!"</p>
            <A href="/" class="button">"Back to home"</A>
        </div>
    }
}
