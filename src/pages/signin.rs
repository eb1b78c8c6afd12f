use crate::client::HttpStore;
use crate::components::toast::use_toasts;
use crate::error::Notice;
use crate::session::use_auth;
use crate::store::SessionStore;
use leptos::ev::SubmitEvent;
use leptos::*;
use leptos_router::*;

#[component]
pub fn SignInPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let email = create_rw_signal(String::new());
    let busy = create_rw_signal(false);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let address = email.get_untracked();
        if address.trim().is_empty() {
            toasts.push(Notice::error("Please enter your email"));
            return;
        }
        busy.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match HttpStore::default().sign_in(&address).await {
                Ok(session) => {
                    toasts.push(Notice::info(format!("Signed in as {}", session.user.email)));
                    auth.set_session(session);
                    navigate("/colleges", Default::default());
                }
                Err(err) => toasts.push(err.notice("Error signing in")),
            }
            let _ = busy.try_set(false);
        });
    };

    view! {
        <form class="card narrow" on:submit=handle_submit>
            <h1>"Sign in"</h1>
            <p class="muted">"Sign in to save favorites and write reviews."</p>
            <label for="email">"Email"</label>
            <input
                id="email"
                type="email"
                placeholder="you@example.com"
                prop:value=move || email.get()
                on:input=move |e| email.set(event_target_value(&e))
            />
            <button type="submit" class="button" disabled=move || busy.get()>
                {move || if busy.get() { "Signing in..." } else { "Sign in" }}
            </button>
        </form>
    }
}
