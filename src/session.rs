//! Signed-in state for the browser. The session returned by sign-in is kept
//! in local storage so a reload keeps the user signed in.
use crate::client::HttpStore;
use crate::models::user::{Session, User};
use leptos::logging::warn;
use leptos::*;

const STORAGE_KEY: &str = "edufinder.session";

#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub session: RwSignal<Option<Session>>,
    /// False until the stored session has been read on the client.
    pub ready: RwSignal<bool>,
}

impl AuthContext {
    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.as_ref().map(|s| s.user.clone()))
    }

    pub fn user_untracked(&self) -> Option<User> {
        self.session.with_untracked(|s| s.as_ref().map(|s| s.user.clone()))
    }

    /// REST store authorized with the current session token.
    pub fn store_untracked(&self) -> HttpStore {
        let token = self.session.with_untracked(|s| s.as_ref().map(|s| s.token.clone()));
        HttpStore::default().with_token(token)
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.with(Option::is_some)
    }

    pub fn set_session(&self, session: Session) {
        save_session(&session);
        self.session.set(Some(session));
    }

    pub fn clear(&self) {
        forget_session();
        self.session.set(None);
    }
}

pub fn provide_auth() {
    let auth = AuthContext {
        session: create_rw_signal(None),
        ready: create_rw_signal(false),
    };
    // effects only run in the browser, where storage exists
    create_effect(move |_| {
        auth.session.set(load_session());
        auth.ready.set(true);
    });
    provide_context(auth);
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

fn storage() -> Option<web_sys::Storage> {
    gloo_utils::window().local_storage().ok().flatten()
}

fn load_session() -> Option<Session> {
    let raw = storage()?.get_item(STORAGE_KEY).ok()??;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(err) => {
            warn!("[AUTH] Dropping unreadable stored session: {}", err);
            forget_session();
            None
        }
    }
}

fn save_session(session: &Session) {
    let Some(storage) = storage() else {
        return;
    };
    match serde_json::to_string(session) {
        Ok(raw) => {
            if storage.set_item(STORAGE_KEY, &raw).is_err() {
                warn!("[AUTH] Could not persist session");
            }
        }
        Err(err) => warn!("[AUTH] Could not encode session: {}", err),
    }
}

fn forget_session() {
    if let Some(storage) = storage() {
        if let Err(err) = storage.remove_item(STORAGE_KEY) {
            warn!("[AUTH] Could not remove stored session: {:?}", err);
        }
    }
}
