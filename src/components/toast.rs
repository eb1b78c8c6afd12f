use crate::error::{Notice, Tone};
use gloo_timers::future::TimeoutFuture;
use leptos::logging::{log, warn};
use leptos::*;

const TOAST_MILLIS: u32 = 4_000;

/// Queue of notices shown in the corner of every page.
#[derive(Debug, Clone, Copy)]
pub struct Toasts {
    notices: RwSignal<Vec<(u64, Notice)>>,
    next_id: StoredValue<u64>,
}

impl Toasts {
    pub fn push(&self, notice: Notice) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        match notice.tone {
            Tone::Destructive => warn!("[TOAST] {} {:?}", notice.title, notice.description),
            Tone::Info => log!("[TOAST] {}", notice.title),
        }
        self.notices.update(|n| n.push((id, notice)));

        let notices = self.notices;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MILLIS).await;
            let _ = notices.try_update(|n| n.retain(|(other, _)| *other != id));
        });
    }

    pub fn dismiss(&self, id: u64) {
        self.notices.update(|n| n.retain(|(other, _)| *other != id));
    }
}

pub fn provide_toasts() {
    provide_context(Toasts {
        notices: create_rw_signal(Vec::new()),
        next_id: store_value(0),
    });
}

pub fn use_toasts() -> Toasts {
    expect_context::<Toasts>()
}

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="toaster" aria-live="polite">
            <For
                each=move || toasts.notices.get()
                key=|(id, _)| *id
                children=move |(id, notice)| {
                    let destructive = notice.tone == Tone::Destructive;
                    view! {
                        <div class="toast" class:destructive=destructive on:click=move |_| toasts.dismiss(id)>
                            <strong>{notice.title}</strong>
                            {notice.description.map(|d| view! { <p>{d}</p> })}
                        </div>
                    }
                }
            />
        </div>
    }
}
