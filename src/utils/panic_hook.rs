use leptos::logging::{error, log};
use std::panic;

/// Forwards panics to the browser console, then logs the payload and where
/// it happened with the same prefix the rest of the app uses.
pub fn set_custom_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        console_error_panic_hook::hook(panic_info);

        let message = if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else {
            "Unknown panic".to_string()
        };
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown location".to_string());

        error!("[PANIC] {} at {}", message, location);
        if message.contains("OwnerDisposed") {
            error!("[PANIC] A view was unmounted while one of its requests was still running");
        }
    }));
}

/// Call once when the app starts in the browser
pub fn init() {
    log!("[PANIC_HOOK] Setting up custom panic hook");
    set_custom_panic_hook();
}
