pub mod actions;
pub mod api;
pub mod app;
pub mod catalog;
pub mod client;
pub mod components;
#[cfg(feature = "ssr")]
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pages;
pub mod session;
pub mod store;
pub mod utils;
pub mod validation;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;

    utils::panic_hook::init();
    leptos::mount_to_body(App);
}
