//! YDMS Console Entry Point

mod api;
mod app;
mod auth;
mod categories;
mod components;
mod config;
mod context;
mod documents;
mod error;
mod forms;
mod markdown;
mod materials;
mod models;
mod pages;
mod permissions;
mod store;
mod toast;
mod tree;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("[APP] logger init failed: {}", err).into());
    }
    log::info!("[APP] YDMS console starting, api base {:?}", config::api_base_url());
    mount_to_body(App);
}
