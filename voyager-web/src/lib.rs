#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod adapters;
pub mod app;
pub mod components;
pub mod dom;
pub mod endpoints;
pub mod logger;
pub mod pages;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init();
    log::info!("voyager passport starting");
    yew::Renderer::<app::App>::new().render();
}
