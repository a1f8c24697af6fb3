pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod storage;
pub mod theme;
pub mod todo;

use leptos::mount::mount_to;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use app::App;
use config::AppConfig;
use error::AppError;

/// Look up the configured attachment point and mount `App` into it.
pub fn mount(config: &AppConfig) -> Result<(), AppError> {
    let root = document()
        .get_element_by_id(&config.mount_id)
        .ok_or_else(|| AppError::MountPointMissing(config.mount_id.clone()))?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| AppError::MountPointMissing(config.mount_id.clone()))?;

    let app_config = config.clone();
    mount_to(root, move || view! { <App config=app_config /> }).forget();

    log::info!("Mounted todo app at #{}", config.mount_id);
    Ok(())
}
