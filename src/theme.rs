use leptos::prelude::*;

use crate::storage::{KeyValueStore, LocalStorage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Unknown strings mean "follow the system".
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "light" => ThemeMode::Light,
            "dark" => ThemeMode::Dark,
            _ => ThemeMode::System,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
            ThemeMode::System => "System",
        }
    }

    /// System -> Light -> Dark -> System
    pub fn next(&self) -> Self {
        match self {
            ThemeMode::System => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::System,
        }
    }
}

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub mode: RwSignal<ThemeMode>,
}

/// Apply the theme by setting or removing the `data-theme` attribute on `<html>`.
/// - Light / Dark force the palette
/// - System removes the attribute, CSS @media handles it
pub fn apply_theme(mode: ThemeMode) {
    if let Some(window) = web_sys::window() {
        if let Some(doc) = window.document() {
            if let Some(html) = doc.document_element() {
                let result = match mode {
                    ThemeMode::Light | ThemeMode::Dark => {
                        html.set_attribute("data-theme", mode.as_str())
                    }
                    ThemeMode::System => html.remove_attribute("data-theme"),
                };
                if result.is_err() {
                    log::warn!("Failed to apply theme '{}'", mode.as_str());
                }
            }
        }
    }
}

pub fn load_mode(store: &dyn KeyValueStore, key: &str) -> ThemeMode {
    match store.get(key) {
        Ok(Some(saved)) => ThemeMode::parse(&saved),
        Ok(None) => ThemeMode::System,
        Err(e) => {
            log::warn!("Failed to load theme preference: {}", e);
            ThemeMode::System
        }
    }
}

/// Wraps its children in the themed container and provides `ThemeContext`.
#[component]
pub fn ThemeProvider(
    /// localStorage key holding the saved mode
    #[prop(into)]
    storage_key: String,
    children: Children,
) -> impl IntoView {
    let initial = match LocalStorage::open() {
        Ok(store) => load_mode(&store, &storage_key),
        Err(e) => {
            log::warn!("{}; theme will not persist", e);
            ThemeMode::System
        }
    };
    let mode = RwSignal::new(initial);
    provide_context(ThemeContext { mode });

    // Apply and persist whenever the mode changes
    Effect::new(move |_| {
        let current = mode.get();
        apply_theme(current);
        if let Ok(store) = LocalStorage::open() {
            if let Err(e) = store.set(&storage_key, current.as_str()) {
                log::warn!("Failed to save theme preference: {}", e);
            }
        }
    });

    view! { <div class="theme-provider">{children()}</div> }
}
