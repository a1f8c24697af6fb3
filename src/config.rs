use std::str::FromStr;

use crate::error::AppError;

pub const DEFAULT_MOUNT_ID: &str = "root";

const OVERRIDE_ATTRS: [&str; 3] = ["data-storage-key", "data-theme-key", "data-log-level"];

/// Runtime settings. Defaults can be overridden from `data-*` attributes on
/// the mount element, e.g. `<div id="root" data-log-level="debug">`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mount_id: String,
    pub todos_key: String,
    pub theme_key: String,
    pub log_level: log::Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mount_id: DEFAULT_MOUNT_ID.to_string(),
            todos_key: "todos".to_string(),
            theme_key: "theme".to_string(),
            log_level: log::Level::Info,
        }
    }
}

impl AppConfig {
    /// Defaults plus whatever the mount element declares. A missing mount
    /// element is not an error here; `mount` reports it. Bad attributes are
    /// skipped and returned so they can be logged once logging is up.
    pub fn from_document() -> (Self, Vec<AppError>) {
        let mut config = Self::default();
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&config.mount_id));

        let attrs: Vec<(&str, String)> = match element {
            Some(element) => OVERRIDE_ATTRS
                .iter()
                .filter_map(|&name| element.get_attribute(name).map(|value| (name, value)))
                .collect(),
            None => Vec::new(),
        };
        let errors = config.apply_overrides(attrs);
        (config, errors)
    }

    /// Apply each attribute independently; one bad value does not discard
    /// the others.
    pub fn apply_overrides<'a>(
        &mut self,
        attrs: impl IntoIterator<Item = (&'a str, String)>,
    ) -> Vec<AppError> {
        attrs
            .into_iter()
            .filter_map(|(name, value)| self.apply_override(name, &value).err())
            .collect()
    }

    pub fn apply_override(&mut self, name: &str, value: &str) -> Result<(), AppError> {
        let value = value.trim();
        match name {
            "data-storage-key" | "data-theme-key" if value.is_empty() => {
                return Err(AppError::InvalidConfig(format!("{} cannot be empty", name)));
            }
            "data-storage-key" => self.todos_key = value.to_string(),
            "data-theme-key" => self.theme_key = value.to_string(),
            "data-log-level" => {
                self.log_level = log::Level::from_str(value).map_err(|_| {
                    AppError::InvalidConfig(format!("Unknown log level '{}'", value))
                })?;
            }
            _ => {}
        }
        Ok(())
    }
}
