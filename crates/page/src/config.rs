//! Page behavior configuration.
//!
//! Every field has a default matching the storefront templates, so
//! `PageConfig::default()` is enough for the stock markup. Overrides come from
//! JSON (for example a `<script type="application/json">` block shipped with
//! the page) or from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPFRONT_TOAST_DURATION_MS` - Toast lifetime in milliseconds (default: 3000)
//! - `SHOPFRONT_ALERT_MESSAGE` - Alert shown when required fields are empty
//! - `SHOPFRONT_ERROR_CLASS` - Class added to empty required fields (default: border-red-500)
//! - `SHOPFRONT_SEARCH_INPUT_ID` - Id of the product search box (default: search-input)

use serde::{Deserialize, Serialize};
use shopfront_core::DEFAULT_ERROR_CLASS;
use thiserror::Error;

use crate::dom::Selector;

const DEFAULT_TOAST_DURATION_MS: u64 = 3000;
const DEFAULT_ALERT_MESSAGE: &str = "Please fill in all required fields.";
const DEFAULT_TOAST_CLASSES: &str = "fixed top-4 right-4 px-6 py-3 rounded-lg shadow-lg text-white";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid configuration JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Page behavior configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Class names and selectors the page templates provide
    pub markup: MarkupConfig,
    /// Required-field validation settings
    pub validation: ValidationConfig,
    /// Toast notification settings
    pub toast: ToastConfig,
}

/// The markup contract between the page templates and the behaviors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Class of both stepper buttons
    pub quantity_button_class: String,
    /// Extra class that marks the decrease button
    pub decrease_class: String,
    /// Class of the numeric input next to the steppers
    pub quantity_input_class: String,
    /// Selector for in-page anchors
    pub anchor_selector: String,
    /// Attribute that marks a form field as required
    pub required_attribute: String,
    /// Id of the product search box
    pub search_input_id: String,
    /// Class of a product card
    pub product_card_class: String,
    /// Selector for the title inside a product card
    pub card_title_selector: String,
    /// Attribute carrying the category of a server flash message
    pub flash_attribute: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            quantity_button_class: "quantity-btn".to_string(),
            decrease_class: "decrease".to_string(),
            quantity_input_class: "quantity-input".to_string(),
            anchor_selector: "a[href^=\"#\"]".to_string(),
            required_attribute: "required".to_string(),
            search_input_id: "search-input".to_string(),
            product_card_class: "product-card".to_string(),
            card_title_selector: "h3".to_string(),
            flash_attribute: "data-flash".to_string(),
        }
    }
}

/// Required-field validation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Class added to empty required fields
    pub error_class: String,
    /// Message of the alert shown when submission is blocked
    pub alert_message: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            error_class: DEFAULT_ERROR_CLASS.to_string(),
            alert_message: DEFAULT_ALERT_MESSAGE.to_string(),
        }
    }
}

/// Toast notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    /// Milliseconds between creation and removal
    pub duration_ms: u64,
    /// Classes shared by every toast (position and shape)
    pub container_classes: String,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_TOAST_DURATION_MS,
            container_classes: DEFAULT_TOAST_CLASSES.to_string(),
        }
    }
}

impl PageConfig {
    /// Parse configuration from JSON; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the JSON is malformed or a value fails
    /// validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration overrides from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or a value fails
    /// validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup on top of the defaults.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("SHOPFRONT_TOAST_DURATION_MS") {
            config.toast.duration_ms = raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPFRONT_TOAST_DURATION_MS".to_string(), e.to_string())
            })?;
        }
        if let Some(message) = lookup("SHOPFRONT_ALERT_MESSAGE") {
            config.validation.alert_message = message;
        }
        if let Some(class) = lookup("SHOPFRONT_ERROR_CLASS") {
            config.validation.error_class = class;
        }
        if let Some(id) = lookup("SHOPFRONT_SEARCH_INPUT_ID") {
            config.markup.search_input_id = id;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that every value can be used to build selectors and classes.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.toast.duration_ms == 0 {
            return Err(invalid("toast.duration_ms", "must be greater than zero"));
        }

        let markup = &self.markup;
        for (field, value) in [
            ("markup.quantity_button_class", &markup.quantity_button_class),
            ("markup.decrease_class", &markup.decrease_class),
            ("markup.quantity_input_class", &markup.quantity_input_class),
            ("markup.product_card_class", &markup.product_card_class),
            ("markup.search_input_id", &markup.search_input_id),
            ("markup.required_attribute", &markup.required_attribute),
            ("markup.flash_attribute", &markup.flash_attribute),
        ] {
            validate_identifier(field, value)?;
        }

        for (field, value) in [
            ("markup.anchor_selector", &markup.anchor_selector),
            ("markup.card_title_selector", &markup.card_title_selector),
        ] {
            Selector::parse(value).map_err(|e| invalid(field, &e.to_string()))?;
        }

        validate_class_list("validation.error_class", &self.validation.error_class, false)?;
        validate_class_list("toast.container_classes", &self.toast.container_classes, true)?;
        Ok(())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Names spliced into selectors must be plain CSS identifiers.
fn validate_identifier(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(invalid(field, "cannot be empty"));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(invalid(
            field,
            "may only contain ASCII letters, digits, '-' and '_'",
        ));
    }
    Ok(())
}

/// Class values are a single class, or a space-separated list when `multiple`.
fn validate_class_list(field: &str, value: &str, multiple: bool) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(invalid(field, "cannot be empty"));
    }
    if !multiple && value.chars().any(char::is_whitespace) {
        return Err(invalid(field, "must be a single class name"));
    }
    Ok(())
}
