//! Toast severity type.

use serde::{Deserialize, Serialize};

/// Visual severity of a toast notification.
///
/// Only `"success"` and `"error"` are recognised; every other value falls
/// back to [`ToastKind::Info`]. An absent value means success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    #[default]
    Success,
    Error,
    Info,
}

impl ToastKind {
    /// Resolve an optional severity string.
    ///
    /// ```
    /// use shopfront_core::ToastKind;
    ///
    /// assert_eq!(ToastKind::from_type(None), ToastKind::Success);
    /// assert_eq!(ToastKind::from_type(Some("error")), ToastKind::Error);
    /// assert_eq!(ToastKind::from_type(Some("warning")), ToastKind::Info);
    /// ```
    #[must_use]
    pub fn from_type(kind: Option<&str>) -> Self {
        match kind {
            None | Some("success") => Self::Success,
            Some("error") => Self::Error,
            Some(_) => Self::Info,
        }
    }

    /// Resolve a server flash category.
    ///
    /// Flash categories use `danger` for failures, which maps to
    /// [`ToastKind::Error`] alongside `error`.
    #[must_use]
    pub fn from_flash_category(category: &str) -> Self {
        match category {
            "success" => Self::Success,
            "danger" | "error" => Self::Error,
            _ => Self::Info,
        }
    }

    /// Background utility class for this severity.
    #[must_use]
    pub const fn background_class(self) -> &'static str {
        match self {
            Self::Success => "bg-green-500",
            Self::Error => "bg-red-500",
            Self::Info => "bg-blue-500",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for ToastKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_type_defaults_to_success() {
        assert_eq!(ToastKind::from_type(None), ToastKind::Success);
        assert_eq!(ToastKind::from_type(Some("success")), ToastKind::Success);
    }

    #[test]
    fn test_from_type_unknown_is_info() {
        assert_eq!(ToastKind::from_type(Some("info")), ToastKind::Info);
        assert_eq!(ToastKind::from_type(Some("danger")), ToastKind::Info);
        assert_eq!(ToastKind::from_type(Some("")), ToastKind::Info);
        assert_eq!(ToastKind::from_type(Some("ERROR")), ToastKind::Info);
    }

    #[test]
    fn test_from_flash_category() {
        assert_eq!(ToastKind::from_flash_category("success"), ToastKind::Success);
        assert_eq!(ToastKind::from_flash_category("danger"), ToastKind::Error);
        assert_eq!(ToastKind::from_flash_category("error"), ToastKind::Error);
        assert_eq!(ToastKind::from_flash_category("warning"), ToastKind::Info);
    }

    #[test]
    fn test_background_classes() {
        assert_eq!(ToastKind::Success.background_class(), "bg-green-500");
        assert_eq!(ToastKind::Error.background_class(), "bg-red-500");
        assert_eq!(ToastKind::Info.background_class(), "bg-blue-500");
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&ToastKind::Error).unwrap_or_default();
        assert_eq!(json, "\"error\"");
    }
}
