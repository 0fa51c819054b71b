//! Shared serde helper functions used by the configuration types.

/// Serde default function that returns `true`.
pub fn default_true() -> bool {
    true
}
