use crate::error::Result;

/// Key of the blob holding saved template overrides (object: key → definition).
pub const TEMPLATES_KEY: &str = "savedTemplates";

/// Key of the blob holding placed orders (array, seed excluded).
pub const ORDERS_KEY: &str = "orders";

/// Abstract interface for keyed blob storage.
///
/// A backend only moves strings in and out. The stores on top decide what
/// the strings mean and how to survive when they do not parse.
pub trait StorageBackend {
    /// Read the blob stored under `key`.
    /// Returns Ok(None) if nothing was ever written there.
    /// Returns Err only when storage itself fails.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob under `key`.
    /// MUST be atomic: a reader sees the old blob or the new one, never a mix.
    fn write(&self, key: &str, content: &str) -> Result<()>;

    /// Human-readable location of `key`, for diagnostics.
    fn location(&self, key: &str) -> String;
}
