use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocketError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Store(String),

    /// A persisted blob exists but cannot be read back as the expected shape.
    #[error("Stored data under '{key}' is corrupt: {message}")]
    StorageCorrupt { key: String, message: String },

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("An order numbered '{0}' already exists")]
    DuplicateOrder(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, DocketError>;
