use thiserror::Error;

/// Catalog failures.
///
/// The `Display` text of the first three variants is shown to the user as is;
/// persistence failures are not.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Please provide a link starting with 'http(s)://'.")]
    InvalidInput { url: String },

    #[error("Unknown category '{name}'.")]
    UnknownCategory { name: String },

    #[error("Resource already exists.")]
    DuplicateResource { url: String, category: String },

    #[error("Catalog persistence failure: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl CatalogError {
    /// True when the caller sent something wrong, as opposed to the store failing
    pub fn is_user_error(&self) -> bool {
        !matches!(self, CatalogError::Persistence(_))
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
