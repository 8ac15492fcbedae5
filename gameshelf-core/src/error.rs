use thiserror::Error;

/// A field value that violates a catalog or user invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Title is empty after trimming
    #[error("Title is required")]
    BlankTitle,

    /// Release year is later than the configured cutoff
    #[error("Release year {year} is in the future (latest allowed: {max})")]
    YearInFuture { year: u16, max: u16 },

    /// Release year is non-zero but earlier than 1950
    #[error("Release year {0} is too old (must be 0 or at least 1950)")]
    YearTooOld(u16),

    /// Price is negative or not a number
    #[error("Price cannot be negative: {0}")]
    NegativePrice(f64),

    /// Rating is outside 0..=10 or not a number
    #[error("Rating must be between 0 and 10, got {0}")]
    RatingOutOfRange(f64),

    /// User name is empty after trimming
    #[error("User name is required")]
    BlankName,

    /// User name contains a digit
    #[error("User name cannot contain digits: {0}")]
    NameContainsDigits(String),

    /// Email is empty after trimming
    #[error("Email is required")]
    BlankEmail,

    /// Email contains whitespace
    #[error("Email cannot contain spaces: {0}")]
    EmailContainsSpaces(String),

    /// Email does not contain the required domain marker
    #[error("Email must contain '{domain}': {email}")]
    EmailMissingDomain { email: String, domain: &'static str },
}

/// Errors raised by catalog operations beyond plain field validation.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A field failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A media type tag that is neither a Game nor a DLC
    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),
}

impl CatalogError {
    pub fn unsupported_media(kind: impl Into<String>) -> Self {
        Self::UnsupportedMedia(kind.into())
    }
}
