//! Error types for returns-cli
//!
//! Failures are split by where they come from: malformed form input
//! (`ValidationError`), the identity provider (`AuthError`), the report
//! delivery collaborator (`DeliveryError`) and the submission state machine
//! (`WorkflowError`). `ReturnsError` wraps all of them for the CLI and TUI.
//! None of these is fatal; every one is turned into a message on screen.

use thiserror::Error;

/// A required field is missing or malformed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter District and Congregation")]
    LocationIncomplete,

    #[error("Sheet Number must be 3 digits (001-999)")]
    SheetNumber,

    #[error("Date is required")]
    DayRequired,

    #[error("Day must be between 1 and 31, got '{0}'")]
    DayOutOfRange(String),

    #[error("Service Type is required")]
    ServiceTypeRequired,

    #[error("{field} must be a whole number, got '{value}'")]
    InvalidCount { field: &'static str, value: String },

    #[error("{field} cannot have more than 6 digits, got '{value}'")]
    CountTooLarge { field: &'static str, value: String },

    #[error("Offerings must be an amount with at most 2 decimal places, got '{0}'")]
    InvalidOfferings(String),

    #[error("Offerings cannot exceed 999999999.99, got '{0}'")]
    OfferingsTooLarge(String),

    #[error("Offerings total for the month is too large to record")]
    OfferingsTotalOverflow,

    #[error("Month must be between 1 and 12, got '{0}'")]
    InvalidMonth(String),

    #[error("Year must be between 2000 and 2100, got '{0}'")]
    InvalidYear(String),

    #[error("Entry is for {entry} but this sheet is for {sheet}")]
    MonthMismatch { entry: String, sheet: String },

    #[error("No entries to submit")]
    EmptyLedger,

    #[error("{0} is required")]
    Required(&'static str),

    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),

    #[error("Quantity must be a whole number of at least 1, got '{0}'")]
    InvalidQuantity(String),

    #[error("Invalid date '{0}', use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Please upload at least one document")]
    NoAttachments,

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("At most {max} files may be attached")]
    TooManyFiles { max: usize },

    #[error("Attachments exceed the {limit_mb} MB limit")]
    AttachmentsTooLarge { limit_mb: u64 },

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Failure reported by the identity provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account already exists for {0}")]
    EmailInUse(String),

    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),

    #[error("Too many attempts, try again later")]
    TooManyAttempts,

    #[error("This account has been disabled")]
    UserDisabled,

    #[error("Could not reach the identity provider: {0}")]
    Network(String),

    #[error("Identity provider error: {0}")]
    Provider(String),

    #[error("User store error: {0}")]
    Storage(String),
}

/// Failure to hand a report to the delivery collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Delivery timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Delivery rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Could not reach delivery endpoint: {0}")]
    Network(String),

    #[error("Failed to write to outbox: {0}")]
    Io(String),

    #[error("Failed to encode report: {0}")]
    Encode(String),
}

impl DeliveryError {
    /// Whether resubmitting the same payload could succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Encode(_))
    }
}

/// The submission state machine refused a transition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("A submission is already in progress")]
    InFlight,

    #[error("No submission is in progress")]
    NotSubmitting,
}

/// The umbrella error type for returns-cli operations
#[derive(Error, Debug)]
pub enum ReturnsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    #[error("Not signed in")]
    NotSignedIn,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("TUI error: {0}")]
    Tui(String),
}

impl ReturnsError {
    /// Create a "not found" error for outbox messages
    pub fn message_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Message",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for ReturnsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ReturnsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for returns-cli operations
pub type ReturnsResult<T> = Result<T, ReturnsError>;
