use thiserror::Error;

/// Exit code for configuration, CLI and file IO problems.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for payloads with the wrong top-level shape.
pub const EXIT_VALIDATION: u8 = 3;
/// Exit code for fetch/transport failures.
pub const EXIT_FETCH: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// The statistics payload does not have the expected top-level shape.
///
/// Field-level problems never produce this error; they are recovered during
/// normalization and reported as [`ParseWarning`]s instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("statistics payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("statistics payload has none of the required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::new(EXIT_VALIDATION, format!("Invalid statistics payload: {err}"))
    }
}

/// A field that failed to parse and was replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// Dotted path of the offending field, e.g. `topSellingBooks[3].quantity`.
    pub field: String,
    /// The raw value as it appeared in the payload.
    pub raw: String,
    pub reason: String,
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} (raw: {})", self.field, self.reason, self.raw)
    }
}
