use shared_types::AppError;

/// Convert a TOML parse failure into an AppError, keeping the line and
/// column when the parser reports a span.
pub fn toml_to_app_error(contents: &str, err: toml::de::Error) -> AppError {
    let message = err.message().to_string();
    match err.span() {
        Some(span) => {
            let before = &contents[..span.start.min(contents.len())];
            let line = before.matches('\n').count() + 1;
            let column = before.rsplit('\n').next().map_or(0, str::len) + 1;
            AppError::bad_request(format!(
                "Failed to parse config at line {line}, column {column}: {message}"
            ))
        }
        None => AppError::bad_request(format!("Failed to parse config: {message}")),
    }
}

/// Trait for validating request DTOs and config sections before use.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
