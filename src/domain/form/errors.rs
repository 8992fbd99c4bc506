//! Form-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, RequestId, ValidationError};

use super::{FormField, Screen};

/// Errors raised by [`FormSession`](super::FormSession) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The operation is not available on the current screen.
    WrongScreen { expected: Screen, actual: Screen },
    /// Required fields on the current step failed validation.
    IncompleteStep { step: u8, fields: Vec<FormField> },
    /// There is no step in the requested direction.
    NoSuchStep(u8),
    /// Cancel is only offered on the first step.
    CancelNotAllowed(u8),
    /// A field received input it could not parse.
    InvalidInput(ValidationError),
    /// A request is already waiting for its result.
    RequestInFlight(RequestId),
    /// The result belongs to a request that is no longer current.
    StaleResponse(RequestId),
    /// Shadow toggle requested on a result that has no shadow profile.
    NoShadowProfile,
}

impl FormError {
    pub fn wrong_screen(expected: Screen, actual: Screen) -> Self {
        FormError::WrongScreen { expected, actual }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            FormError::WrongScreen { .. } => ErrorCode::InvalidStateTransition,
            FormError::IncompleteStep { .. } => ErrorCode::ValidationFailed,
            FormError::NoSuchStep(_) => ErrorCode::InvalidStateTransition,
            FormError::CancelNotAllowed(_) => ErrorCode::InvalidStateTransition,
            FormError::InvalidInput(_) => ErrorCode::InvalidFormat,
            FormError::RequestInFlight(_) => ErrorCode::RequestInFlight,
            FormError::StaleResponse(_) => ErrorCode::StaleResponse,
            FormError::NoShadowProfile => ErrorCode::InvalidStateTransition,
        }
    }

    pub fn message(&self) -> String {
        match self {
            FormError::WrongScreen { expected, actual } => {
                format!("Expected the {} screen but the session is on {}", expected, actual)
            }
            FormError::IncompleteStep { step, fields } => {
                let names: Vec<&str> = fields.iter().map(|f| f.label()).collect();
                format!("Step {} is incomplete: {}", step, names.join(", "))
            }
            FormError::NoSuchStep(step) => format!("There is no step {}", step),
            FormError::CancelNotAllowed(step) => {
                format!("Cancel is only available on step 1 (currently on step {})", step)
            }
            FormError::InvalidInput(err) => err.to_string(),
            FormError::RequestInFlight(id) => format!("Request {} is still pending", id),
            FormError::StaleResponse(id) => format!("Discarding response for stale request {}", id),
            FormError::NoShadowProfile => "This reading has no shadow profile".to_string(),
        }
    }
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for FormError {}

impl From<ValidationError> for FormError {
    fn from(err: ValidationError) -> Self {
        FormError::InvalidInput(err)
    }
}

impl From<FormError> for DomainError {
    fn from(err: FormError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_step_lists_field_labels() {
        let err = FormError::IncompleteStep {
            step: 1,
            fields: vec![FormField::Name, FormField::EyeColor],
        };
        assert_eq!(err.to_string(), "Step 1 is incomplete: Name, Eye Color");
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[test]
    fn stale_response_maps_to_its_code() {
        let err = FormError::StaleResponse(RequestId::new());
        assert_eq!(DomainError::from(err).code, ErrorCode::StaleResponse);
    }
}
