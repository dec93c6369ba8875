//! Contact form lifecycle and the field validation shared with the relay
//! endpoint.
//!
//! The same rules run in the browser before any network call and again on
//! the server before the collaborator is contacted, so the two sides cannot
//! drift apart.

/// How long a successful send stays on screen before the form resets and the
/// presenting surface closes.
pub const SUCCESS_RESET_DELAY_MS: u32 = 2_000;
/// Shown when the relay fails without a usable error message.
pub const GENERIC_SEND_ERROR: &str = "Something went wrong sending your message.";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Validates the submission triple. Runs before any network call; a failure
/// here must never reach the collaborator.
pub fn validate_fields(name: &str, email: &str, message: &str) -> Result<(), FieldError> {
    if name.trim().is_empty() {
        return Err(FieldError {
            field: Field::Name,
            message: "name is required",
        });
    }

    let email = email.trim();
    if email.is_empty() {
        return Err(FieldError {
            field: Field::Email,
            message: "email is required",
        });
    }
    if !email.contains('@') {
        return Err(FieldError {
            field: Field::Email,
            message: "email must contain '@'",
        });
    }

    if message.trim().is_empty() {
        return Err(FieldError {
            field: Field::Message,
            message: "message is required",
        });
    }

    Ok(())
}

/// Form state as the submit lifecycle sees it.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub submitting: bool,
    pub succeeded: bool,
    pub error: Option<String>,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), FieldError> {
        validate_fields(&self.name, &self.email, &self.message)
    }

    /// Marks the submission in flight. Returns false while a previous
    /// submission is still pending; the caller must not send again.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }

        self.submitting = true;
        self.succeeded = false;
        self.error = None;
        true
    }

    /// Settles the in-flight submission. Failure keeps the typed fields so
    /// the user can resubmit.
    pub fn complete(&mut self, outcome: Result<(), String>) {
        self.submitting = false;
        match outcome {
            Ok(()) => {
                self.succeeded = true;
                self.error = None;
            }
            Err(message) => {
                self.succeeded = false;
                self.error = Some(message);
            }
        }
    }

    /// Back to the empty form, called after the success display delay.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ContactForm {
        ContactForm {
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
            message: "Hello".to_string(),
            ..ContactForm::default()
        }
    }

    #[test]
    fn valid_triple_passes() {
        assert_eq!(validate_fields("Jane", "jane@x.com", "Hello"), Ok(()));
    }

    #[test]
    fn email_without_at_sign_is_rejected_before_any_send() {
        let result = validate_fields("Jane", "not-an-email", "Hello");

        let error = result.expect_err("malformed email must fail locally");
        assert_eq!(error.field, Field::Email);
        assert_eq!(error.message, "email must contain '@'");
    }

    #[test]
    fn blank_fields_are_rejected_in_order() {
        assert_eq!(
            validate_fields("  ", "jane@x.com", "Hello").map_err(|e| e.field),
            Err(Field::Name)
        );
        assert_eq!(
            validate_fields("Jane", "   ", "Hello").map_err(|e| e.field),
            Err(Field::Email)
        );
        assert_eq!(
            validate_fields("Jane", "jane@x.com", "").map_err(|e| e.field),
            Err(Field::Message)
        );
    }

    #[test]
    fn begin_submit_rejects_concurrent_submission() {
        let mut form = filled_form();

        assert!(form.begin_submit());
        assert!(!form.begin_submit(), "resubmission must be inert in flight");
        assert!(form.submitting);
    }

    #[test]
    fn successful_send_marks_succeeded_and_reset_clears_fields() {
        let mut form = filled_form();
        assert!(form.begin_submit());

        form.complete(Ok(()));

        assert!(form.succeeded);
        assert_eq!(form.error, None);
        assert!(!form.submitting);

        form.reset();
        assert_eq!(form.name, "");
        assert_eq!(form.email, "");
        assert_eq!(form.message, "");
        assert!(!form.succeeded);
    }

    #[test]
    fn failed_send_surfaces_error_and_keeps_fields() {
        let mut form = filled_form();
        assert!(form.begin_submit());

        form.complete(Err("boom".to_string()));

        assert_eq!(form.error.as_deref(), Some("boom"));
        assert!(!form.succeeded);
        assert_eq!(form.name, "Jane");
        assert_eq!(form.email, "jane@x.com");
        assert_eq!(form.message, "Hello");
        assert!(!form.submitting, "failure re-enables the submit control");
    }

    #[test]
    fn retry_after_failure_clears_stale_error() {
        let mut form = filled_form();
        assert!(form.begin_submit());
        form.complete(Err("boom".to_string()));

        assert!(form.begin_submit());

        assert_eq!(form.error, None);
    }
}
