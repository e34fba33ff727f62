use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Collapse a list of field-level messages into a single validation error.
    ///
    /// Returns `Ok(())` when the list is empty.
    pub fn from_messages(messages: Vec<String>) -> Result<(), CoreError> {
        if messages.is_empty() {
            return Ok(());
        }
        Err(CoreError::Validation(messages.join("; ")))
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect_messages(&errors, "", &mut messages);
        messages.sort();
        CoreError::Validation(messages.join("; "))
    }
}

/// Flatten nested `validator` errors into human-readable messages.
fn collect_messages(errors: &validator::ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                for e in errs {
                    match &e.message {
                        Some(msg) => out.push(msg.to_string()),
                        None => out.push(format!("{path} is invalid")),
                    }
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    collect_messages(inner, &format!("{path}[{idx}]"), out);
                }
            }
        }
    }
}
