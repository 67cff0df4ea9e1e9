//! Validation of registration requests.

use serde::{Deserialize, Serialize};

use crate::catalogue::FieldError;

/// Minimum pseudo length, in characters.
pub const MIN_PSEUDO_LENGTH: usize = 2;
/// Maximum pseudo length, in characters.
pub const MAX_PSEUDO_LENGTH: usize = 50;
/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 3;

/// Body of `POST /api/register`.
///
/// Missing fields deserialize as empty strings so validation reports them
/// alongside every other violation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub pseudo: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Reports every rule the registration request violates.
pub fn validate_registration(request: &RegisterRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let pseudo = request.pseudo.trim();
    let pseudo_len = pseudo.chars().count();
    if pseudo.is_empty() {
        errors.push(FieldError::new("pseudo", "Pseudo is required."));
    } else if pseudo_len < MIN_PSEUDO_LENGTH {
        errors.push(FieldError::new(
            "pseudo",
            format!("Pseudo must be at least {MIN_PSEUDO_LENGTH} characters long."),
        ));
    } else if pseudo_len > MAX_PSEUDO_LENGTH {
        errors.push(FieldError::new(
            "pseudo",
            format!("Pseudo cannot be longer than {MAX_PSEUDO_LENGTH} characters."),
        ));
    }

    let email = request.email.trim();
    if email.is_empty() {
        errors.push(FieldError::new("email", "Email is required."));
    } else if !is_valid_email(email) {
        errors.push(FieldError::new("email", "Email must be a valid address."));
    }

    if request.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required."));
    } else if request.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters long."),
        ));
    }

    errors
}

/// Structural email check: `local@domain.tld`, no whitespace, one `@`.
///
/// # Examples
///
/// ```
/// use catalogue_core::auth::is_valid_email;
///
/// assert!(is_valid_email("splint@test.fr"));
/// assert!(!is_valid_email("splint@localhost"));
/// assert!(!is_valid_email("not an email"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty() && !name.starts_with('.'),
        None => false,
    }
}
