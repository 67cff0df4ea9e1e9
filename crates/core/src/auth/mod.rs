mod access;
mod error;
mod functions;
mod traits;
mod types;
mod validation;

pub use access::RoleAccessControl;
pub use error::AccessError;
pub use functions::{generate_api_token, parse_bearer, API_TOKEN_LENGTH};
pub use traits::AccessControl;
pub use types::{ApiToken, Capability, Role, User};
pub use validation::{
    is_valid_email, validate_registration, RegisterRequest, MAX_PSEUDO_LENGTH,
    MIN_PASSWORD_LENGTH, MIN_PSEUDO_LENGTH,
};
