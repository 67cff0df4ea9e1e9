use thiserror::Error;

/// Why a request was refused by access control.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("insufficient role")]
    Forbidden,
}
