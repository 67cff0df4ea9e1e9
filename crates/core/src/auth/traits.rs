use super::{AccessError, Capability, User};

/// Decides whether a (possibly anonymous) user holds a capability.
pub trait AccessControl: Send + Sync {
    fn authorize(&self, user: Option<&User>, capability: Capability) -> Result<(), AccessError>;
}
