use super::{AccessControl, AccessError, Capability, User};

/// Role-based rules: any signed-in user reads, admins write.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleAccessControl;

impl AccessControl for RoleAccessControl {
    fn authorize(&self, user: Option<&User>, capability: Capability) -> Result<(), AccessError> {
        let user = user.ok_or(AccessError::Unauthenticated)?;

        match capability {
            Capability::ReadCatalogue => Ok(()),
            Capability::WriteCatalogue if user.roles.iter().any(|r| r.can_write()) => Ok(()),
            Capability::WriteCatalogue => Err(AccessError::Forbidden),
        }
    }
}
