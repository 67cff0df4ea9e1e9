use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque bearer credential identifying a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Roles granted to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "ROLE_USER",
            Self::Admin => "ROLE_ADMIN",
        }
    }

    /// Parses the wire name of a role.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ROLE_USER" => Some(Self::User),
            "ROLE_ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Whether this role may modify the catalogue.
    pub fn can_write(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a request wants to do with the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ReadCatalogue,
    WriteCatalogue,
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub pseudo: String,
    pub email: String,
    pub roles: Vec<Role>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[serde(skip_serializing, default = "empty_token")]
    pub api_token: ApiToken,
    pub created_at: DateTime<Utc>,
}

fn empty_token() -> ApiToken {
    ApiToken::new(String::new())
}

impl User {
    /// Creates a user with a fresh id. `ROLE_USER` is always granted.
    pub fn new(
        pseudo: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        api_token: ApiToken,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            pseudo: pseudo.into(),
            email: email.into(),
            roles: vec![Role::User],
            password_hash: password_hash.into(),
            api_token,
            created_at: Utc::now(),
        }
    }

    /// Grants an additional role.
    pub fn with_role(mut self, role: Role) -> Self {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}
