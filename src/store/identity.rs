/// Stable identity of the current caller, supplied by the external
/// identity collaborator.
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub id: String,
    pub email: String,
}

/// Identity collaborator contract. Absence of a user is treated as
/// `Error::AuthRequired` by the lifecycle component.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserIdentity>;
}

/// Fixed identity for the service binary and tests.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    user: Option<UserIdentity>,
}

impl StaticIdentity {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user: Some(UserIdentity {
                id: id.into(),
                email: email.into(),
            }),
        }
    }

    /// Provider with no signed-in user.
    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<UserIdentity> {
        self.user.clone()
    }
}
