use tellerdesk_auth::Identity;

/// Session context for a request (the verified account holder).
///
/// Inserted by the auth middleware; present on every protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    identity: Identity,
}

impl SessionContext {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}
