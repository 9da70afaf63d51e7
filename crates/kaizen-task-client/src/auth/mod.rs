/*
[INPUT]:  Bearer token and owner identity from the session collaborator
[OUTPUT]: Credential values read fresh at call time
[POS]:    Auth layer - narrow credential capability for the coordinator
[UPDATE]: When the session collaborator contract changes
*/

/// Bearer credential plus the owner identity it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub owner_email: String,
}

/// Capability interface for reading the current credential.
///
/// Implementations must read fresh state on every call; the components
/// consuming this trait never cache credential material.
pub trait CredentialSource: Send + Sync {
    fn current(&self) -> Option<Credential>;
}

/// Fixed in-memory credentials, for tests and one-shot CLI runs
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credential: Credential,
}

impl StaticCredentials {
    pub fn new(token: impl Into<String>, owner_email: impl Into<String>) -> Self {
        Self {
            credential: Credential {
                token: token.into(),
                owner_email: owner_email.into().to_lowercase(),
            },
        }
    }
}

impl CredentialSource for StaticCredentials {
    fn current(&self) -> Option<Credential> {
        Some(self.credential.clone())
    }
}
