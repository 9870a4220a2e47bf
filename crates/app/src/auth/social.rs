//! Social identity verification

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

/// Identity asserted by a social provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialIdentity {
    pub provider_id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum SocialLoginError {
    #[error("social provider token was rejected")]
    Rejected,
}

#[automock]
#[async_trait]
pub trait SocialIdentityVerifier: Send + Sync {
    /// Exchange a provider token for the identity it asserts.
    async fn verify(&self, provider: &str, token: &str)
    -> Result<SocialIdentity, SocialLoginError>;
}

/// Accepts any non-empty provider token and returns the same identity.
///
/// Stands in until a real provider integration exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubSocialIdentityVerifier;

#[async_trait]
impl SocialIdentityVerifier for StubSocialIdentityVerifier {
    async fn verify(
        &self,
        provider: &str,
        token: &str,
    ) -> Result<SocialIdentity, SocialLoginError> {
        if provider.trim().is_empty() || token.trim().is_empty() {
            return Err(SocialLoginError::Rejected);
        }

        Ok(SocialIdentity {
            provider_id: "123".to_string(),
            email: "user@example.com".to_string(),
            name: "Social User".to_string(),
        })
    }
}
