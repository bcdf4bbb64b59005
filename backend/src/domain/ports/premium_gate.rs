//! Driving port for the premium predicate.

use async_trait::async_trait;

use crate::domain::{Error, UserId};

/// Domain use-case port answering "does this user have premium?".
///
/// Consulted by the routine deriver service and by HTTP handlers deciding
/// whether premium-only content is visible. Results reflect the
/// subscription store at read time; callers must tolerate eventual
/// consistency with subscription changes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PremiumGate: Send + Sync {
    /// Whether the user currently holds a premium-granting subscription.
    async fn is_premium_user(&self, user_id: &UserId) -> Result<bool, Error>;
}

/// Fixture gate with a fixed answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePremiumGate {
    /// The answer returned for every user.
    pub is_premium: bool,
}

impl FixturePremiumGate {
    /// A gate that reports every user as premium.
    pub fn premium() -> Self {
        Self { is_premium: true }
    }

    /// A gate that reports every user as free.
    pub fn free() -> Self {
        Self { is_premium: false }
    }
}

#[async_trait]
impl PremiumGate for FixturePremiumGate {
    async fn is_premium_user(&self, _user_id: &UserId) -> Result<bool, Error> {
        Ok(self.is_premium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_gate_reports_its_configured_answer() {
        let user_id = UserId::random();

        let premium = FixturePremiumGate::premium()
            .is_premium_user(&user_id)
            .await
            .expect("fixture gate should succeed");
        assert!(premium);

        let free = FixturePremiumGate::free()
            .is_premium_user(&user_id)
            .await
            .expect("fixture gate should succeed");
        assert!(!free);
    }
}
