//! Subscription records and the premium predicate.
//!
//! Premium is derived, never stored: callers ask [`Subscription::grants_premium`]
//! (or the `PremiumGate` port) at the moment they need the answer and must
//! tolerate eventual consistency with subscription changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Paid tier of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    /// Baseline tier; no premium derivation rules.
    #[default]
    Free,
    /// Individual paid tier.
    Premium,
    /// Practitioner tier; a superset of premium.
    Professional,
}

impl SubscriptionTier {
    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Premium => "premium",
            Self::Professional => "professional",
        }
    }

    /// Whether this tier unlocks premium features at all.
    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Premium | Self::Professional)
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown tier string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSubscriptionTierError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for ParseSubscriptionTierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown subscription tier: {}", self.input)
    }
}

impl std::error::Error for ParseSubscriptionTierError {}

impl std::str::FromStr for SubscriptionTier {
    type Err = ParseSubscriptionTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "premium" => Ok(Self::Premium),
            "professional" => Ok(Self::Professional),
            _ => Err(ParseSubscriptionTierError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Lifecycle state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Billing is current.
    Active,
    /// Lapsed without explicit cancellation.
    #[default]
    Inactive,
    /// Cancelled by the user.
    Canceled,
    /// Introductory trial period.
    Trial,
}

impl SubscriptionStatus {
    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Canceled => "canceled",
            Self::Trial => "trial",
        }
    }

    /// Whether the subscription is currently in force.
    ///
    /// Trial counts: the application issues trial subscriptions on
    /// registration and gates nothing further on them.
    pub fn is_in_force(&self) -> bool {
        matches!(self, Self::Active | Self::Trial)
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSubscriptionStatusError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for ParseSubscriptionStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown subscription status: {}", self.input)
    }
}

impl std::error::Error for ParseSubscriptionStatusError {}

impl std::str::FromStr for SubscriptionStatus {
    type Err = ParseSubscriptionStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "canceled" => Ok(Self::Canceled),
            "trial" => Ok(Self::Trial),
            _ => Err(ParseSubscriptionStatusError {
                input: s.to_owned(),
            }),
        }
    }
}

/// One user's subscription record.
///
/// # Examples
///
/// ```
/// # use backend::domain::{Subscription, SubscriptionStatus, SubscriptionTier, UserId};
/// # use chrono::Utc;
/// let sub = Subscription {
///     user_id: UserId::random(),
///     tier: SubscriptionTier::Premium,
///     status: SubscriptionStatus::Active,
///     expires_at: None,
///     updated_at: Utc::now(),
/// };
///
/// assert!(sub.grants_premium(Utc::now()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Subscription {
    /// The user this subscription belongs to.
    pub user_id: UserId,
    /// Paid tier.
    pub tier: SubscriptionTier,
    /// Lifecycle state.
    pub status: SubscriptionStatus,
    /// Optional expiry; `None` means no fixed end.
    pub expires_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// Default free subscription for a user with no stored record.
    pub fn free(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            tier: SubscriptionTier::Free,
            status: SubscriptionStatus::Inactive,
            expires_at: None,
            updated_at: now,
        }
    }

    /// Whether this subscription unlocks premium features at `now`.
    ///
    /// True iff the tier is paid, the status is in force, and the record has
    /// not expired. Canceled and inactive subscriptions never grant premium,
    /// even before their expiry date.
    pub fn grants_premium(&self, now: DateTime<Utc>) -> bool {
        self.tier.is_paid()
            && self.status.is_in_force()
            && self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    fn subscription(
        tier: SubscriptionTier,
        status: SubscriptionStatus,
        expires_in: Option<Duration>,
    ) -> Subscription {
        let now = Utc::now();
        Subscription {
            user_id: UserId::random(),
            tier,
            status,
            expires_at: expires_in.map(|offset| now + offset),
            updated_at: now,
        }
    }

    #[rstest]
    #[case::active_premium(SubscriptionTier::Premium, SubscriptionStatus::Active, None, true)]
    #[case::trial_premium(SubscriptionTier::Premium, SubscriptionStatus::Trial, None, true)]
    #[case::active_professional(
        SubscriptionTier::Professional,
        SubscriptionStatus::Active,
        None,
        true
    )]
    #[case::active_free(SubscriptionTier::Free, SubscriptionStatus::Active, None, false)]
    #[case::canceled_premium(SubscriptionTier::Premium, SubscriptionStatus::Canceled, None, false)]
    #[case::inactive_premium(SubscriptionTier::Premium, SubscriptionStatus::Inactive, None, false)]
    fn premium_truth_table(
        #[case] tier: SubscriptionTier,
        #[case] status: SubscriptionStatus,
        #[case] expires_in: Option<Duration>,
        #[case] expected: bool,
    ) {
        let sub = subscription(tier, status, expires_in);
        assert_eq!(sub.grants_premium(Utc::now()), expected);
    }

    #[rstest]
    fn expired_subscription_never_grants_premium() {
        let sub = subscription(
            SubscriptionTier::Premium,
            SubscriptionStatus::Active,
            Some(Duration::days(-1)),
        );
        assert!(!sub.grants_premium(Utc::now()));
    }

    #[rstest]
    fn future_expiry_still_grants_premium() {
        let sub = subscription(
            SubscriptionTier::Premium,
            SubscriptionStatus::Active,
            Some(Duration::days(30)),
        );
        assert!(sub.grants_premium(Utc::now()));
    }

    #[rstest]
    fn free_default_grants_nothing() {
        let sub = Subscription::free(UserId::random(), Utc::now());
        assert!(!sub.grants_premium(Utc::now()));
        assert_eq!(sub.tier, SubscriptionTier::Free);
    }

    #[rstest]
    fn tier_round_trips_through_strings() {
        for tier in [
            SubscriptionTier::Free,
            SubscriptionTier::Premium,
            SubscriptionTier::Professional,
        ] {
            let parsed: SubscriptionTier = tier.as_str().parse().expect("round-trip");
            assert_eq!(parsed, tier);
        }
    }
}
