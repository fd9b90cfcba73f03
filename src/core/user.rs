use crate::core::currency::CurrencyCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A registered participant with a reputation score.
///
/// The trust score lives on a 0..=100 scale. Every payment adjusts the
/// sender's score by the fraud verdict's delta; `adjust_trust` is the only
/// mutation path, so the clamp cannot be bypassed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(rename = "name")]
    pub display_name: String,
    pub trust_score: i64,
    #[serde(rename = "currency")]
    pub settlement_currency: CurrencyCode,
}

impl User {
    pub fn new(
        id: impl Into<UserId>,
        display_name: impl Into<String>,
        trust_score: i64,
        settlement_currency: impl Into<CurrencyCode>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            trust_score,
            settlement_currency: settlement_currency.into(),
        }
    }

    /// Apply a trust delta, clamping the result to 0..=100, and return the
    /// new score.
    pub fn adjust_trust(&mut self, delta: i64) -> i64 {
        self.trust_score = (self.trust_score + delta).clamp(0, 100);
        self.trust_score
    }

    /// The three-user roster every process starts from.
    pub fn seed_roster() -> Vec<User> {
        vec![
            User::new("alice", "Alice (Sender)", 85, "BTC"),
            User::new("bob", "Bob (Merchant)", 95, "INR"),
            User::new("charlie", "Charlie (Fraudster)", 40, "USD"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_roster() {
        let roster = User::seed_roster();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].id, UserId::from("alice"));
        assert_eq!(roster[0].trust_score, 85);
        assert_eq!(roster[1].settlement_currency.as_str(), "INR");
        assert_eq!(roster[2].display_name, "Charlie (Fraudster)");
    }

    #[test]
    fn test_adjust_trust_within_range() {
        let mut user = User::new("dave", "Dave", 50, "USD");
        assert_eq!(user.adjust_trust(1), 51);
        assert_eq!(user.adjust_trust(-20), 31);
    }

    #[test]
    fn test_adjust_trust_clamps_at_floor() {
        let mut user = User::new("eve", "Eve", 5, "USD");
        assert_eq!(user.adjust_trust(-20), 0);
        assert_eq!(user.trust_score, 0);
    }

    #[test]
    fn test_adjust_trust_clamps_at_ceiling() {
        let mut user = User::new("frank", "Frank", 100, "INR");
        assert_eq!(user.adjust_trust(1), 100);
    }

    #[test]
    fn test_wire_format_uses_short_names() {
        let user = User::new("alice", "Alice (Sender)", 85, "BTC");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], "alice");
        assert_eq!(json["name"], "Alice (Sender)");
        assert_eq!(json["trust_score"], 85);
        assert_eq!(json["currency"], "BTC");
    }
}
