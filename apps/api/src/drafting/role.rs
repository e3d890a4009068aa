//! Role resolution: maps the client's role label from the form to the key
//! that selects a clause's instruction variant.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const RECEIVING_PARTY: &str = "Receiving Party";
pub const DISCLOSING_PARTY: &str = "Disclosing Party";
pub const BILATERAL: &str = "Both (Bilateral)";

/// Internal key selecting one variant of a role-conditioned clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKey {
    Disclosing,
    Receiving,
    Mutual,
}

impl RoleKey {
    pub const ALL: [RoleKey; 3] = [RoleKey::Disclosing, RoleKey::Receiving, RoleKey::Mutual];

    /// Resolves a role label. Anything that is not one of the two unilateral
    /// labels resolves to `Mutual`, including labels the form never offers.
    pub fn resolve(label: &str) -> Self {
        match label {
            RECEIVING_PARTY => RoleKey::Receiving,
            DISCLOSING_PARTY => RoleKey::Disclosing,
            BILATERAL => RoleKey::Mutual,
            other => {
                warn!("Unrecognized party role {other:?}, falling back to mutual instructions");
                RoleKey::Mutual
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleKey::Disclosing => "disclosing",
            RoleKey::Receiving => "receiving",
            RoleKey::Mutual => "mutual",
        }
    }
}

impl fmt::Display for RoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the confidentiality obligations run one way or both ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NatureOfObligations {
    Unilateral,
    Bilateral,
}

impl NatureOfObligations {
    /// Derived from the label itself, not the resolved key: an unrecognized
    /// label compiles mutual clauses but is still reported as `Unilateral`.
    pub fn from_role_label(label: &str) -> Self {
        if label == BILATERAL {
            NatureOfObligations::Bilateral
        } else {
            NatureOfObligations::Unilateral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NatureOfObligations::Unilateral => "Unilateral",
            NatureOfObligations::Bilateral => "Bilateral",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_the_three_form_labels() {
        assert_eq!(RoleKey::resolve("Receiving Party"), RoleKey::Receiving);
        assert_eq!(RoleKey::resolve("Disclosing Party"), RoleKey::Disclosing);
        assert_eq!(RoleKey::resolve("Both (Bilateral)"), RoleKey::Mutual);
    }

    #[test]
    fn test_unknown_label_falls_back_to_mutual() {
        assert_eq!(RoleKey::resolve("Licensor"), RoleKey::Mutual);
        assert_eq!(RoleKey::resolve(""), RoleKey::Mutual);
        // Matching is exact, not case-insensitive
        assert_eq!(RoleKey::resolve("receiving party"), RoleKey::Mutual);
    }

    #[test]
    fn test_nature_is_bilateral_only_for_bilateral_label() {
        assert_eq!(
            NatureOfObligations::from_role_label(BILATERAL),
            NatureOfObligations::Bilateral
        );
        assert_eq!(
            NatureOfObligations::from_role_label(RECEIVING_PARTY),
            NatureOfObligations::Unilateral
        );
        assert_eq!(
            NatureOfObligations::from_role_label(DISCLOSING_PARTY),
            NatureOfObligations::Unilateral
        );
    }

    #[test]
    fn test_unknown_label_is_unilateral_even_though_key_is_mutual() {
        assert_eq!(RoleKey::resolve("Partner"), RoleKey::Mutual);
        assert_eq!(
            NatureOfObligations::from_role_label("Partner"),
            NatureOfObligations::Unilateral
        );
    }

    #[test]
    fn test_role_key_serializes_lowercase() {
        let json = serde_json::to_string(&RoleKey::Disclosing).unwrap();
        assert_eq!(json, "\"disclosing\"");
        assert_eq!(RoleKey::Mutual.as_str(), "mutual");
    }
}
