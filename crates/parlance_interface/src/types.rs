//! Wire types exchanged with the persistence collaborator.

use derive_getters::Getters;
use parlance_core::Dialect;
use serde::{Deserialize, Serialize};

/// Body of a create or update request.
///
/// Field names match the backend. `action` holds action ids only; response ids go in
/// `responses` so the two catalogs stay distinguishable after a round trip.
///
/// # Examples
///
/// ```
/// use parlance_interface::DeclarationPayload;
///
/// let payload = DeclarationPayload {
///     name: "greet".to_string(),
///     define: "- rule: greet".to_string(),
///     ..Default::default()
/// };
/// assert!(payload.intents.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationPayload {
    /// Normalized declaration name
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// DSL text
    pub define: String,
    /// Intent ids in first-seen order
    #[serde(default)]
    pub intents: Vec<String>,
    /// Action ids in first-seen order
    #[serde(default)]
    pub action: Vec<String>,
    /// Response ids in first-seen order
    #[serde(default)]
    pub responses: Vec<String>,
}

/// A declaration as returned by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct StoredDeclaration {
    /// Backend-assigned id
    id: String,
    /// Dialect the declaration was created with
    dialect: Dialect,
    /// Stored payload
    #[serde(flatten)]
    payload: DeclarationPayload,
}

impl StoredDeclaration {
    /// Create a stored declaration record.
    pub fn new(id: impl Into<String>, dialect: Dialect, payload: DeclarationPayload) -> Self {
        Self {
            id: id.into(),
            dialect,
            payload,
        }
    }

    /// Replace the payload, keeping id and dialect.
    pub fn with_payload(mut self, payload: DeclarationPayload) -> Self {
        self.payload = payload;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_declaration_flattens_payload_on_the_wire() {
        let stored = StoredDeclaration::new(
            "42",
            Dialect::Story,
            DeclarationPayload {
                name: "greet".to_string(),
                define: "- story: greet".to_string(),
                action: vec!["a1".to_string()],
                ..Default::default()
            },
        );

        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["dialect"], "story");
        assert_eq!(json["define"], "- story: greet");
        assert_eq!(json["action"][0], "a1");

        let back: StoredDeclaration = serde_json::from_value(json).unwrap();
        assert_eq!(back, stored);
    }
}
