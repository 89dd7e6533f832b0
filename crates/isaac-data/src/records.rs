//! Feed documents as served by the macro-state and impulse endpoints

use isaac_core::{DecodeError, DecodeResult, FieldElement};
use serde::{Deserialize, Serialize};

/// A field element as it appears in JSON: decimal/hex text or a plain integer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawFelt {
    Text(String),
    Number(serde_json::Number),
}

impl RawFelt {
    pub fn to_field_element(&self) -> DecodeResult<FieldElement> {
        match self {
            Self::Text(text) => text.parse(),
            Self::Number(n) => n
                .as_u64()
                .map(FieldElement::from_u64)
                .ok_or_else(|| DecodeError::felt(n.to_string(), "not a non-negative integer")),
        }
    }
}

impl From<&str> for RawFelt {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawVec2 {
    pub x: RawFelt,
    pub y: RawFelt,
}

/// Per-body entry; only the position `q` is read
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawBody {
    pub q: RawVec2,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawDynamics {
    pub sun0: RawBody,
    pub sun1: RawBody,
    pub sun2: RawBody,
    pub planet: RawBody,
}

/// Revision bookkeeping attached by the indexer
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainMeta {
    #[serde(default)]
    pub valid_from: Option<u64>,
    #[serde(default)]
    pub valid_to: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawMacroState {
    pub block_number: u64,
    pub dynamics: RawDynamics,
    /// Base64 orientation bytes
    pub phi: String,
    #[serde(rename = "_chain", default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<ChainMeta>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawImpulse {
    pub block_number: u64,
    pub most_recent_planet_q: RawVec2,
    pub impulse_applied: RawVec2,
    #[serde(rename = "_chain", default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<ChainMeta>,
}

/// Records that can be superseded by a later revision of the same block
pub trait Revisioned {
    fn block_number(&self) -> u64;
    fn chain(&self) -> Option<&ChainMeta>;

    /// Still valid: no `valid_to` recorded
    fn is_current(&self) -> bool {
        self.chain().map_or(true, |c| c.valid_to.is_none())
    }
}

impl Revisioned for RawMacroState {
    fn block_number(&self) -> u64 {
        self.block_number
    }

    fn chain(&self) -> Option<&ChainMeta> {
        self.chain.as_ref()
    }
}

impl Revisioned for RawImpulse {
    fn block_number(&self) -> u64 {
        self.block_number
    }

    fn chain(&self) -> Option<&ChainMeta> {
        self.chain.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_felt_forms() {
        let text: RawFelt = serde_json::from_str("\"12345\"").unwrap();
        let number: RawFelt = serde_json::from_str("12345").unwrap();
        assert_eq!(text.to_field_element().unwrap(), number.to_field_element().unwrap());

        let float: RawFelt = serde_json::from_str("1.5").unwrap();
        assert!(float.to_field_element().is_err());

        let negative: RawFelt = serde_json::from_str("-7").unwrap();
        assert!(negative.to_field_element().is_err());
    }

    #[test]
    fn test_chain_filter() {
        let json = r#"{
            "block_number": 7,
            "most_recent_planet_q": {"x": "0", "y": "0"},
            "impulse_applied": {"x": "0", "y": "0"},
            "_chain": {"valid_from": 7, "valid_to": 9}
        }"#;
        let superseded: RawImpulse = serde_json::from_str(json).unwrap();
        assert!(!superseded.is_current());

        let mut current = superseded.clone();
        current.chain = None;
        assert!(current.is_current());
    }
}
