//! Block hash primitive for checkpoints

use crate::error::CheckpointError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Width of a block hash in bytes.
pub const HASH_SIZE: usize = 32;

/// A 32-byte block identity. Displayed and serialized as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BlockHash(pub [u8; HASH_SIZE]);

impl BlockHash {
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        BlockHash(bytes)
    }

    /// Parse a hash from exactly 64 hex characters.
    pub fn from_hex(hex_str: &str) -> Result<Self, CheckpointError> {
        if hex_str.len() != HASH_SIZE * 2 {
            return Err(CheckpointError::InvalidHash(format!(
                "Hash must be {} hex characters, got {}",
                HASH_SIZE * 2,
                hex_str.len()
            )));
        }
        let mut bytes = [0u8; HASH_SIZE];
        hex::decode_to_slice(hex_str, &mut bytes)
            .map_err(|e| CheckpointError::InvalidHash(format!("{}: {}", hex_str, e)))?;
        Ok(BlockHash(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }
}

impl From<[u8; HASH_SIZE]> for BlockHash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        BlockHash(bytes)
    }
}

impl FromStr for BlockHash {
    type Err = CheckpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockHash::from_hex(s)
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", self.to_hex())
    }
}

impl Serialize for BlockHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for BlockHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        BlockHash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS_PIN: &str = "f48e334a588b89260bd75a1925df0f145751cda3025b713c73aa78232da3e4d6";

    #[test]
    fn test_parse_and_display() {
        let hash = BlockHash::from_hex(GENESIS_PIN).unwrap();
        assert_eq!(hash.as_bytes()[0], 0xf4);
        assert_eq!(hash.to_string(), GENESIS_PIN);
    }

    #[test]
    fn test_uppercase_hex_is_accepted() {
        let upper = GENESIS_PIN.to_uppercase();
        assert_eq!(
            BlockHash::from_hex(&upper).unwrap(),
            BlockHash::from_hex(GENESIS_PIN).unwrap()
        );
    }

    #[test]
    fn test_rejects_wrong_width() {
        let result = BlockHash::from_hex(&GENESIS_PIN[2..]);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Hash must be 64 hex characters"));

        let long = format!("{}00", GENESIS_PIN);
        assert!(BlockHash::from_hex(&long).is_err());
    }

    #[test]
    fn test_rejects_non_hex() {
        let bad = format!("zz{}", &GENESIS_PIN[2..]);
        assert!(matches!(
            BlockHash::from_hex(&bad),
            Err(CheckpointError::InvalidHash(_))
        ));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let hash = BlockHash::from_hex(GENESIS_PIN).unwrap();
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", GENESIS_PIN));
        let back: BlockHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }
}
