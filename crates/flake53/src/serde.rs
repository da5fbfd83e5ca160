use crate::id::Flake;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl Serialize for Flake {
    /// Serializes the identifier as its native integer representation.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_raw().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Flake {
    /// Deserializes an identifier from its native integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The value exceeds the 53-bit id space
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u64::deserialize(deserializer)?;
        Flake::try_from_raw(raw).map_err(serde::de::Error::custom)
    }
}
