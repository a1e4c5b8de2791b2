//! Data transfer objects shared by the dashboard API and its OpenAPI document.
//!
//! Discord ids are 64-bit and exceed what JavaScript numbers represent exactly, so every id is
//! serialized as a string.

pub mod api;
pub mod progress;
pub mod settings;

/// Serde adapter writing a `u64` as a decimal string.
pub(crate) mod id_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        String::deserialize(deserializer)?
            .parse::<u64>()
            .map_err(D::Error::custom)
    }
}

/// Serde adapter writing an optional `u64` as an optional decimal string.
pub(crate) mod opt_id_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(id) => serializer.serialize_some(&id.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        Option::<String>::deserialize(deserializer)?
            .map(|id| id.parse::<u64>().map_err(D::Error::custom))
            .transpose()
    }
}
