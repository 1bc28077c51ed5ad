//! Custom serde module for environment maps.
//!
//! Values may be written as bare YAML scalars (`5433`, `true`) but the child
//! process only ever sees strings, so they are stringified at load time.
//! Booleans follow the toggle convention: `true` -> "1", `false` -> "0".

use serde::{self, Deserialize, Deserializer};
use std::collections::BTreeMap;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<Scalar>>> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(BTreeMap::new());
    };

    raw.into_iter()
        .map(|(key, value)| match value {
            Some(value) => Ok((key, scalar_to_string(value))),
            None => Err(<D::Error as serde::de::Error>::custom(format!(
                "environment variable {} has no value",
                key
            ))),
        })
        .collect()
}

fn scalar_to_string(value: Scalar) -> String {
    match value {
        Scalar::Bool(true) => "1".to_string(),
        Scalar::Bool(false) => "0".to_string(),
        Scalar::Int(n) => n.to_string(),
        Scalar::UInt(n) => n.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Str(s) => s,
    }
}
