//! Numeric map keys that survive `#[serde(flatten)]`.
//!
//! JSON object keys are strings. Once a struct carries a flattened field its
//! input is buffered, and buffered string keys no longer coerce to `u64`, so
//! keys are read as strings and parsed here.

use std::collections::BTreeMap;

use serde::de::Error;
use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<BTreeMap<u64, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    BTreeMap::<String, T>::deserialize(deserializer)?
        .into_iter()
        .map(|(key, value)| {
            key.parse::<u64>()
                .map(|id| (id, value))
                .map_err(|_| D::Error::custom(format!("`{key}` is not a numeric id")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Keyed {
        #[serde(deserialize_with = "deserialize")]
        items: BTreeMap<u64, String>,
        #[serde(flatten)]
        _rest: serde_json::Map<String, serde_json::Value>,
    }

    #[test]
    fn string_keys_parse_under_flatten() {
        let keyed: Keyed =
            serde_json::from_value(json!({"items": {"10": "b", "2": "a"}, "x": 1})).unwrap();
        assert_eq!(keyed.items.keys().copied().collect::<Vec<_>>(), vec![2, 10]);
    }

    #[test]
    fn non_numeric_key_is_rejected() {
        let result = serde_json::from_value::<Keyed>(json!({"items": {"first": "a"}}));
        assert!(result.unwrap_err().to_string().contains("not a numeric id"));
    }
}
