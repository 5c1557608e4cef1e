pub mod events;
pub mod extract;
pub mod matches;
pub mod news;
pub mod players;
pub mod root;
pub mod sponsors;
pub mod stats;
pub mod teams;

use serde::{de, Deserialize, Deserializer};

fn default_true() -> bool {
    true
}

/// Query-string booleans: true/1/yes/on and false/0/no/off, any case.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(de::Error::custom(format!("invalid boolean `{raw}`"))),
    }
}

/// A `limit` of 0 returns everything.
fn effective_limit(limit: u32) -> Option<u32> {
    (limit > 0).then_some(limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Query {
        #[serde(default = "default_true", deserialize_with = "flag")]
        only: bool,
    }

    fn parse(query: serde_json::Value) -> Result<bool, serde_json::Error> {
        serde_json::from_value::<Query>(query).map(|q| q.only)
    }

    #[test]
    fn flag_accepts_common_spellings() {
        for raw in ["true", "True", "1", "yes", "ON"] {
            assert!(parse(json!({ "only": raw })).unwrap(), "{raw}");
        }
        for raw in ["false", "False", "0", "no", "off"] {
            assert!(!parse(json!({ "only": raw })).unwrap(), "{raw}");
        }
        assert!(parse(json!({})).unwrap());
        assert!(parse(json!({ "only": "maybe" })).is_err());
    }
}
