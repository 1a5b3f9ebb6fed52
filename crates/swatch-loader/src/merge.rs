//! Recursive merge of token source objects.

use serde_json::{Map, Value};

/// `$`-prefixed keys that are kept. Any other `$` key is dropped.
pub const META_KEYS: [&str; 5] = ["$name", "$type", "$value", "$description", "$extensions"];

/// Merge `source` into `target`.
///
/// Objects merge key by key. On any other conflict the value from `source`
/// wins. Metadata values (`$value`, `$extensions`, ...) are taken verbatim
/// and never merged into, so a later file replaces a composite `$value` whole.
pub fn merge_into(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        if key.starts_with('$') {
            if META_KEYS.contains(&key.as_str()) {
                target.insert(key, value);
            } else {
                tracing::debug!(key = %key, "dropping unrecognized metadata key");
            }
            continue;
        }

        let incoming = match value {
            Value::Object(incoming) => incoming,
            leaf => {
                target.insert(key, leaf);
                continue;
            }
        };

        match target.get_mut(&key) {
            Some(Value::Object(existing)) => merge_into(existing, incoming),
            _ => {
                let mut fresh = Map::new();
                merge_into(&mut fresh, incoming);
                target.insert(key, Value::Object(fresh));
            }
        }
    }
}
