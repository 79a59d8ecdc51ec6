use serde_json::{Map, Value};

/// Turn `--id` and `key=value` pairs into the JSON payload the store validates.
///
/// Values that parse as JSON keep their type (`5`, `true`, `null`,
/// `{"login":"x"}`); anything else is taken as a string.
pub fn payload(id: u64, fields: &[String]) -> anyhow::Result<Value> {
    let mut map = Map::new();
    for field in fields {
        let (key, raw) = field
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("expected KEY=VALUE, got '{field}'"))?;
        let key = key.trim();
        if key.is_empty() {
            anyhow::bail!("empty field name in '{field}'");
        }
        if key == "id" {
            anyhow::bail!("'id' cannot be updated; pass it with --id");
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        map.insert(key.to_string(), value);
    }
    map.insert("id".to_string(), Value::from(id));
    Ok(Value::Object(map))
}
