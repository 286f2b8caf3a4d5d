//! Config redaction: mask secrets before a config is printed or logged.

use serde_json::Value;

/// Keys whose string values are secrets.
static SECRET_KEYS: &[&str] = &["apiKey", "api_key", "token", "secret", "password"];

const MASK: &str = "***";

/// Redact a config JSON value, masking every secret field.
///
/// Keys are kept so the shape of the config stays visible. Unresolved
/// `${VAR}` references are not secrets and are left as they are.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

fn is_secret_key(key: &str) -> bool {
    SECRET_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn mask(s: &str) -> String {
    if s.starts_with("${") && s.ends_with('}') {
        return s.to_string();
    }
    let prefix: String = s.chars().take(4).collect();
    if s.chars().count() > 8 {
        format!("{prefix}{MASK}")
    } else {
        MASK.to_string()
    }
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) if is_secret_key(key) && !s.is_empty() => Value::String(mask(s)),
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_recursive(v, k)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn masks_api_keys() {
        let v = json!({"tts": {"apiKey": "sk-abcdef1234567890"}, "speech": {"apiKey": "short"}});
        let redacted = redact(&v);
        assert_eq!(redacted["tts"]["apiKey"], "sk-a***");
        assert_eq!(redacted["speech"]["apiKey"], "***");
    }

    #[test]
    fn keeps_env_references_and_plain_fields() {
        let v = json!({"tts": {"apiKey": "${OPENAI_API_KEY}", "voice": "nova"}});
        let redacted = redact(&v);
        assert_eq!(redacted["tts"]["apiKey"], "${OPENAI_API_KEY}");
        assert_eq!(redacted["tts"]["voice"], "nova");
    }
}
