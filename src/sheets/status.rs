// src/sheets/status.rs
//! Status code vocabulary shared by the read path (display text) and the
//! write path (raw code written back to column F).

use serde_json::Value;

/// Shown wherever a value is empty or cannot be interpreted.
pub const PLACEHOLDER: &str = "—";

pub const IN_PREPARATION: &str = "Em preparo";
pub const OUT_FOR_DELIVERY: &str = "Saiu para entrega";
pub const READY: &str = "Pronto";

/// Coerce any JSON scalar into a trimmed string. `null`, arrays and objects
/// become the empty string.
pub fn scalar_to_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Human-readable status for a raw code. Total: unknown codes pass through
/// trimmed and empty input maps to the placeholder.
pub fn map_status(code: &str) -> String {
    match code.trim() {
        "1" => IN_PREPARATION.to_string(),
        "2" => OUT_FOR_DELIVERY.to_string(),
        "3" => READY.to_string(),
        "" => PLACEHOLDER.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_codes() {
        assert_eq!(map_status("1"), IN_PREPARATION);
        assert_eq!(map_status("2"), OUT_FOR_DELIVERY);
        assert_eq!(map_status(" 3 "), READY);
    }

    #[test]
    fn test_unknown_and_empty_codes() {
        assert_eq!(map_status("  cancelado "), "cancelado");
        assert_eq!(map_status("4"), "4");
        assert_eq!(map_status(""), PLACEHOLDER);
        assert_eq!(map_status("   "), PLACEHOLDER);
    }

    #[test]
    fn test_scalar_coercion() {
        assert_eq!(scalar_to_string(Some(&json!(2))), "2");
        assert_eq!(scalar_to_string(Some(&json!(" 1 "))), "1");
        assert_eq!(scalar_to_string(Some(&json!(true))), "true");
        assert_eq!(scalar_to_string(Some(&Value::Null)), "");
        assert_eq!(scalar_to_string(None), "");
        // numeric cells read back through the same vocabulary
        assert_eq!(map_status(&scalar_to_string(Some(&json!(1)))), IN_PREPARATION);
    }
}
