//! Document data parsing for `add` and `update`.

use serde_json::Value;
use signup_core::storage::Fields;

use crate::cli::DataArgs;
use crate::errors::CliError;

/// Parse a command-line value.
///
/// `true`, `false`, `null`, numbers, arrays and objects are read as JSON.
/// Anything else, including quoted strings that fail to parse, stays text.
pub fn parse_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    let looks_structured = matches!(trimmed, "true" | "false" | "null")
        || trimmed.starts_with('[')
        || trimmed.starts_with('{')
        || trimmed.starts_with('"')
        || trimmed.parse::<f64>().is_ok();

    if looks_structured {
        if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
            return value;
        }
    }
    Value::String(raw.to_string())
}

fn parse_assignment(raw: &str) -> Result<(String, Value), CliError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| CliError::invalid_input(format!("Invalid field `{}`: expected KEY=VALUE", raw)))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::invalid_input(format!(
            "Invalid field `{}`: key cannot be empty",
            raw
        )));
    }
    Ok((key.to_string(), parse_value(value)))
}

/// Build document fields from `--data` JSON, then `--field` assignments.
///
/// Later assignments overwrite earlier ones for the same key.
pub fn collect_fields(args: &DataArgs) -> Result<Fields, CliError> {
    let mut fields = Fields::new();

    if let Some(raw) = args.data.as_deref() {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => fields.extend(map),
            Ok(_) => {
                return Err(CliError::invalid_input("--data must be a JSON object"));
            }
            Err(e) => {
                return Err(CliError::invalid_input(format!("Invalid --data JSON: {}", e)));
            }
        }
    }

    for raw in &args.fields {
        let (key, value) = parse_assignment(raw)?;
        fields.insert(key, value);
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data_args(fields: &[&str], data: Option<&str>) -> DataArgs {
        DataArgs {
            fields: fields.iter().map(|s| s.to_string()).collect(),
            data: data.map(String::from),
        }
    }

    #[test]
    fn test_parse_value_scalars() {
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("null"), json!(null));
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("-1.5"), json!(-1.5));
        assert_eq!(parse_value("hello"), json!("hello"));
    }

    #[test]
    fn test_parse_value_structured() {
        assert_eq!(parse_value("[\"a\",\"b\"]"), json!(["a", "b"]));
        assert_eq!(parse_value("{\"k\":1}"), json!({"k": 1}));
        assert_eq!(parse_value("\"42\""), json!("42"));
    }

    #[test]
    fn test_parse_value_broken_json_stays_text() {
        assert_eq!(parse_value("[oops"), json!("[oops"));
        assert_eq!(parse_value("a@b.com"), json!("a@b.com"));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let fields = collect_fields(&data_args(&["expr=a=b"], None)).unwrap();
        assert_eq!(fields.get("expr"), Some(&json!("a=b")));
    }

    #[test]
    fn test_fields_override_data() {
        let args = data_args(&["age=37"], Some("{\"name\":\"Ada\",\"age\":36}"));
        let fields = collect_fields(&args).unwrap();
        assert_eq!(fields.get("name"), Some(&json!("Ada")));
        assert_eq!(fields.get("age"), Some(&json!(37)));
    }

    #[test]
    fn test_missing_equals_is_invalid() {
        let err = collect_fields(&data_args(&["name"], None)).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_key_is_invalid() {
        assert!(collect_fields(&data_args(&["=x"], None)).is_err());
    }

    #[test]
    fn test_data_must_be_object() {
        assert!(collect_fields(&data_args(&[], Some("[1,2]"))).is_err());
        assert!(collect_fields(&data_args(&[], Some("{nope"))).is_err());
    }
}
