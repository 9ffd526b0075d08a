//! Key casing conversion for the legacy dialect.

use serde_json::{Map, Value};

/// Converts a camelCase identifier to snake_case.
///
/// A run of capitals is one word (`URLValue` becomes `url_value`).
/// Identifiers that are already snake_case pass through unchanged.
pub fn to_snake_case(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let starts_word = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if starts_word {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Recursively renames every object key in `value` to snake_case.
///
/// String values are never touched.
pub fn snake_case_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (to_snake_case(&k), snake_case_keys(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(snake_case_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_camel_case() {
        assert_eq!(to_snake_case("textValue"), "text_value");
        assert_eq!(to_snake_case("formattedAddress"), "formatted_address");
        assert_eq!(to_snake_case("name"), "name");
    }

    #[test]
    fn keeps_capital_runs_together() {
        assert_eq!(to_snake_case("URLValue"), "url_value");
        assert_eq!(to_snake_case("userID"), "user_id");
        assert_eq!(to_snake_case("postalCodeV2"), "postal_code_v2");
        assert_eq!(to_snake_case("HTTPSProxyURL"), "https_proxy_url");
    }

    #[test]
    fn leaves_snake_case_alone() {
        assert_eq!(to_snake_case("zip_code"), "zip_code");
    }

    #[test]
    fn renames_nested_keys_but_not_values() {
        let value = json!({
            "rawText": "twelve",
            "datetimeValue": {"dateValue": {"dayOfMonth": 3}},
            "extension": [{"someKey": "keepMe"}]
        });
        assert_eq!(
            snake_case_keys(value),
            json!({
                "raw_text": "twelve",
                "datetime_value": {"date_value": {"day_of_month": 3}},
                "extension": [{"some_key": "keepMe"}]
            })
        );
    }
}
