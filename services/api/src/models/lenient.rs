//! Field deserializers that accept what the site's admin forms actually send.
//!
//! Display fields come back as numbers as often as strings, and the model
//! year arrives as `2019`, `"2019"` or `""` depending on the form.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A scalar rendered as text. `null` means absent.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, found {}",
            other
        ))),
    }
}

/// A whole number given as a number or numeric string. Blank means absent.
pub fn year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| D::Error::custom("year must be a whole number")),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid year: {}", s))),
        Some(other) => Err(D::Error::custom(format!(
            "expected a year, found {}",
            other
        ))),
    }
}

/// A list of image strings. Non-string entries are skipped.
pub fn gallery<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(entries)) => Ok(Some(
            entries
                .into_iter()
                .filter_map(|entry| match entry {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        )),
        Some(other) => Err(D::Error::custom(format!(
            "expected a list of images, found {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Listing {
        #[serde(deserialize_with = "text")]
        price: Option<String>,
        #[serde(deserialize_with = "year")]
        year: Option<i32>,
        #[serde(deserialize_with = "gallery")]
        images: Option<Vec<String>>,
    }

    fn parse(value: serde_json::Value) -> Result<Listing, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_text_accepts_numbers() {
        assert_eq!(parse(json!({"price": 1500})).unwrap().price.as_deref(), Some("1500"));
        assert_eq!(parse(json!({"price": "$1.500"})).unwrap().price.as_deref(), Some("$1.500"));
        assert_eq!(parse(json!({"price": null})).unwrap().price, None);
        assert_eq!(parse(json!({})).unwrap().price, None);
        assert!(parse(json!({"price": {"amount": 1}})).is_err());
    }

    #[test]
    fn test_year_forms() {
        assert_eq!(parse(json!({"year": 2019})).unwrap().year, Some(2019));
        assert_eq!(parse(json!({"year": " 2019 "})).unwrap().year, Some(2019));
        assert_eq!(parse(json!({"year": ""})).unwrap().year, None);
        assert!(parse(json!({"year": "next year"})).is_err());
        assert!(parse(json!({"year": 2019.5})).is_err());
    }

    #[test]
    fn test_gallery_skips_non_strings() {
        let images = parse(json!({"images": ["a", 1, null, "b"]}))
            .unwrap()
            .images
            .unwrap();
        assert_eq!(images, vec!["a".to_string(), "b".to_string()]);
        assert!(parse(json!({"images": "a"})).is_err());
    }
}
