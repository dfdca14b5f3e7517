//! Lenient number decoding.
//!
//! Decimal columns (execution rates, percentages) are serialised by the
//! server as strings such as `"87.50"`, integer columns as JSON numbers.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
    Null,
}

/// Accepts `12.5`, `"12.5"` or `null`; `null` and unparsable text become `0.0`.
pub fn de_f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_f64_lenient(deserializer)?.unwrap_or(0.0))
}

/// Same as [`de_f64_lenient`] but keeps `null` as `None`.
pub fn de_opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Some(n),
        NumberOrText::Text(s) => s.trim().parse::<f64>().ok(),
        NumberOrText::Null => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "de_f64_lenient")]
        rate: f64,
        #[serde(default, deserialize_with = "de_opt_f64_lenient")]
        share: Option<f64>,
    }

    #[test]
    fn test_number_and_string_forms() {
        let a: Row = serde_json::from_str(r#"{"rate": 87.5, "share": "12.25"}"#).unwrap();
        assert_eq!(a.rate, 87.5);
        assert_eq!(a.share, Some(12.25));

        let b: Row = serde_json::from_str(r#"{"rate": "101.00", "share": null}"#).unwrap();
        assert_eq!(b.rate, 101.0);
        assert_eq!(b.share, None);
    }

    #[test]
    fn test_missing_optional_and_garbage() {
        let row: Row = serde_json::from_str(r#"{"rate": "n/a"}"#).unwrap();
        assert_eq!(row.rate, 0.0);
        assert_eq!(row.share, None);
    }
}
