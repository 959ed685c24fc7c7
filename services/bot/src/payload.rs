//! Parsing of the data the web app sends back to the bot

use serde_json::Value;

/// Extract the product ids of a web-app payload
///
/// Accepts a JSON array of integers, a bare JSON integer, a comma-separated
/// list (entries that are not plain digits are skipped) or a single number.
/// Returns `None` when nothing usable is found.
pub fn parse_product_ids(raw: &str) -> Option<Vec<i64>> {
    let ids = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(values)) => values
            .iter()
            .map(Value::as_i64)
            .collect::<Option<Vec<_>>>()?,
        Ok(value) => vec![value.as_i64()?],
        Err(_) if raw.contains(',') => raw
            .split(',')
            .map(str::trim)
            .filter(|entry| is_plain_digits(entry))
            .filter_map(|entry| entry.parse().ok())
            .collect(),
        Err(_) => {
            let trimmed = raw.trim();
            if !is_plain_digits(trimmed) {
                return None;
            }
            vec![trimmed.parse().ok()?]
        }
    };

    if ids.is_empty() { None } else { Some(ids) }
}

fn is_plain_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
