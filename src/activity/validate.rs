use serde_json::{Map, Value};

use super::types::{ActivityEntry, REQUIRED_FIELDS};
use crate::error::ValidationError;

/// Validate one raw activity record and return its normalized form.
///
/// The input is left untouched. Checks run in a fixed order (required
/// fields, `time_spent`, `shares`, `hashtags`) and the first failure wins.
///
/// `liked` and `commented` are coerced rather than checked: a string is
/// `true` only when it equals `"true"` ignoring case, so `"yes"` or `"1"`
/// quietly become `false`. Other non-boolean values follow JSON truthiness
/// (`null`, `0`, `""`, `[]` and `{}` are false).
pub fn validate_entry(entry: &Value) -> Result<ActivityEntry, ValidationError> {
    let record = entry.as_object().ok_or(ValidationError::NotAnObject)?;

    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !record.contains_key(*field))
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let time_spent = match field(record, "time_spent") {
        Value::Number(n) => n.as_f64().ok_or(ValidationError::TimeSpentNotNumeric)?,
        _ => return Err(ValidationError::TimeSpentNotNumeric),
    };

    // 2.0 parses as a float and is rejected; so are integers beyond i64.
    let shares = match field(record, "shares") {
        Value::Number(n) => n.as_i64().ok_or(ValidationError::SharesNotInteger)?,
        _ => return Err(ValidationError::SharesNotInteger),
    };

    let hashtags = match field(record, "hashtags") {
        Value::String(tag) => vec![Value::String(tag.clone())],
        Value::Array(tags) => tags.clone(),
        _ => return Err(ValidationError::HashtagsInvalid),
    };

    Ok(ActivityEntry {
        time_spent,
        liked: coerce_flag(field(record, "liked")),
        shares,
        commented: coerce_flag(field(record, "commented")),
        hashtags,
    })
}

fn field<'a>(record: &'a Map<String, Value>, name: &str) -> &'a Value {
    record.get(name).unwrap_or(&Value::Null)
}

fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
