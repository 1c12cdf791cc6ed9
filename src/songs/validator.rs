//! Song payload validator
//!
//! Validation semantics for create and update bodies:
//! - Body is a JSON object with no undeclared fields
//! - `title`, `genre`, `performer` are required non-empty strings
//! - `year` is a required integer between `MIN_YEAR` and the current year
//! - `duration` is an optional non-negative integer, `null` allowed
//! - `albumId` is an optional non-empty string, `null` allowed
//!
//! No type coercion is performed: `"1975"` is not a valid year.

use chrono::Datelike;
use serde_json::{Map, Value};

use super::errors::{SongError, SongResult, ValidationDetails};
use super::model::SongPayload;

/// Earliest accepted release year
pub const MIN_YEAR: i32 = 1900;

/// Every field a song payload may carry
pub const SONG_PAYLOAD_FIELDS: [&str; 6] =
    ["title", "year", "genre", "performer", "duration", "albumId"];

/// Validates create/update bodies and converts them into `SongPayload`.
///
/// Validation is pure; the document is never mutated.
#[derive(Debug, Clone)]
pub struct SongPayloadValidator {
    max_year: i32,
}

impl SongPayloadValidator {
    /// Validator accepting years up to the current calendar year
    pub fn new() -> Self {
        Self::with_max_year(chrono::Utc::now().year())
    }

    /// Validator with a fixed upper bound on `year`
    pub fn with_max_year(max_year: i32) -> Self {
        Self { max_year }
    }

    pub fn max_year(&self) -> i32 {
        self.max_year
    }

    /// Validates a payload, returning the typed fields on success.
    ///
    /// # Errors
    ///
    /// Returns `SongError::Validation` describing the first rule broken.
    pub fn validate(&self, payload: &Value) -> SongResult<SongPayload> {
        let obj = payload.as_object().ok_or_else(|| {
            SongError::validation(ValidationDetails::type_mismatch(
                "$body",
                "object",
                json_type_name(payload),
            ))
        })?;

        if let Some(extra) = obj
            .keys()
            .find(|key| !SONG_PAYLOAD_FIELDS.contains(&key.as_str()))
        {
            return Err(SongError::validation(ValidationDetails::extra_field(extra)));
        }

        let title = required_string(obj, "title")?;
        let year = required_int(obj, "year")?;
        if year < i64::from(MIN_YEAR) || year > i64::from(self.max_year) {
            return Err(SongError::validation(ValidationDetails::out_of_range(
                "year",
                format!("year between {} and {}", MIN_YEAR, self.max_year),
                year,
            )));
        }
        let genre = required_string(obj, "genre")?;
        let performer = required_string(obj, "performer")?;

        let duration = match optional(obj, "duration") {
            Some(value) => {
                let duration = as_int("duration", value)?;
                if duration < 0 || duration > i64::from(i32::MAX) {
                    return Err(SongError::validation(ValidationDetails::out_of_range(
                        "duration",
                        "non-negative number of seconds",
                        duration,
                    )));
                }
                Some(duration as i32)
            }
            None => None,
        };

        let album_id = match optional(obj, "albumId") {
            Some(value) => Some(as_non_empty_string("albumId", value)?),
            None => None,
        };

        Ok(SongPayload {
            title,
            year: year as i32,
            genre,
            performer,
            duration,
            album_id,
        })
    }
}

impl Default for SongPayloadValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Absent and `null` are treated the same for optional fields.
fn optional<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    obj.get(field).filter(|value| !value.is_null())
}

fn required<'a>(obj: &'a Map<String, Value>, field: &str) -> SongResult<&'a Value> {
    match obj.get(field) {
        None => Err(SongError::validation(ValidationDetails::missing_field(field))),
        Some(Value::Null) => Err(SongError::validation(ValidationDetails::type_mismatch(
            field, "non-null value", "null",
        ))),
        Some(value) => Ok(value),
    }
}

fn required_string(obj: &Map<String, Value>, field: &str) -> SongResult<String> {
    as_non_empty_string(field, required(obj, field)?)
}

fn required_int(obj: &Map<String, Value>, field: &str) -> SongResult<i64> {
    as_int(field, required(obj, field)?)
}

fn as_non_empty_string(field: &str, value: &Value) -> SongResult<String> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        Some(_) => Err(SongError::validation(ValidationDetails::new(
            field,
            "non-empty string",
            "empty string",
        ))),
        None => Err(type_error(field, "string", value)),
    }
}

fn as_int(field: &str, value: &Value) -> SongResult<i64> {
    value
        .as_i64()
        .ok_or_else(|| type_error(field, "integer", value))
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_error(field: &str, expected: &str, actual: &Value) -> SongError {
    SongError::validation(ValidationDetails::type_mismatch(
        field,
        expected,
        json_type_name(actual),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> SongPayloadValidator {
        SongPayloadValidator::with_max_year(2024)
    }

    fn field_of(err: SongError) -> String {
        match err {
            SongError::Validation(details) => details.field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_full_payload_is_accepted() {
        let payload = validator()
            .validate(&json!({
                "title": "Bohemian Rhapsody",
                "year": 1975,
                "genre": "Rock",
                "performer": "Queen",
                "duration": 354,
                "albumId": "album-1"
            }))
            .unwrap();

        assert_eq!(payload.title, "Bohemian Rhapsody");
        assert_eq!(payload.year, 1975);
        assert_eq!(payload.duration, Some(354));
        assert_eq!(payload.album_id.as_deref(), Some("album-1"));
    }

    #[test]
    fn test_optional_fields_may_be_absent_or_null() {
        let absent = validator()
            .validate(&json!({"title": "A", "year": 2000, "genre": "Pop", "performer": "B"}))
            .unwrap();
        assert_eq!(absent.duration, None);
        assert_eq!(absent.album_id, None);

        let null = validator()
            .validate(&json!({
                "title": "A", "year": 2000, "genre": "Pop", "performer": "B",
                "duration": null, "albumId": null
            }))
            .unwrap();
        assert_eq!(null, absent);
    }

    #[test]
    fn test_missing_title_rejected() {
        let err = validator()
            .validate(&json!({"year": 2000, "genre": "Pop", "performer": "B"}))
            .unwrap_err();
        assert_eq!(field_of(err), "title");
    }

    #[test]
    fn test_missing_performer_rejected() {
        let err = validator()
            .validate(&json!({"title": "A", "year": 2000, "genre": "Pop"}))
            .unwrap_err();
        assert_eq!(field_of(err), "performer");
    }

    #[test]
    fn test_non_numeric_year_rejected() {
        let err = validator()
            .validate(&json!({"title": "A", "year": "2000", "genre": "Pop", "performer": "B"}))
            .unwrap_err();
        assert!(err.to_string().contains("integer"));
        assert_eq!(field_of(err), "year");
    }

    #[test]
    fn test_fractional_duration_rejected() {
        let err = validator()
            .validate(&json!({
                "title": "A", "year": 2000, "genre": "Pop", "performer": "B", "duration": 1.5
            }))
            .unwrap_err();
        assert_eq!(field_of(err), "duration");
    }

    #[test]
    fn test_negative_duration_rejected() {
        let err = validator()
            .validate(&json!({
                "title": "A", "year": 2000, "genre": "Pop", "performer": "B", "duration": -3
            }))
            .unwrap_err();
        assert_eq!(field_of(err), "duration");
    }

    #[test]
    fn test_year_bounds() {
        let v = validator();
        let base = |year: i64| json!({"title": "A", "year": year, "genre": "Pop", "performer": "B"});

        assert!(v.validate(&base(1900)).is_ok());
        assert!(v.validate(&base(2024)).is_ok());
        assert_eq!(field_of(v.validate(&base(1899)).unwrap_err()), "year");
        assert_eq!(field_of(v.validate(&base(2025)).unwrap_err()), "year");
    }

    #[test]
    fn test_empty_strings_rejected() {
        let err = validator()
            .validate(&json!({"title": "  ", "year": 2000, "genre": "Pop", "performer": "B"}))
            .unwrap_err();
        assert_eq!(field_of(err), "title");
    }

    #[test]
    fn test_undeclared_field_rejected() {
        let err = validator()
            .validate(&json!({
                "title": "A", "year": 2000, "genre": "Pop", "performer": "B", "id": "song-x"
            }))
            .unwrap_err();
        assert_eq!(field_of(err), "id");
    }

    #[test]
    fn test_non_object_body_rejected() {
        let err = validator().validate(&json!(["title"])).unwrap_err();
        assert_eq!(field_of(err), "$body");
    }

    #[test]
    fn test_default_validator_accepts_current_year() {
        let v = SongPayloadValidator::default();
        let year = chrono::Utc::now().year();
        assert_eq!(v.max_year(), year);
        assert!(v
            .validate(&json!({"title": "A", "year": year, "genre": "Pop", "performer": "B"}))
            .is_ok());
    }
}
