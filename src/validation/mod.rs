//! Survey schema checks, applied both to inbound submissions and to rows read
//! back from the store.
//!
//! Error messages are keyed by field name and each field carries a list of
//! messages, so a caller can render them next to the matching input.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use strum_macros::AsRefStr;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::storage::Survey;


pub(crate) const QUESTION_MAX_LEN: usize = 255;

pub(crate) const NON_FIELD_ERRORS: &str = "non_field_errors";

const REQUIRED: &str = "This field is required.";
const NULL: &str = "This field may not be null.";
const BLANK: &str = "This field may not be blank.";
const NOT_A_STRING: &str = "Not a valid string.";
const DATETIME_FORMAT: &str = "Datetime has wrong format. Use one of these formats instead: YYYY-MM-DDThh:mm[:ss[.uuuuuu]][+HH:MM|-HH:MM|Z].";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Messages per field name.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Lists the failing field names.
impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.fields().collect::<Vec<_>>().join(", "))
    }
}

#[derive(Debug, Error, AsRefStr, Serialize)]
#[serde(untagged)]
#[strum(serialize_all = "snake_case")]
pub enum ValidationError {
    #[error("Invalid survey submission: {0}")]
    Submission(FieldErrors),

    /// One entry per stored row, empty for rows that passed.
    #[error("Store returned {} invalid survey row(s)", invalid_rows(.0))]
    Listing(Vec<FieldErrors>),
}

fn invalid_rows(errors: &[FieldErrors]) -> usize {
    errors.iter().filter(|e| !e.is_empty()).count()
}

/// Checks one submission. Every failing field is reported, not just the first.
#[instrument(name = "validation::submission", skip_all)]
pub fn validate_submission(payload: &Value) -> Result<Survey, ValidationError> {
    validate_row(payload).map_err(|errors| {
        debug!(?errors, "submission rejected");
        ValidationError::Submission(errors)
    })
}

/// Checks every stored row. Any failing row fails the whole listing.
#[instrument(name = "validation::listing", skip_all, fields(rows = rows.len()))]
pub fn validate_listing(rows: &[Value]) -> Result<Vec<Survey>, ValidationError> {
    let mut surveys = Vec::with_capacity(rows.len());
    let mut errors = Vec::with_capacity(rows.len());
    let mut failed = false;

    for row in rows {
        match validate_row(row) {
            Ok(survey) => {
                surveys.push(survey);
                errors.push(FieldErrors::default());
            }
            Err(row_errors) => {
                failed = true;
                errors.push(row_errors);
            }
        }
    }

    if failed {
        warn!(?errors, "stored rows failed validation");
        return Err(ValidationError::Listing(errors));
    }

    Ok(surveys)
}

fn validate_row(value: &Value) -> Result<Survey, FieldErrors> {
    let mut errors = FieldErrors::default();

    let Some(row) = value.as_object() else {
        errors.add(
            NON_FIELD_ERRORS,
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                type_name(value)
            ),
        );
        return Err(errors);
    };

    let question = char_field(row, "question", Some(QUESTION_MAX_LEN), &mut errors);
    let answer = char_field(row, "answer", None, &mut errors);
    let created_at = datetime_field(row, "created_at", &mut errors);

    match (question, answer) {
        (Some(question), Some(answer)) if errors.is_empty() => Ok(Survey {
            question,
            answer,
            created_at,
        }),
        _ => Err(errors),
    }
}

/// Required string. Numbers are accepted in their textual form; surrounding
/// whitespace is trimmed before the blank and length checks.
fn char_field(
    row: &Map<String, Value>,
    name: &str,
    max_len: Option<usize>,
    errors: &mut FieldErrors,
) -> Option<String> {
    let text = match row.get(name) {
        None => {
            errors.add(name, REQUIRED);
            return None;
        }
        Some(Value::Null) => {
            errors.add(name, NULL);
            return None;
        }
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => {
            errors.add(name, NOT_A_STRING);
            return None;
        }
    };

    if text.is_empty() {
        errors.add(name, BLANK);
        return None;
    }

    if let Some(max_len) = max_len {
        if text.chars().count() > max_len {
            errors.add(
                name,
                format!("Ensure this field has no more than {max_len} characters."),
            );
            return None;
        }
    }

    Some(text)
}

/// Optional timestamp. Values without an offset are taken as UTC. Failures
/// are recorded in `errors`; the caller checks those before using the value.
fn datetime_field(
    row: &Map<String, Value>,
    name: &str,
    errors: &mut FieldErrors,
) -> Option<DateTime<Utc>> {
    let parsed = match row.get(name)? {
        Value::Null => {
            errors.add(name, NULL);
            return None;
        }
        Value::String(s) => parse_datetime(s.trim()),
        _ => None,
    };

    if parsed.is_none() {
        errors.add(name, DATETIME_FORMAT);
    }
    parsed
}

pub(crate) fn parse_datetime(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = input.parse::<DateTime<FixedOffset>>() {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Some(parsed) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(input, format).ok())
    {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|naive| naive.and_utc())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
