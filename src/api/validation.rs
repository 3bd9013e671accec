//! Declarative request validation.
//!
//! A route declares a fixed, ordered slice of [`Rule`]s. [`validate`] runs
//! every rule against the request, never stopping at the first failure, and
//! returns the failures in declaration order. A non-empty result becomes a
//! `400 {"errors": [...]}` response through [`ValidationErrors`]'s
//! `IntoResponse` impl, so handlers gate on it with `?`.
//!
//! Checks see the raw JSON value of a field (or its absence) and follow the
//! loose coercions browsers and JSON clients expect: numbers may arrive as
//! strings, booleans as `"true"`/`"1"`, and so on. See [`checks`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Where a field is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Params,
}

/// Predicate over a field's raw value; `None` means the field is absent.
pub type Check = fn(Option<&Value>) -> bool;

/// One check on one field, with the message reported when it fails.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub field: &'static str,
    pub location: Location,
    pub check: Check,
    pub message: &'static str,
}

impl Rule {
    #[must_use]
    pub const fn body(field: &'static str, check: Check, message: &'static str) -> Self {
        Self {
            field,
            location: Location::Body,
            check,
            message,
        }
    }

    #[must_use]
    pub const fn param(field: &'static str, check: Check, message: &'static str) -> Self {
        Self {
            field,
            location: Location::Params,
            check,
            message,
        }
    }
}

/// Decode a raw request body. Empty or unparseable bodies become `null`, which
/// [`Input::from_body`] treats as `{}`, so the rules report the missing fields
/// whatever the declared content type.
#[must_use]
pub fn parse_body(raw: &[u8]) -> Value {
    serde_json::from_slice(raw).unwrap_or(Value::Null)
}

/// The parts of a request the rules can look at.
#[derive(Debug, Default)]
pub struct Input {
    body: Map<String, Value>,
    params: Map<String, Value>,
}

impl Input {
    /// Wrap a request body. Anything that is not a JSON object counts as `{}`.
    #[must_use]
    pub fn from_body(body: Value) -> Self {
        let body = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            body,
            params: Map::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.params
            .insert(name.to_string(), Value::String(value.to_string()));
        self
    }

    #[must_use]
    pub fn get(&self, location: Location, field: &str) -> Option<&Value> {
        match location {
            Location::Body => self.body.get(field),
            Location::Params => self.params.get(field),
        }
    }

    /// Convert the field checked by `rule` into a typed value.
    ///
    /// Meant to run after [`validate`] accepted the input; if the conversion
    /// still fails the rule is reported as a regular validation error.
    ///
    /// # Errors
    /// Returns the failure of `rule` when `convert` yields `None`.
    pub fn extract<T>(
        &self,
        rule: &Rule,
        convert: fn(Option<&Value>) -> Option<T>,
    ) -> Result<T, ValidationErrors> {
        let value = self.get(rule.location, rule.field);
        convert(value).ok_or_else(|| ValidationErrors {
            errors: vec![FieldError::new(rule, value)],
        })
    }
}

/// A single failed rule, as reported to clients.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: String,
    /// The submitted value; omitted when the field was absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: Location,
}

impl FieldError {
    fn new(rule: &Rule, value: Option<&Value>) -> Self {
        Self {
            kind: "field".to_string(),
            value: value.cloned(),
            msg: rule.message.to_string(),
            path: rule.field.to_string(),
            location: rule.location,
        }
    }
}

/// Every failure of one request, in rule declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|error| error.msg.as_str()).collect()
    }
}

impl IntoResponse for ValidationErrors {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

/// Run all `rules` against `input`.
///
/// # Errors
/// Returns every failed rule, in the order the rules were declared.
pub fn validate(rules: &[Rule], input: &Input) -> Result<(), ValidationErrors> {
    let errors: Vec<FieldError> = rules
        .iter()
        .filter_map(|rule| {
            let value = input.get(rule.location, rule.field);
            if (rule.check)(value) {
                None
            } else {
                Some(FieldError::new(rule, value))
            }
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors })
    }
}

/// Field predicates and the conversions that go with them.
pub mod checks {
    use regex::Regex;
    use serde_json::Value;
    use std::borrow::Cow;

    const BOOLEAN_STRINGS: [&str; 4] = ["true", "false", "1", "0"];

    /// Text form of a value: absent and `null` are empty, arrays join their
    /// items with `,`.
    #[must_use]
    pub fn text(value: Option<&Value>) -> Cow<'_, str> {
        match value {
            None | Some(Value::Null) => Cow::Borrowed(""),
            Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
            Some(Value::Number(n)) => Cow::Owned(n.to_string()),
            Some(Value::Bool(b)) => Cow::Owned(b.to_string()),
            Some(Value::Array(items)) => Cow::Owned(
                items
                    .iter()
                    .map(|item| text(Some(item)).into_owned())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Some(Value::Object(_)) => Cow::Borrowed("[object Object]"),
        }
    }

    /// Numeric value of a field, `None` when it is not a number.
    ///
    /// `null` and blank strings count as `0`, booleans as `1`/`0`.
    #[must_use]
    pub fn number(value: Option<&Value>) -> Option<f64> {
        let parsed = match value? {
            Value::Null => Some(0.0),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) => n.as_f64(),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            Value::Array(_) | Value::Object(_) => None,
        };
        parsed.filter(|n| n.is_finite())
    }

    #[must_use]
    pub fn flag(value: Option<&Value>) -> Option<bool> {
        match text(value).as_ref() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn int(value: Option<&Value>) -> Option<i64> {
        match value? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse::<i64>().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn string(value: Option<&Value>) -> Option<String> {
        value.and_then(Value::as_str).map(str::to_string)
    }

    #[must_use]
    pub fn is_string(value: Option<&Value>) -> bool {
        matches!(value, Some(Value::String(_)))
    }

    #[must_use]
    pub fn not_empty(value: Option<&Value>) -> bool {
        !text(value).is_empty()
    }

    #[must_use]
    pub fn is_numeric(value: Option<&Value>) -> bool {
        Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").is_ok_and(|re| re.is_match(&text(value)))
    }

    #[must_use]
    pub fn is_positive(value: Option<&Value>) -> bool {
        number(value).is_some_and(|n| n > 0.0)
    }

    #[must_use]
    pub fn is_boolean(value: Option<&Value>) -> bool {
        BOOLEAN_STRINGS.contains(&text(value).as_ref())
    }

    #[must_use]
    pub fn is_int(value: Option<&Value>) -> bool {
        int(value).is_some()
    }
}
