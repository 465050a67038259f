//! Front-matter field values
//!
//! Front matter is schema-free, so every declared field is decoded into a
//! small closed set of shapes. Consumers pick out what they need through the
//! accessors and pass the rest through untouched.

use chrono::{DateTime, FixedOffset, NaiveDate};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value as JsonValue};

lazy_static! {
    static ref YAML_DATE: Regex = Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").unwrap();
    static ref YAML_TIMESTAMP: Regex = Regex::new(
        r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})(?:[Tt]|[ \t]+)([0-9]{1,2}):([0-9]{2}):([0-9]{2})(?:\.([0-9]*))?(?:[ \t]*(Z|([-+])([0-9]{1,2})(?::([0-9]{2}))?))?$"
    )
    .unwrap();
}

/// Decoded front-matter fields, in declaration order
pub type Metadata = IndexMap<String, FieldValue>;

/// A decoded date together with the text it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct Timestamp {
    value: DateTime<FixedOffset>,
    source: String,
}

impl Timestamp {
    /// Parse a YAML timestamp, keeping the original text
    pub fn parse(source: &str) -> Option<Self> {
        parse_timestamp(source).map(|value| Self {
            value,
            source: source.to_string(),
        })
    }

    pub fn value(&self) -> &DateTime<FixedOffset> {
        &self.value
    }

    /// The text as written in the front matter
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

/// A single decoded front-matter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(Number),
    /// A YAML timestamp or TOML datetime. Values without an offset are UTC.
    Date(Timestamp),
    String(String),
    /// A sequence made only of strings (tags, categories, authors...)
    List(Vec<String>),
    /// Nested mappings and mixed sequences, passed through as-is
    Other(JsonValue),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            FieldValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Text of a string, or of a date as it was written. YAML does not
    /// tell quoted `"2024-01-15"` apart from a plain date once decoded.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            FieldValue::Date(d) => Some(d.source()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            FieldValue::Date(d) => Some(d.value()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Decode a YAML value. Plain strings that look like YAML timestamps
    /// become dates.
    pub fn from_yaml(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => yaml_number(&n)
                .map(FieldValue::Number)
                .unwrap_or_else(|| FieldValue::String(n.to_string())),
            Value::String(s) => match Timestamp::parse(&s) {
                Some(date) => FieldValue::Date(date),
                None => FieldValue::String(s),
            },
            Value::Sequence(items) if items.iter().all(Value::is_string) => FieldValue::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            other => FieldValue::Other(yaml_to_json(&other)),
        }
    }

    /// Decode a JSON value. JSON has no date type, so strings stay strings.
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => FieldValue::Null,
            JsonValue::Bool(b) => FieldValue::Bool(b),
            JsonValue::Number(n) => FieldValue::Number(n),
            JsonValue::String(s) => FieldValue::String(s),
            JsonValue::Array(items) if items.iter().all(JsonValue::is_string) => {
                FieldValue::List(
                    items
                        .into_iter()
                        .filter_map(|item| match item {
                            JsonValue::String(s) => Some(s),
                            _ => None,
                        })
                        .collect(),
                )
            }
            other => FieldValue::Other(other),
        }
    }

    /// Decode a TOML value. Offset and local datetimes become dates; bare
    /// times have no calendar day and are kept as strings.
    pub fn from_toml(value: toml::Value) -> Self {
        use toml::Value;

        match value {
            Value::String(s) => FieldValue::String(s),
            Value::Integer(i) => FieldValue::Number(i.into()),
            Value::Float(f) => Number::from_f64(f)
                .map(FieldValue::Number)
                .unwrap_or_else(|| FieldValue::String(f.to_string())),
            Value::Boolean(b) => FieldValue::Bool(b),
            Value::Datetime(dt) => {
                let text = dt.to_string();
                match Timestamp::parse(&text) {
                    Some(date) => FieldValue::Date(date),
                    None => FieldValue::String(text),
                }
            }
            Value::Array(items) if items.iter().all(Value::is_str) => FieldValue::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            other => FieldValue::Other(toml_to_json(&other)),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Option<Number> {
    if let Some(i) = n.as_i64() {
        Some(i.into())
    } else if let Some(u) = n.as_u64() {
        Some(u.into())
    } else {
        n.as_f64().and_then(Number::from_f64)
    }
}

/// Render a scalar YAML mapping key the way it reads in the source
pub(crate) fn yaml_key(key: &serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        _ => None,
    }
}

fn yaml_to_json(value: &serde_yaml::Value) -> JsonValue {
    use serde_yaml::Value;

    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(n) => yaml_number(n)
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(n.to_string())),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Sequence(items) => JsonValue::Array(items.iter().map(yaml_to_json).collect()),
        Value::Mapping(map) => {
            let mut object = Map::new();
            for (key, value) in map {
                if let Some(key) = yaml_key(key) {
                    object.insert(key, yaml_to_json(value));
                }
            }
            JsonValue::Object(object)
        }
        Value::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

fn toml_to_json(value: &toml::Value) -> JsonValue {
    use toml::Value;

    match value {
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Integer(i) => JsonValue::Number((*i).into()),
        Value::Float(f) => Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(f.to_string())),
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::Datetime(dt) => JsonValue::String(dt.to_string()),
        Value::Array(items) => JsonValue::Array(items.iter().map(toml_to_json).collect()),
        Value::Table(table) => JsonValue::Object(
            table
                .iter()
                .map(|(key, value)| (key.clone(), toml_to_json(value)))
                .collect(),
        ),
    }
}

/// Parse a YAML 1.1 timestamp: `2024-01-15`, or a date with a time of
/// day down to the seconds (`2024-01-15 10:30:00`,
/// `2024-01-15T10:30:00.5+08:00`, `2024-01-15 10:30:00 Z`)
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let utc = FixedOffset::east_opt(0)?;

    if let Some(caps) = YAML_DATE.captures(s) {
        let date = NaiveDate::from_ymd_opt(field(&caps, 1)?, field(&caps, 2)?, field(&caps, 3)?)?;
        return date.and_hms_opt(0, 0, 0)?.and_local_timezone(utc).single();
    }

    let caps = YAML_TIMESTAMP.captures(s)?;
    let date = NaiveDate::from_ymd_opt(field(&caps, 1)?, field(&caps, 2)?, field(&caps, 3)?)?;

    let nanos = match caps.get(7).map(|m| m.as_str()).filter(|f| !f.is_empty()) {
        Some(fraction) => {
            let digits = &fraction[..fraction.len().min(9)];
            digits.parse::<u32>().ok()? * 10u32.pow(9 - digits.len() as u32)
        }
        None => 0,
    };
    let naive = date.and_hms_nano_opt(field(&caps, 4)?, field(&caps, 5)?, field(&caps, 6)?, nanos)?;

    let offset = match caps.get(9) {
        Some(sign) => {
            let hours: i32 = field(&caps, 10)?;
            let minutes: i32 = caps.get(11).map_or(Some(0), |m| m.as_str().parse().ok())?;
            let seconds = hours * 3600 + minutes * 60;
            FixedOffset::east_opt(if sign.as_str() == "-" { -seconds } else { seconds })?
        }
        None => utc,
    };

    naive.and_local_timezone(offset).single()
}

fn field<T: std::str::FromStr>(caps: &Captures, index: usize) -> Option<T> {
    caps.get(index)?.as_str().parse().ok()
}
