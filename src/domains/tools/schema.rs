//! Declarative argument schemas.
//!
//! A [`SchemaNode`] describes the object a tool expects as its arguments.
//! Each property carries a type and a list of [`Constraint`]s. The same value
//! drives validation (see [`super::validator`]) and is rendered to JSON Schema
//! for tool discovery.

use regex::Regex;
use serde_json::{Map, Value, json};

/// JSON type a property must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    String,
    Number,
    Integer,
    Boolean,
}

impl PropertyKind {
    /// JSON Schema type name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }

    /// Whether `value` has this JSON type.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

/// A regular expression checked against the whole string.
///
/// The source is kept as written for discovery; matching uses an anchored
/// copy so alternations like `day|days` accept every branch in full.
#[derive(Debug, Clone)]
pub struct FullPattern {
    source: String,
    anchored: Regex,
}

impl FullPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            source: pattern.to_string(),
            anchored: Regex::new(&format!("^(?:{})$", pattern))?,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_full_match(&self, value: &str) -> bool {
        self.anchored.is_match(value)
    }
}

/// A restriction on a property value beyond its type.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Value must equal one of these literals (case-sensitive).
    Enum(Vec<String>),
    /// String must match this pattern over its whole length.
    Pattern(FullPattern),
    /// String must have at least this many characters.
    MinLength(usize),
}

/// One named property of an object schema.
#[derive(Debug, Clone)]
pub struct PropertySchema {
    pub name: &'static str,
    pub kind: PropertyKind,
    pub description: &'static str,
    pub constraints: Vec<Constraint>,
}

impl PropertySchema {
    pub fn new(name: &'static str, kind: PropertyKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            constraints: Vec::new(),
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, PropertyKind::String, description)
    }

    /// Restrict the value to a fixed set of literals.
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints
            .push(Constraint::Enum(values.into_iter().map(Into::into).collect()));
        self
    }

    /// Require the whole string to match `pattern`.
    pub fn pattern(mut self, pattern: FullPattern) -> Self {
        self.constraints.push(Constraint::Pattern(pattern));
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.constraints.push(Constraint::MinLength(min));
        self
    }

    fn to_json(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".to_string(), json!(self.kind.as_str()));
        schema.insert("description".to_string(), json!(self.description));

        for constraint in &self.constraints {
            match constraint {
                Constraint::Enum(values) => {
                    schema.insert("enum".to_string(), json!(values));
                }
                Constraint::Pattern(pattern) => {
                    schema.insert("pattern".to_string(), json!(pattern.as_str()));
                }
                Constraint::MinLength(min) => {
                    schema.insert("minLength".to_string(), json!(min));
                }
            }
        }

        Value::Object(schema)
    }
}

/// Object schema for a tool's arguments.
#[derive(Debug, Clone, Default)]
pub struct SchemaNode {
    properties: Vec<PropertySchema>,
    required: Vec<&'static str>,
}

impl SchemaNode {
    /// An object schema with no properties.
    pub fn object() -> Self {
        Self::default()
    }

    /// Add a property that must be present.
    pub fn required(mut self, property: PropertySchema) -> Self {
        self.required.push(property.name);
        self.properties.push(property);
        self
    }

    /// Add a property that may be omitted.
    pub fn optional(mut self, property: PropertySchema) -> Self {
        self.properties.push(property);
        self
    }

    /// Declared properties, in declaration order.
    pub fn properties(&self) -> &[PropertySchema] {
        &self.properties
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(&name)
    }

    /// Render as a JSON Schema object for discovery.
    pub fn to_json(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|p| (p.name.to_string(), p.to_json()))
            .collect();

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        schema.insert("required".to_string(), json!(self.required));
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SchemaNode {
        SchemaNode::object()
            .required(PropertySchema::string("tabName", "Tab").one_of(["Overview", "Comparison"]))
            .required(
                PropertySchema::string("startDate", "Start")
                    .pattern(FullPattern::new(r"^\d{4}-\d{2}-\d{2}$").unwrap()),
            )
            .optional(PropertySchema::new("limit", PropertyKind::Integer, "Limit"))
    }

    #[test]
    fn test_required_tracking() {
        let schema = sample();
        assert!(schema.is_required("tabName"));
        assert!(schema.is_required("startDate"));
        assert!(!schema.is_required("limit"));
        assert_eq!(schema.properties().len(), 3);
    }

    #[test]
    fn test_to_json() {
        let json = Value::Object(sample().to_json());

        assert_eq!(json["type"], "object");
        assert_eq!(json["required"], json!(["tabName", "startDate"]));
        assert_eq!(json["properties"]["tabName"]["type"], "string");
        assert_eq!(
            json["properties"]["tabName"]["enum"],
            json!(["Overview", "Comparison"])
        );
        assert_eq!(
            json["properties"]["startDate"]["pattern"],
            r"^\d{4}-\d{2}-\d{2}$"
        );
        assert_eq!(json["properties"]["limit"]["type"], "integer");
    }

    #[test]
    fn test_full_pattern_matches_whole_string() {
        let unit = FullPattern::new("day|days").unwrap();
        assert!(unit.is_full_match("day"));
        assert!(unit.is_full_match("days"));
        assert!(!unit.is_full_match("dayss"));
        assert!(!unit.is_full_match("weekday"));
        assert_eq!(unit.as_str(), "day|days");

        assert!(FullPattern::new("(").is_err());
    }

    #[test]
    fn test_empty_object_schema() {
        let json = Value::Object(SchemaNode::object().to_json());
        assert_eq!(json["properties"], json!({}));
        assert_eq!(json["required"], json!([]));
    }

    #[test]
    fn test_kind_matching() {
        assert!(PropertyKind::Integer.matches(&json!(3)));
        assert!(!PropertyKind::Integer.matches(&json!(3.5)));
        assert!(PropertyKind::Number.matches(&json!(3.5)));
        assert!(!PropertyKind::String.matches(&json!(null)));
        assert!(PropertyKind::Boolean.matches(&json!(false)));
    }
}
