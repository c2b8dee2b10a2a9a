//! Declarative field tables and dynamically typed attribute values.
//!
//! Every widget describes its attributes as a table of [`FieldSpec`]s. The
//! generic engine in [`crate::widget`] walks that table to validate
//! assignments, build synchronized snapshots and decode remote updates.

use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;

use colorbar_common::{Error, Result};

use crate::scale::{ReferenceResolver, Scale, deserialize_reference, serialize_reference};

/// Type, choice set or range a field accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Integer with an optional inclusive lower bound.
    Int { min: Option<i64> },
    /// Integer or absent.
    OptionalInt,
    /// Finite float with an optional inclusive lower bound. Integers are widened.
    Float { min: Option<f64> },
    /// One of a fixed set of string literals.
    Choice(&'static [&'static str]),
    /// Text or absent.
    OptionalText,
    /// Sequence of opaque JSON values, or absent.
    OptionalSequence,
    /// Shared reference to a scale object; never absent.
    Scale,
}

impl FieldKind {
    /// Human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            FieldKind::Int { .. } => "an int".to_string(),
            FieldKind::OptionalInt => "an int or None".to_string(),
            FieldKind::Float { .. } => "a float".to_string(),
            FieldKind::Choice(choices) => format!("one of {:?}", choices),
            FieldKind::OptionalText => "a string or None".to_string(),
            FieldKind::OptionalSequence => "a sequence or None".to_string(),
            FieldKind::Scale => "a scale".to_string(),
        }
    }
}

/// Default of a field when the constructor is not given one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    /// No default; construction fails without a value.
    Required,
    None,
    Int(i64),
    Float(f64),
    Text(&'static str),
}

/// How a synchronized field is put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Serializer {
    /// Scalars, strings and sequences as their JSON counterpart.
    Natural,
    /// Shared models as an `IPY_MODEL_<id>` handle.
    Reference,
}

/// One row of a widget's schema table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Wire name of the field.
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: DefaultValue,
    /// Whether assignments are mirrored to the remote view.
    pub sync: bool,
    pub serializer: Serializer,
}

impl FieldSpec {
    /// A synchronized field. Scale fields use reference serialization.
    pub const fn new(name: &'static str, kind: FieldKind, default: DefaultValue) -> Self {
        let serializer = match kind {
            FieldKind::Scale => Serializer::Reference,
            _ => Serializer::Natural,
        };
        Self {
            name,
            kind,
            default,
            sync: true,
            serializer,
        }
    }

    /// Mark this field as local-only.
    pub const fn local(mut self) -> Self {
        self.sync = false;
        self
    }

    /// Default value, or `None` for required fields.
    pub fn default_value(&self) -> Option<AttrValue> {
        match self.default {
            DefaultValue::Required => None,
            DefaultValue::None => Some(AttrValue::None),
            DefaultValue::Int(v) => Some(AttrValue::Int(v)),
            DefaultValue::Float(v) => Some(AttrValue::Float(v)),
            DefaultValue::Text(v) => Some(AttrValue::Text(v.to_string())),
        }
    }

    /// Check `value` against this field's type, choice set and range.
    pub fn check(&self, value: &AttrValue) -> Result<()> {
        match (self.kind, value) {
            (FieldKind::Int { min }, AttrValue::Int(v)) => self.check_min(min, *v),
            (FieldKind::OptionalInt, AttrValue::Int(_) | AttrValue::None) => Ok(()),
            (FieldKind::Float { min }, AttrValue::Int(v)) => {
                self.check_float(min, *v as f64)
            }
            (FieldKind::Float { min }, AttrValue::Float(v)) => self.check_float(min, *v),
            (FieldKind::Choice(choices), AttrValue::Text(s)) => {
                if choices.contains(&s.as_str()) {
                    Ok(())
                } else {
                    Err(Error::constraint(
                        self.name,
                        format!("expected one of {:?}, got '{}'", choices, s),
                    ))
                }
            }
            (FieldKind::OptionalText, AttrValue::Text(_) | AttrValue::None) => Ok(()),
            (FieldKind::OptionalSequence, AttrValue::Sequence(_) | AttrValue::None) => Ok(()),
            (FieldKind::Scale, AttrValue::Scale(_)) => Ok(()),
            (FieldKind::Scale, AttrValue::None) => {
                Err(Error::constraint(self.name, "may not be None"))
            }
            (kind, other) => Err(Error::constraint(
                self.name,
                format!("expected {}, got {}", kind.describe(), other.type_name()),
            )),
        }
    }

    fn check_min<T: PartialOrd + std::fmt::Display>(&self, min: Option<T>, value: T) -> Result<()> {
        match min {
            Some(min) if value < min => Err(Error::constraint(
                self.name,
                format!("must be >= {}, got {}", min, value),
            )),
            _ => Ok(()),
        }
    }

    fn check_float(&self, min: Option<f64>, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::constraint(
                self.name,
                format!("must be finite, got {}", value),
            ));
        }
        self.check_min(min, value)
    }

    /// Encode a (validated) value in its wire form.
    pub fn to_wire(&self, value: &AttrValue) -> Result<Value> {
        match (self.serializer, value) {
            (_, AttrValue::None) => Ok(Value::Null),
            (Serializer::Reference, AttrValue::Scale(scale)) => Ok(serialize_reference(&**scale)),
            (Serializer::Natural, AttrValue::Int(v)) => Ok(Value::from(*v)),
            (Serializer::Natural, AttrValue::Float(v)) => serde_json::Number::from_f64(*v)
                .map(Value::Number)
                .ok_or_else(|| Error::constraint(self.name, format!("must be finite, got {}", v))),
            (Serializer::Natural, AttrValue::Text(s)) => Ok(Value::String(s.clone())),
            (Serializer::Natural, AttrValue::Sequence(items)) => Ok(Value::Array(items.clone())),
            (serializer, other) => Err(Error::constraint(
                self.name,
                format!("{} cannot be serialized as {:?}", other.type_name(), serializer),
            )),
        }
    }

    /// Decode a wire value into an attribute value.
    ///
    /// Only the shape is checked here; call [`FieldSpec::check`] afterwards
    /// for choices and ranges.
    pub fn from_wire(&self, value: &Value, resolver: &dyn ReferenceResolver) -> Result<AttrValue> {
        if value.is_null() {
            return Ok(AttrValue::None);
        }

        let decoded = match (self.kind, value) {
            (FieldKind::Scale, _) => Some(AttrValue::Scale(deserialize_reference(value, resolver)?)),
            (FieldKind::Int { .. } | FieldKind::OptionalInt, Value::Number(n)) => {
                n.as_i64().map(AttrValue::Int)
            }
            (FieldKind::Float { .. }, Value::Number(n)) => n.as_f64().map(AttrValue::Float),
            (FieldKind::Choice(_) | FieldKind::OptionalText, Value::String(s)) => {
                Some(AttrValue::Text(s.clone()))
            }
            (FieldKind::OptionalSequence, Value::Array(items)) => {
                Some(AttrValue::Sequence(items.clone()))
            }
            _ => None,
        };

        decoded.ok_or_else(|| {
            Error::constraint(
                self.name,
                format!("expected {}, got {}", self.kind.describe(), value),
            )
        })
    }
}

/// Find a field by name in a schema table.
pub fn lookup(schema: &'static [FieldSpec], name: &str) -> Result<&'static FieldSpec> {
    schema
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| Error::UnknownField(name.to_string()))
}

/// A dynamically typed attribute value.
///
/// This is what flows through the generic construction and sync paths;
/// the widgets themselves store strongly typed fields.
#[derive(Debug, Clone)]
pub enum AttrValue {
    None,
    Int(i64),
    Float(f64),
    Text(String),
    Sequence(Vec<Value>),
    Scale(Arc<dyn Scale>),
}

impl AttrValue {
    /// Name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::None => "None",
            AttrValue::Int(_) => "int",
            AttrValue::Float(_) => "float",
            AttrValue::Text(_) => "str",
            AttrValue::Sequence(_) => "sequence",
            AttrValue::Scale(_) => "scale",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, AttrValue::None)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Float view of the value; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Int(v) => Some(*v as f64),
            AttrValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_scale(&self) -> Option<&Arc<dyn Scale>> {
        match self {
            AttrValue::Scale(scale) => Some(scale),
            _ => None,
        }
    }

    pub(crate) fn into_i64(self, field: &str) -> Result<i64> {
        self.as_i64().ok_or_else(|| mismatch(field, "an int", &self))
    }

    pub(crate) fn into_f64(self, field: &str) -> Result<f64> {
        self.as_f64().ok_or_else(|| mismatch(field, "a float", &self))
    }

    pub(crate) fn into_opt_i64(self, field: &str) -> Result<Option<i64>> {
        match self {
            AttrValue::None => Ok(None),
            other => other.into_i64(field).map(Some),
        }
    }

    pub(crate) fn into_opt_text(self, field: &str) -> Result<Option<String>> {
        match self {
            AttrValue::None => Ok(None),
            AttrValue::Text(s) => Ok(Some(s)),
            other => Err(mismatch(field, "a string or None", &other)),
        }
    }

    pub(crate) fn into_opt_sequence(self, field: &str) -> Result<Option<Vec<Value>>> {
        match self {
            AttrValue::None => Ok(None),
            AttrValue::Sequence(items) => Ok(Some(items)),
            other => Err(mismatch(field, "a sequence or None", &other)),
        }
    }

    pub(crate) fn into_scale(self, field: &str) -> Result<Arc<dyn Scale>> {
        match self {
            AttrValue::Scale(scale) => Ok(scale),
            other => Err(mismatch(field, "a scale", &other)),
        }
    }

    pub(crate) fn into_choice<T>(self, field: &str) -> Result<T>
    where
        T: FromStr<Err = Error>,
    {
        match self {
            AttrValue::Text(s) => s.parse(),
            other => Err(mismatch(field, "a string", &other)),
        }
    }
}

fn mismatch(field: &str, expected: &str, got: &AttrValue) -> Error {
    Error::constraint(field, format!("expected {}, got {}", expected, got.type_name()))
}

/// Scale values compare by identity.
impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AttrValue::None, AttrValue::None) => true,
            (AttrValue::Int(a), AttrValue::Int(b)) => a == b,
            (AttrValue::Float(a), AttrValue::Float(b)) => a == b,
            (AttrValue::Text(a), AttrValue::Text(b)) => a == b,
            (AttrValue::Sequence(a), AttrValue::Sequence(b)) => a == b,
            (AttrValue::Scale(a), AttrValue::Scale(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Int(i64::from(v))
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<Vec<Value>> for AttrValue {
    fn from(v: Vec<Value>) -> Self {
        AttrValue::Sequence(v)
    }
}

impl From<Arc<dyn Scale>> for AttrValue {
    fn from(v: Arc<dyn Scale>) -> Self {
        AttrValue::Scale(v)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(AttrValue::None, Into::into)
    }
}
