//! Data values held by module members
//!
//! `Value` is the data half of the member union. Stringification and numeric
//! coercion follow the conventions scripts expect, so `Undefined` renders as
//! `undefined` and integral numbers render without a fractional part.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::errors::{CapabilityError, CapabilityResult};
use crate::identifiers::ModuleId;
use crate::module::Module;
use crate::point::Point;

/// A data value
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// No value; what reading a missing member yields
    #[default]
    Undefined,
    /// Explicit null
    Null,
    /// Boolean
    Bool(bool),
    /// IEEE 754 number
    Number(f64),
    /// Text
    Text(String),
    /// 2D point
    Point(Point),
    /// Ordered list of values
    List(Vec<Value>),
    /// Reference to an object-like module
    Module(Module),
}

impl Value {
    /// Check for `Undefined` or `Null`
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// The module, if this value references one
    pub fn as_module(&self) -> Option<&Module> {
        match self {
            Value::Module(module) => Some(module),
            _ => None,
        }
    }

    /// Name of the value's kind, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Text(_) => "string",
            Value::Point(_) => "point",
            Value::List(_) => "list",
            Value::Module(_) => "module",
        }
    }

    /// Numeric coercion
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => *n,
            Value::Text(s) => parse_number(s),
            Value::Point(_) | Value::List(_) | Value::Module(_) => f64::NAN,
        }
    }

    /// Convert to JSON
    ///
    /// Modules become objects of their data members; behaviors are omitted.
    /// A module graph that contains itself cannot be represented and fails
    /// with `SerializationError`.
    pub fn to_json(&self) -> CapabilityResult<serde_json::Value> {
        let mut visiting = Vec::new();
        self.to_json_inner(&mut visiting)
    }

    pub(crate) fn to_json_inner(
        &self,
        visiting: &mut Vec<ModuleId>,
    ) -> CapabilityResult<serde_json::Value> {
        Ok(match self {
            Value::Undefined | Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Point(p) => serde_json::to_value(p)?,
            Value::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| item.to_json_inner(visiting))
                    .collect::<CapabilityResult<Vec<_>>>()?,
            ),
            Value::Module(module) => module.to_json_inner(visiting)?,
        })
    }

    /// Build a value from JSON; objects become fresh modules holding data
    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::Text(s.clone()),
            serde_json::Value::Array(items) => {
                Value::List(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => {
                let module = map
                    .iter()
                    .fold(Module::builder(), |builder, (name, item)| {
                        builder.data(name.clone(), Value::from_json(item))
                    })
                    .build();
                Value::Module(module)
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Point(a), Value::Point(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Module(a), Value::Module(b)) => Module::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Script numeric parse: blank is 0, only the spelled-out `Infinity` names
/// an infinity, anything else unparseable is NaN
fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    match trimmed {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // `str::parse` also takes inf/nan spellings; scripts do not
        _ if trimmed
            .bytes()
            .any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E')) =>
        {
            f64::NAN
        }
        _ => trimmed.parse().unwrap_or(f64::NAN),
    }
}

/// Write a number the way scripts stringify it
pub(crate) fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        write!(f, "NaN")
    } else if n.is_infinite() {
        write!(f, "{}", if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        // -0 prints as 0
        write!(f, "0")
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let exponential = format!("{:e}", n);
        match exponential.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                write!(f, "{}e+{}", mantissa, exponent)
            }
            _ => write!(f, "{}", exponential),
        }
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => format_number(*n, f),
            Value::Text(s) => write!(f, "{}", s),
            Value::Point(p) => write!(f, "{}", p),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    // nullish list entries print empty
                    if !item.is_nullish() {
                        write!(f, "{}", item)?;
                    }
                }
                Ok(())
            }
            Value::Module(_) => write!(f, "[object Object]"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(<S::Error as serde::ser::Error>::custom)?
            .serialize(serializer)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Point> for Value {
    fn from(p: Point) -> Self {
        Value::Point(p)
    }
}

impl From<Module> for Value {
    fn from(m: Module) -> Self {
        Value::Module(m)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Undefined)
    }
}

impl TryFrom<Value> for Module {
    type Error = CapabilityError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Module(module) => Ok(module),
            other => Err(CapabilityError::NotAModule(other.kind().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::make_point;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Number(5.0).to_string(), "5");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-0.0).to_string(), "0");
        assert_eq!(Value::Number(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Number(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::from("Foo").to_string(), "Foo");
        assert_eq!(Value::from(make_point(1.0, 2.0)).to_string(), "{1, 2}");
        assert_eq!(
            Value::List(vec![Value::from(1), Value::Undefined, Value::from("x")]).to_string(),
            "1,,x"
        );
        assert_eq!(Value::from(Module::new()).to_string(), "[object Object]");
    }

    #[test]
    fn test_numeric_coercion() {
        assert!(Value::Undefined.to_number().is_nan());
        assert_eq!(Value::Null.to_number(), 0.0);
        assert_eq!(Value::Bool(true).to_number(), 1.0);
        assert_eq!(Value::from(" 42 ").to_number(), 42.0);
        assert_eq!(Value::from("").to_number(), 0.0);
        assert!(Value::from("forty").to_number().is_nan());
        assert!(Value::from(Module::new()).to_number().is_nan());
    }

    #[test]
    fn test_numeric_coercion_of_text() {
        assert_eq!(Value::from("1e3").to_number(), 1000.0);
        assert_eq!(Value::from("-2.5E-1").to_number(), -0.25);
        assert_eq!(Value::from(".5").to_number(), 0.5);
        assert_eq!(Value::from("Infinity").to_number(), f64::INFINITY);
        assert_eq!(Value::from("+Infinity").to_number(), f64::INFINITY);
        assert_eq!(Value::from(" -Infinity ").to_number(), f64::NEG_INFINITY);

        for text in ["inf", "-inf", "infinity", "INFINITY", "nan", "NaN", "1x", "e5"] {
            assert!(Value::from(text).to_number().is_nan(), "{text:?} should be NaN");
        }
    }

    #[test]
    fn test_number_display_uses_exponent_at_extremes() {
        assert_eq!(Value::Number(1e21).to_string(), "1e+21");
        assert_eq!(Value::Number(-1.5e21).to_string(), "-1.5e+21");
        assert_eq!(Value::Number(1e-7).to_string(), "1e-7");
        assert_eq!(Value::Number(-2.5e-7).to_string(), "-2.5e-7");
        // just inside the plain range
        assert_eq!(Value::Number(1e20).to_string(), "100000000000000000000");
        assert_eq!(Value::Number(1e-6).to_string(), "0.000001");
    }

    #[test]
    fn test_module_values_compare_by_reference() {
        let module = Module::new();
        let same = Value::from(module.clone());
        let other = Value::from(Module::new());

        assert_eq!(Value::from(module), same);
        assert_ne!(same, other);
    }

    #[test]
    fn test_json_round_trip_keeps_data() {
        let json = serde_json::json!({
            "name": "SubModule",
            "count": 5.0,
            "tags": ["a", null, true],
            "nested": {"depth": 1.0}
        });

        let value = Value::from_json(&json);
        let module = value.as_module().expect("object becomes a module");
        assert_eq!(module.get("name").unwrap(), Value::from("SubModule"));
        assert!(module.get("nested").unwrap().as_module().is_some());

        assert_eq!(value.to_json().unwrap(), json);
    }

    #[test]
    fn test_to_json_omits_behaviors_and_maps_undefined_to_null() {
        let module = Module::builder()
            .behavior("greet", |_, _| Ok(Value::from("hi")))
            .data("point", make_point(1.0, 2.0))
            .data("missing", Value::Undefined)
            .build();

        assert_eq!(
            Value::from(module).to_json().unwrap(),
            serde_json::json!({"point": {"x": 1.0, "y": 2.0}, "missing": null})
        );
    }

    #[test]
    fn test_to_json_rejects_cycles() {
        let module = Module::new();
        module.set("me", Value::from(module.clone())).unwrap();

        let err = Value::from(module).to_json().unwrap_err();
        assert!(matches!(err, CapabilityError::SerializationError(_)));
    }

    #[test]
    fn test_serialize_through_serde() {
        let value = Value::List(vec![Value::from(1), Value::from("two")]);
        assert_eq!(serde_json::to_string(&value).unwrap(), "[1.0,\"two\"]");
    }

    #[test]
    fn test_try_from_value_into_module() {
        let module = Module::new();
        let back = Module::try_from(Value::from(module.clone())).unwrap();
        assert!(Module::ptr_eq(&module, &back));

        let err = Module::try_from(Value::Number(1.0)).unwrap_err();
        assert_eq!(err, CapabilityError::NotAModule("number".to_string()));
    }
}
