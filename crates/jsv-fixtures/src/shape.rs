//! Typed schema builder.
//!
//! A [`Shape`] describes a value the way an application-level schema
//! library would (`Shape::string().min_length(3).nullable()`), and
//! [`Shape::to_document`] lowers it to a Draft-7 JSON Schema document.
//!
//! Lowering rules:
//!
//! - `nullable()` wraps the schema as `anyOf: [<schema>, {"type": "null"}]`.
//! - `optional()` only affects the parent object's `required` list.
//! - Objects are closed (`additionalProperties: false`) unless
//!   `passthrough()` is set.
//! - Literals lower to `const` with the literal's JSON type.
//! - Discriminated unions lower to `oneOf`, plain unions to `anyOf`.

use serde_json::{json, Map, Value};
use thiserror::Error;

/// `$schema` URI stamped on every generated document.
pub const DRAFT7_URI: &str = "http://json-schema.org/draft-07/schema#";

/// A shape that cannot be lowered to a schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// A discriminated-union variant is not an object.
    #[error("variant {index} of discriminated union on `{discriminator}` is not an object")]
    VariantNotObject {
        /// Discriminator property name.
        discriminator: String,
        /// Zero-based variant position.
        index: usize,
    },

    /// A discriminated-union variant lacks a literal discriminator.
    #[error("variant {index} of discriminated union on `{discriminator}` has no literal `{discriminator}` property")]
    MissingDiscriminator {
        /// Discriminator property name.
        discriminator: String,
        /// Zero-based variant position.
        index: usize,
    },

    /// Two variants share a discriminator value.
    #[error("discriminated union on `{discriminator}` repeats value {value}")]
    DuplicateDiscriminator {
        /// Discriminator property name.
        discriminator: String,
        /// The repeated literal.
        value: Value,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Bounds {
    minimum: Option<Value>,
    maximum: Option<Value>,
    exclusive_minimum: Option<Value>,
    exclusive_maximum: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
enum Kind {
    String {
        min_length: Option<u64>,
        max_length: Option<u64>,
        format: Option<&'static str>,
        pattern: Option<String>,
    },
    Integer(Bounds),
    Number(Bounds),
    Boolean,
    Any,
    Literal(Value),
    Enum(Vec<String>),
    Array {
        items: Box<Shape>,
        min_items: Option<u64>,
        max_items: Option<u64>,
    },
    Object {
        properties: Vec<(String, Shape)>,
        passthrough: bool,
    },
    Union(Vec<Shape>),
    Discriminated(Vec<Shape>),
}

/// A typed description of a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: Kind,
    nullable: bool,
    optional: bool,
    default: Option<Value>,
    description: Option<String>,
}

impl Shape {
    fn new(kind: Kind) -> Self {
        Self {
            kind,
            nullable: false,
            optional: false,
            default: None,
            description: None,
        }
    }

    /// Any string.
    pub fn string() -> Self {
        Self::new(Kind::String {
            min_length: None,
            max_length: None,
            format: None,
            pattern: None,
        })
    }

    /// Any integer.
    pub fn integer() -> Self {
        Self::new(Kind::Integer(Bounds::default()))
    }

    /// Any number.
    pub fn number() -> Self {
        Self::new(Kind::Number(Bounds::default()))
    }

    /// `true` or `false`.
    pub fn boolean() -> Self {
        Self::new(Kind::Boolean)
    }

    /// Any JSON value.
    pub fn any() -> Self {
        Self::new(Kind::Any)
    }

    /// Exactly `value`.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::new(Kind::Literal(value.into()))
    }

    /// One of the given strings.
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Kind::Enum(values.into_iter().map(Into::into).collect()))
    }

    /// A list whose elements all match `items`.
    pub fn array(items: Shape) -> Self {
        Self::new(Kind::Array {
            items: Box::new(items),
            min_items: None,
            max_items: None,
        })
    }

    /// An object with the given properties, in order.
    pub fn object<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = (S, Shape)>,
        S: Into<String>,
    {
        Self::new(Kind::Object {
            properties: properties
                .into_iter()
                .map(|(name, shape)| (name.into(), shape))
                .collect(),
            passthrough: false,
        })
    }

    /// A value matching at least one of `variants`.
    pub fn union(variants: impl IntoIterator<Item = Shape>) -> Self {
        Self::new(Kind::Union(variants.into_iter().collect()))
    }

    /// A union of objects told apart by the literal value of
    /// `discriminator`.
    ///
    /// # Errors
    ///
    /// Fails if a variant is not an object, lacks a literal
    /// `discriminator` property, or repeats another variant's value.
    pub fn discriminated_union(
        discriminator: &str,
        variants: impl IntoIterator<Item = Shape>,
    ) -> Result<Self, ShapeError> {
        let variants: Vec<Shape> = variants.into_iter().collect();
        let mut seen: Vec<&Value> = Vec::with_capacity(variants.len());

        for (index, variant) in variants.iter().enumerate() {
            let Kind::Object { properties, .. } = &variant.kind else {
                return Err(ShapeError::VariantNotObject {
                    discriminator: discriminator.to_string(),
                    index,
                });
            };
            let tag = properties.iter().find_map(|(name, shape)| match &shape.kind {
                Kind::Literal(value) if name == discriminator => Some(value),
                _ => None,
            });
            let Some(tag) = tag else {
                return Err(ShapeError::MissingDiscriminator {
                    discriminator: discriminator.to_string(),
                    index,
                });
            };
            if seen.contains(&tag) {
                return Err(ShapeError::DuplicateDiscriminator {
                    discriminator: discriminator.to_string(),
                    value: tag.clone(),
                });
            }
            seen.push(tag);
        }

        Ok(Self::new(Kind::Discriminated(variants)))
    }

    /// Minimum string length or array size.
    #[must_use]
    pub fn min_length(mut self, n: u64) -> Self {
        match &mut self.kind {
            Kind::String { min_length, .. } => *min_length = Some(n),
            Kind::Array { min_items, .. } => *min_items = Some(n),
            _ => {}
        }
        self
    }

    /// Maximum string length or array size.
    #[must_use]
    pub fn max_length(mut self, n: u64) -> Self {
        match &mut self.kind {
            Kind::String { max_length, .. } => *max_length = Some(n),
            Kind::Array { max_items, .. } => *max_items = Some(n),
            _ => {}
        }
        self
    }

    /// Inclusive lower bound for a number.
    #[must_use]
    pub fn minimum(self, bound: impl Into<Value>) -> Self {
        let bound = bound.into();
        self.with_bounds(|b| b.minimum = Some(bound))
    }

    /// Inclusive upper bound for a number.
    #[must_use]
    pub fn maximum(self, bound: impl Into<Value>) -> Self {
        let bound = bound.into();
        self.with_bounds(|b| b.maximum = Some(bound))
    }

    /// Strictly greater than zero.
    #[must_use]
    pub fn positive(self) -> Self {
        self.with_bounds(|b| b.exclusive_minimum = Some(json!(0)))
    }

    /// Strictly less than zero.
    #[must_use]
    pub fn negative(self) -> Self {
        self.with_bounds(|b| b.exclusive_maximum = Some(json!(0)))
    }

    /// Zero or greater.
    #[must_use]
    pub fn nonnegative(self) -> Self {
        self.minimum(0)
    }

    /// Zero or less.
    #[must_use]
    pub fn nonpositive(self) -> Self {
        self.maximum(0)
    }

    /// Finite numbers only. JSON cannot carry infinities, so this lowers to
    /// nothing; it exists so catalog entries read like their intent.
    #[must_use]
    pub fn finite(self) -> Self {
        self
    }

    /// `format: email`.
    #[must_use]
    pub fn email(self) -> Self {
        self.with_format("email")
    }

    /// `format: uri`.
    #[must_use]
    pub fn url(self) -> Self {
        self.with_format("uri")
    }

    /// `format: uuid`.
    #[must_use]
    pub fn uuid(self) -> Self {
        self.with_format("uuid")
    }

    /// String must match `pattern` (ECMA-262 regex).
    #[must_use]
    pub fn regex(mut self, pattern: impl Into<String>) -> Self {
        if let Kind::String { pattern: slot, .. } = &mut self.kind {
            *slot = Some(pattern.into());
        }
        self
    }

    /// Also accept `null`.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// May be absent from its parent object.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Default value annotation.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Description annotation.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Allow properties beyond the declared ones.
    #[must_use]
    pub fn passthrough(mut self) -> Self {
        if let Kind::Object { passthrough, .. } = &mut self.kind {
            *passthrough = true;
        }
        self
    }

    /// Whether the parent object may omit this property.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    fn with_format(mut self, name: &'static str) -> Self {
        if let Kind::String { format, .. } = &mut self.kind {
            *format = Some(name);
        }
        self
    }

    fn with_bounds(mut self, f: impl FnOnce(&mut Bounds)) -> Self {
        if let Kind::Integer(bounds) | Kind::Number(bounds) = &mut self.kind {
            f(bounds);
        }
        self
    }

    /// Lower to a complete Draft-7 document with a `$schema` header.
    pub fn to_document(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("$schema".to_string(), Value::String(DRAFT7_URI.to_string()));
        match self.to_schema() {
            Value::Object(body) => doc.extend(body),
            other => {
                doc.insert("allOf".to_string(), Value::Array(vec![other]));
            }
        }
        Value::Object(doc)
    }

    /// Lower to a Draft-7 subschema (no `$schema` header).
    pub fn to_schema(&self) -> Value {
        let mut schema = self.kind_schema();
        if self.nullable {
            schema = json!({"anyOf": [schema, {"type": "null"}]});
        }

        let Value::Object(mut map) = schema else {
            return schema;
        };
        if let Some(description) = &self.description {
            map.insert("description".to_string(), Value::String(description.clone()));
        }
        if let Some(default) = &self.default {
            map.insert("default".to_string(), default.clone());
        }
        Value::Object(map)
    }

    fn kind_schema(&self) -> Value {
        let mut map = Map::new();
        match &self.kind {
            Kind::String {
                min_length,
                max_length,
                format,
                pattern,
            } => {
                map.insert("type".into(), json!("string"));
                insert_opt(&mut map, "minLength", min_length.map(Value::from));
                insert_opt(&mut map, "maxLength", max_length.map(Value::from));
                insert_opt(&mut map, "format", format.map(Value::from));
                insert_opt(&mut map, "pattern", pattern.clone().map(Value::from));
            }
            Kind::Integer(bounds) => {
                map.insert("type".into(), json!("integer"));
                insert_bounds(&mut map, bounds);
            }
            Kind::Number(bounds) => {
                map.insert("type".into(), json!("number"));
                insert_bounds(&mut map, bounds);
            }
            Kind::Boolean => {
                map.insert("type".into(), json!("boolean"));
            }
            Kind::Any => {}
            Kind::Literal(value) => {
                insert_opt(&mut map, "type", json_type_of(value).map(Value::from));
                map.insert("const".into(), value.clone());
            }
            Kind::Enum(values) => {
                map.insert("type".into(), json!("string"));
                map.insert("enum".into(), json!(values));
            }
            Kind::Array {
                items,
                min_items,
                max_items,
            } => {
                map.insert("type".into(), json!("array"));
                map.insert("items".into(), items.to_schema());
                insert_opt(&mut map, "minItems", min_items.map(Value::from));
                insert_opt(&mut map, "maxItems", max_items.map(Value::from));
            }
            Kind::Object {
                properties,
                passthrough,
            } => {
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(name, shape)| (name.clone(), shape.to_schema()))
                    .collect();
                let required: Vec<&str> = properties
                    .iter()
                    .filter(|(_, shape)| !shape.optional)
                    .map(|(name, _)| name.as_str())
                    .collect();

                map.insert("type".into(), json!("object"));
                map.insert("properties".into(), Value::Object(props));
                if !required.is_empty() {
                    map.insert("required".into(), json!(required));
                }
                map.insert("additionalProperties".into(), Value::Bool(*passthrough));
            }
            Kind::Union(variants) => {
                let variants: Vec<Value> = variants.iter().map(Shape::to_schema).collect();
                map.insert("anyOf".into(), Value::Array(variants));
            }
            Kind::Discriminated(variants) => {
                let variants: Vec<Value> = variants.iter().map(Shape::to_schema).collect();
                map.insert("oneOf".into(), Value::Array(variants));
            }
        }
        Value::Object(map)
    }
}

fn insert_opt(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value);
    }
}

fn insert_bounds(map: &mut Map<String, Value>, bounds: &Bounds) {
    insert_opt(map, "minimum", bounds.minimum.clone());
    insert_opt(map, "maximum", bounds.maximum.clone());
    insert_opt(map, "exclusiveMinimum", bounds.exclusive_minimum.clone());
    insert_opt(map, "exclusiveMaximum", bounds.exclusive_maximum.clone());
}

fn json_type_of(value: &Value) -> Option<&'static str> {
    match value {
        Value::Null => Some("null"),
        Value::Bool(_) => Some("boolean"),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some("integer"),
        Value::Number(_) => Some("number"),
        Value::String(_) => Some("string"),
        Value::Array(_) | Value::Object(_) => None,
    }
}
