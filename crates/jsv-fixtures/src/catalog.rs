//! The reference fixture catalog.
//!
//! Each entry pairs a stable kebab-case name with a [`Shape`]. Names are
//! part of the contract: downstream suites compare their own generated
//! schemas against `<name>.json`, so renaming an entry breaks them.

use crate::shape::{Shape, ShapeError};

/// A named reference schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    /// File stem and manifest name.
    pub name: &'static str,
    /// The shape lowered into the fixture document.
    pub shape: Shape,
}

impl Fixture {
    fn new(name: &'static str, shape: Shape) -> Self {
        Self { name, shape }
    }

    /// Manifest description: `Reference fixture for <name with spaces>`.
    pub fn description(&self) -> String {
        format!("Reference fixture for {}", self.name.replace('-', " "))
    }
}

fn roles() -> [&'static str; 3] {
    ["admin", "user", "guest"]
}

fn statuses() -> [&'static str; 3] {
    ["active", "inactive", "pending"]
}

/// Every reference fixture, grouped by kind, in generation order.
///
/// # Errors
///
/// Fails only if a discriminated union in the catalog is malformed.
pub fn reference_fixtures() -> Result<Vec<Fixture>, ShapeError> {
    let mut all = Vec::with_capacity(78);
    all.extend(string_fixtures());
    all.extend(integer_fixtures());
    all.extend(double_fixtures());
    all.extend(boolean_fixtures());
    all.extend(any_fixtures());
    all.extend(list_fixtures());
    all.extend(object_fixtures());
    all.extend(union_fixtures());
    all.extend(discriminated_fixtures()?);
    all.extend(enum_fixtures());
    Ok(all)
}

fn string_fixtures() -> Vec<Fixture> {
    vec![
        Fixture::new("string-basic", Shape::string()),
        Fixture::new("string-nullable", Shape::string().nullable()),
        Fixture::new("string-with-default", Shape::string().default("default-value")),
        Fixture::new(
            "string-with-description",
            Shape::string().describe("A descriptive string field"),
        ),
        Fixture::new("string-minlength", Shape::string().min_length(5)),
        Fixture::new("string-maxlength", Shape::string().max_length(50)),
        Fixture::new("string-length-range", Shape::string().min_length(3).max_length(20)),
        Fixture::new("string-email", Shape::string().email()),
        Fixture::new("string-url", Shape::string().url()),
        Fixture::new("string-uuid", Shape::string().uuid()),
        Fixture::new("string-pattern", Shape::string().regex("^[A-Z][a-z]+")),
        Fixture::new("string-literal", Shape::literal("exact-value")),
        Fixture::new(
            "string-email-required",
            Shape::string().email().min_length(5).max_length(100),
        ),
        Fixture::new(
            "string-nullable-with-default",
            Shape::string().nullable().default("fallback"),
        ),
    ]
}

fn integer_fixtures() -> Vec<Fixture> {
    vec![
        Fixture::new("integer-basic", Shape::integer()),
        Fixture::new("integer-nullable", Shape::integer().nullable()),
        Fixture::new("integer-with-default", Shape::integer().default(42)),
        Fixture::new(
            "integer-with-description",
            Shape::integer().describe("A numeric integer field"),
        ),
        Fixture::new("integer-min", Shape::integer().minimum(0)),
        Fixture::new("integer-max", Shape::integer().maximum(100)),
        Fixture::new("integer-range", Shape::integer().minimum(1).maximum(10)),
        Fixture::new("integer-positive", Shape::integer().positive()),
        Fixture::new("integer-negative", Shape::integer().negative()),
        Fixture::new("integer-nonnegative", Shape::integer().nonnegative()),
        Fixture::new("integer-nonpositive", Shape::integer().nonpositive()),
        Fixture::new(
            "integer-age-example",
            Shape::integer().minimum(0).maximum(120).default(0),
        ),
    ]
}

// 3.14 is a sample default, not an approximation of pi.
#[allow(clippy::approx_constant)]
fn double_fixtures() -> Vec<Fixture> {
    vec![
        Fixture::new("double-basic", Shape::number()),
        Fixture::new("double-nullable", Shape::number().nullable()),
        Fixture::new("double-with-default", Shape::number().default(3.14)),
        Fixture::new(
            "double-with-description",
            Shape::number().describe("A floating point number"),
        ),
        Fixture::new("double-min", Shape::number().minimum(0.0)),
        Fixture::new("double-max", Shape::number().maximum(100.0)),
        Fixture::new("double-range", Shape::number().minimum(0.0).maximum(1.0)),
        Fixture::new("double-positive", Shape::number().positive()),
        Fixture::new("double-finite", Shape::number().finite()),
        Fixture::new(
            "double-price-example",
            Shape::number().minimum(0.01).maximum(999_999.99).default(0.0),
        ),
    ]
}

fn boolean_fixtures() -> Vec<Fixture> {
    vec![
        Fixture::new("boolean-basic", Shape::boolean()),
        Fixture::new("boolean-nullable", Shape::boolean().nullable()),
        Fixture::new("boolean-with-default-true", Shape::boolean().default(true)),
        Fixture::new("boolean-with-default-false", Shape::boolean().default(false)),
        Fixture::new(
            "boolean-with-description",
            Shape::boolean().describe("A flag indicating status"),
        ),
    ]
}

fn any_fixtures() -> Vec<Fixture> {
    vec![
        Fixture::new("any-basic", Shape::any()),
        Fixture::new("any-nullable", Shape::any().nullable()),
        Fixture::new("any-with-default", Shape::any().default("default-any-value")),
        Fixture::new(
            "any-with-description",
            Shape::any().describe("Accepts any value type"),
        ),
    ]
}

fn list_fixtures() -> Vec<Fixture> {
    vec![
        Fixture::new("list-of-strings", Shape::array(Shape::string())),
        Fixture::new("list-of-integers", Shape::array(Shape::integer())),
        Fixture::new("list-nullable", Shape::array(Shape::string()).nullable()),
        Fixture::new(
            "list-with-description",
            Shape::array(Shape::string()).describe("A list of string values"),
        ),
        Fixture::new("list-minlength", Shape::array(Shape::string()).min_length(1)),
        Fixture::new("list-maxlength", Shape::array(Shape::string()).max_length(10)),
        Fixture::new(
            "list-length-range",
            Shape::array(Shape::integer()).min_length(2).max_length(5),
        ),
        Fixture::new("list-of-emails", Shape::array(Shape::string().email())),
        Fixture::new(
            "list-of-objects",
            Shape::array(Shape::object([
                ("id", Shape::integer()),
                ("name", Shape::string()),
            ])),
        ),
    ]
}

fn object_fixtures() -> Vec<Fixture> {
    let empty = || Shape::object(Vec::<(&str, Shape)>::new());
    vec![
        Fixture::new("object-basic", empty()),
        Fixture::new("object-nullable", empty().nullable()),
        Fixture::new(
            "object-with-description",
            empty().describe("An object with properties"),
        ),
        Fixture::new(
            "object-simple-user",
            Shape::object([("name", Shape::string()), ("age", Shape::integer())]),
        ),
        Fixture::new(
            "object-required-fields",
            Shape::object([
                ("id", Shape::integer()),
                ("email", Shape::string().email()),
                ("isActive", Shape::boolean().default(true)),
            ]),
        ),
        Fixture::new(
            "object-optional-fields",
            Shape::object([
                ("name", Shape::string()),
                ("nickname", Shape::string().optional()),
                ("age", Shape::integer().optional()),
            ]),
        ),
        Fixture::new(
            "object-nested",
            Shape::object([
                (
                    "user",
                    Shape::object([
                        ("name", Shape::string()),
                        ("email", Shape::string().email()),
                    ]),
                ),
                (
                    "settings",
                    Shape::object([
                        ("theme", Shape::string().default("light")),
                        ("notifications", Shape::boolean().default(true)),
                    ]),
                ),
            ]),
        ),
        Fixture::new(
            "object-with-array",
            Shape::object([
                ("title", Shape::string()),
                ("tags", Shape::array(Shape::string())),
                (
                    "ratings",
                    Shape::array(Shape::integer().minimum(1).maximum(5)),
                ),
            ]),
        ),
        Fixture::new(
            "object-additional-properties-allowed",
            Shape::object([("name", Shape::string())]).passthrough(),
        ),
        Fixture::new(
            "object-comprehensive",
            Shape::object([
                ("id", Shape::integer().positive()),
                ("email", Shape::string().email().min_length(5).max_length(100)),
                ("name", Shape::string().min_length(2).max_length(50)),
                ("age", Shape::integer().minimum(0).maximum(120).nullable()),
                ("tags", Shape::array(Shape::string()).nullable()),
                ("isActive", Shape::boolean().default(true)),
                ("metadata", Shape::any().optional()),
            ])
            .describe("A comprehensive user object"),
        ),
    ]
}

fn union_fixtures() -> Vec<Fixture> {
    let string_or_int = || Shape::union([Shape::string(), Shape::integer()]);
    vec![
        Fixture::new("anyof-string-or-integer", string_or_int()),
        Fixture::new("anyof-nullable", string_or_int().nullable()),
        Fixture::new(
            "anyof-with-description",
            Shape::union([Shape::string(), Shape::boolean()])
                .describe("Either a string or boolean value"),
        ),
        Fixture::new(
            "anyof-multiple-types",
            Shape::union([
                Shape::string(),
                Shape::integer(),
                Shape::boolean(),
                Shape::array(Shape::string()),
            ]),
        ),
        Fixture::new(
            "anyof-objects",
            Shape::union([
                Shape::object([
                    ("type", Shape::literal("text")),
                    ("content", Shape::string()),
                ]),
                Shape::object([
                    ("type", Shape::literal("number")),
                    ("value", Shape::integer()),
                ]),
            ]),
        ),
    ]
}

fn discriminated_fixtures() -> Result<Vec<Fixture>, ShapeError> {
    let basic = Shape::discriminated_union(
        "type",
        [
            Shape::object([
                ("type", Shape::literal("user")),
                ("name", Shape::string()),
                ("email", Shape::string()),
            ]),
            Shape::object([
                ("type", Shape::literal("admin")),
                ("name", Shape::string()),
                ("role", Shape::string()),
            ]),
        ],
    )?;

    let media = Shape::discriminated_union(
        "kind",
        [
            Shape::object([
                ("kind", Shape::literal("text")),
                ("content", Shape::string()),
            ]),
            Shape::object([
                ("kind", Shape::literal("image")),
                ("url", Shape::string().url()),
            ]),
        ],
    )?;

    let events = Shape::discriminated_union(
        "eventType",
        [
            Shape::object([
                ("eventType", Shape::literal("click")),
                ("x", Shape::integer()),
                ("y", Shape::integer()),
            ]),
            Shape::object([
                ("eventType", Shape::literal("scroll")),
                ("delta", Shape::integer()),
            ]),
        ],
    )?;

    let payments = Shape::discriminated_union(
        "paymentMethod",
        [
            Shape::object([
                ("paymentMethod", Shape::literal("card")),
                ("cardNumber", Shape::string().min_length(16).max_length(16)),
                ("cvv", Shape::string().min_length(3).max_length(4)),
                ("expiryDate", Shape::string()),
            ]),
            Shape::object([
                ("paymentMethod", Shape::literal("bank")),
                ("accountNumber", Shape::string()),
                ("routingNumber", Shape::string()),
            ]),
            Shape::object([
                ("paymentMethod", Shape::literal("crypto")),
                ("wallet", Shape::string()),
                ("currency", Shape::string()),
            ]),
        ],
    )?;

    Ok(vec![
        Fixture::new("discriminated-basic", basic),
        Fixture::new("discriminated-nullable", media.nullable()),
        Fixture::new(
            "discriminated-with-description",
            events.describe("A discriminated event union"),
        ),
        Fixture::new("discriminated-complex", payments),
    ])
}

fn enum_fixtures() -> Vec<Fixture> {
    vec![
        Fixture::new("enum-user-role", Shape::enumeration(roles())),
        Fixture::new("enum-status", Shape::enumeration(statuses())),
        Fixture::new("enum-nullable", Shape::enumeration(roles()).nullable()),
        Fixture::new("enum-with-default", Shape::enumeration(roles()).default("user")),
        Fixture::new(
            "enum-with-description",
            Shape::enumeration(statuses()).describe("Status of the entity"),
        ),
    ]
}
