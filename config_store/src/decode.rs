//! Shape-checked decoding of the configuration payload.
//!
//! The payload is parsed into a `serde_json::Value` first (a key repeated
//! inside one object keeps its last value), then walked against the document
//! shape before the typed conversion:
//! - every object position must hold a JSON object, never an array;
//! - `null` anywhere, including as an array element or as the whole payload,
//!   becomes the empty value for that position.

use serde::de::Error as _;
use serde_json::{Map, Value};

use crate::model::Document;

enum Shape {
    Object(&'static [(&'static str, Shape)]),
    Array(&'static Shape),
    Text,
}

const S3_BACKEND: Shape = Shape::Object(&[
    ("bucket", Shape::Text),
    ("key", Shape::Text),
    ("region", Shape::Text),
]);

const TERRAFORM_BACKEND: Shape = Shape::Object(&[("s3", S3_BACKEND)]);

const IAM_ROLE: Shape = Shape::Object(&[("roleName", Shape::Text), ("policyArn", Shape::Text)]);

const ENVIRONMENT: Shape = Shape::Object(&[
    ("name", Shape::Text),
    ("awsAccountId", Shape::Text),
    ("iamRoles", Shape::Array(&IAM_ROLE)),
    ("terraformBackend", TERRAFORM_BACKEND),
]);

const APP: Shape = Shape::Object(&[
    ("appName", Shape::Text),
    ("environments", Shape::Array(&ENVIRONMENT)),
]);

const REPOSITORY: Shape = Shape::Object(&[
    ("name", Shape::Text),
    ("url", Shape::Text),
    ("apps", Shape::Array(&APP)),
]);

const DOCUMENT: Shape = Shape::Object(&[("repositories", Shape::Array(&REPOSITORY))]);

/// Decode a JSON payload into a [`Document`].
pub fn document_from_slice(payload: &[u8]) -> Result<Document, serde_json::Error> {
    let mut value: Value = serde_json::from_slice(payload)?;
    normalize(&mut value, &DOCUMENT, "$")?;
    serde_json::from_value(value)
}

fn normalize(value: &mut Value, shape: &Shape, at: &str) -> Result<(), serde_json::Error> {
    if value.is_null() {
        *value = match shape {
            Shape::Object(_) => Value::Object(Map::new()),
            Shape::Array(_) => Value::Array(Vec::new()),
            Shape::Text => Value::String(String::new()),
        };
        return Ok(());
    }

    match (shape, value) {
        (Shape::Object(fields), Value::Object(map)) => {
            for (name, field_shape) in fields.iter() {
                if let Some(v) = map.get_mut(*name) {
                    normalize(v, field_shape, &format!("{at}.{name}"))?;
                }
            }
        }
        (Shape::Array(item_shape), Value::Array(items)) => {
            for (i, item) in items.iter_mut().enumerate() {
                normalize(item, item_shape, &format!("{at}[{i}]"))?;
            }
        }
        (Shape::Object(_), other) => {
            return Err(serde_json::Error::custom(format!(
                "expected an object at {at}, found {}",
                kind(other)
            )));
        }
        (Shape::Array(_), other) => {
            return Err(serde_json::Error::custom(format!(
                "expected an array at {at}, found {}",
                kind(other)
            )));
        }
        // Non-string scalars are reported by the typed conversion.
        (Shape::Text, _) => {}
    }
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
