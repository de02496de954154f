//! Conversion between serde types and DynamoDB attribute maps.
//!
//! Values go through `serde_json::Value` so any `Serialize`/`Deserialize` type
//! can be stored without hand-writing `AttributeValue` mappings per field.

use aws_sdk_dynamodb::types::AttributeValue;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

/// A single DynamoDB item (or key), attribute name to value
pub type Item = HashMap<String, AttributeValue>;

#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("item must serialize to a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("attribute `{0}` has an unsupported type")]
    UnsupportedAttribute(String),
    #[error("attribute `{0}` holds an invalid number")]
    InvalidNumber(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Serialize `value` into an attribute map
pub fn to_item<T: Serialize + ?Sized>(value: &T) -> Result<Item, ItemError> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(fields
            .into_iter()
            .map(|(name, value)| (name, to_attribute(value)))
            .collect()),
        other => Err(ItemError::NotAnObject(kind(&other))),
    }
}

/// Deserialize an attribute map into `T`
pub fn from_item<T: DeserializeOwned>(item: &Item) -> Result<T, ItemError> {
    let mut fields = Map::with_capacity(item.len());
    for (name, attribute) in item {
        fields.insert(name.clone(), from_attribute(name, attribute)?);
    }
    Ok(serde_json::from_value(Value::Object(fields))?)
}

/// Build a single-attribute string key
pub fn string_key(name: &str, value: &str) -> Item {
    HashMap::from([(name.to_string(), AttributeValue::S(value.to_string()))])
}

fn to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(values) => AttributeValue::L(values.into_iter().map(to_attribute).collect()),
        Value::Object(fields) => AttributeValue::M(
            fields
                .into_iter()
                .map(|(name, value)| (name, to_attribute(value)))
                .collect(),
        ),
    }
}

fn from_attribute(name: &str, attribute: &AttributeValue) -> Result<Value, ItemError> {
    let value = match attribute {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => Value::Number(parse_number(name, n)?),
        AttributeValue::Ss(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|n| parse_number(name, n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(|v| from_attribute(name, v))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(fields) => {
            let mut map = Map::with_capacity(fields.len());
            for (key, v) in fields {
                map.insert(key.clone(), from_attribute(key, v)?);
            }
            Value::Object(map)
        }
        // Binary attributes and anything the SDK adds later
        _ => return Err(ItemError::UnsupportedAttribute(name.to_string())),
    };
    Ok(value)
}

fn parse_number(name: &str, raw: &str) -> Result<Number, ItemError> {
    raw.parse::<Number>()
        .map_err(|_| ItemError::InvalidNumber(name.to_string()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::User;
    use aws_sdk_dynamodb::primitives::Blob;

    #[test]
    fn test_user_becomes_string_attributes() {
        let user = User {
            email: "a@b.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
        };
        let item = to_item(&user).unwrap();

        assert_eq!(item.len(), 3);
        assert_eq!(item["email"], AttributeValue::S("a@b.com".to_string()));
        assert_eq!(item["firstName"], AttributeValue::S("A".to_string()));
        assert_eq!(item["lastName"], AttributeValue::S("B".to_string()));
    }

    #[test]
    fn test_empty_item_decodes_to_empty_user() {
        let user: User = from_item(&Item::new()).unwrap();
        assert_eq!(user, User::default());
    }

    #[test]
    fn test_wrong_attribute_type_fails_to_decode() {
        let mut item = string_key("email", "a@b.com");
        item.insert("firstName".to_string(), AttributeValue::N("42".to_string()));

        let err = from_item::<User>(&item).unwrap_err();
        assert!(matches!(err, ItemError::Json(_)));
    }

    #[test]
    fn test_binary_attribute_is_unsupported() {
        let mut item = string_key("email", "a@b.com");
        item.insert("avatar".to_string(), AttributeValue::B(Blob::new(vec![1, 2, 3])));

        let err = from_item::<Value>(&item).unwrap_err();
        assert!(matches!(err, ItemError::UnsupportedAttribute(name) if name == "avatar"));
    }

    #[test]
    fn test_nested_values_and_sets() {
        let mut item = Item::new();
        item.insert("count".to_string(), AttributeValue::N("7".to_string()));
        item.insert(
            "tags".to_string(),
            AttributeValue::Ss(vec!["x".to_string(), "y".to_string()]),
        );
        item.insert(
            "meta".to_string(),
            AttributeValue::M(string_key("source", "import")),
        );

        let value: Value = from_item(&item).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"count": 7, "tags": ["x", "y"], "meta": {"source": "import"}})
        );
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = to_item(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, ItemError::NotAnObject("array")));
    }
}
