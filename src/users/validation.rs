//! Payload decoding and the `{ name: string, min 3, required }` schema.
//!
//! Rules are checked in a fixed order and the first violation's message is
//! what the client sees.

use serde_json::{Map, Value};

use super::error::RegistryError;
use super::model::NewUser;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Turns a raw body into a JSON value.
///
/// Form bodies become an object of strings; everything else is read as JSON.
/// An empty body is an empty object.
pub fn decode_payload(content_type: Option<&str>, body: &[u8]) -> Result<Value, RegistryError> {
    if content_type == Some(FORM_URLENCODED) {
        let fields: Map<String, Value> = url::form_urlencoded::parse(body)
            .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
            .collect();
        return Ok(Value::Object(fields));
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(body)
        .map_err(|e| RegistryError::Validation(format!("invalid JSON body: {e}")))
}

/// Checks `payload` against the user schema.
pub fn validate(payload: &Value) -> Result<NewUser, RegistryError> {
    let Value::Object(fields) = payload else {
        return Err(invalid("\"value\" must be of type object"));
    };

    // Declared keys are checked before undeclared ones are rejected.
    let new = match fields.get("name") {
        None | Some(Value::Null) => return Err(invalid("\"name\" is required")),
        Some(Value::String(name)) => NewUser::new(name.as_str())?,
        Some(_) => return Err(invalid("\"name\" must be a string")),
    };

    if let Some(unknown) = fields.keys().find(|k| k.as_str() != "name") {
        return Err(invalid(format!("\"{unknown}\" is not allowed")));
    }

    Ok(new)
}

fn invalid(message: impl Into<String>) -> RegistryError {
    RegistryError::Validation(message.into())
}
