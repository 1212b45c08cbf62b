use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Error;

pub type Params = Map<String, Value>;

pub trait ToParams {
    fn to_params(&self) -> Result<Params, Error>;
}

impl<T: Serialize> ToParams for T {
    fn to_params(&self) -> Result<Params, Error> {
        match serde_json::to_value(self).map_err(Error::Encode)? {
            Value::Object(params) => Ok(params),
            other => Err(Error::Encode(serde::ser::Error::custom(format!(
                "expected an object, got `{other}`"
            )))),
        }
    }
}

/// Text of a multipart form field. Strings go raw, everything else as JSON.
pub fn form_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
