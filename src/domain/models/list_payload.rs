#[cfg(test)]
#[path = "list_payload_test.rs"]
mod tests;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::Failure;

/// The shapes a list endpoint is known to answer with.
#[derive(Clone, Debug, PartialEq)]
pub enum ListPayload<T> {
    Bare(Vec<T>),
    Items(Vec<T>),
    Data(Vec<T>),
    Empty,
}

impl<T: DeserializeOwned> ListPayload<T> {
    /// Classifies a response body. Priority is a bare array first, then an
    /// `items` array, then a `data` array. Anything else is `Empty`.
    /// Elements that do not decode as `T` are a `Failure::Decode`, not an
    /// empty list.
    pub fn decode(body: Value) -> Result<ListPayload<T>, Failure> {
        match body {
            Value::Array(_) => {
                return Ok(ListPayload::Bare(serde_json::from_value(body)?));
            }
            Value::Object(mut envelope) => {
                if let Some(items) = envelope.remove("items").filter(|e| return e.is_array()) {
                    return Ok(ListPayload::Items(serde_json::from_value(items)?));
                }
                if let Some(data) = envelope.remove("data").filter(|e| return e.is_array()) {
                    return Ok(ListPayload::Data(serde_json::from_value(data)?));
                }

                return Ok(ListPayload::Empty);
            }
            _ => {
                return Ok(ListPayload::Empty);
            }
        }
    }
}

impl<T> ListPayload<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListPayload::Bare(items) | ListPayload::Items(items) | ListPayload::Data(items) => {
                return items;
            }
            ListPayload::Empty => {
                return vec![];
            }
        }
    }
}
