//! Response envelope helpers: `{"<key>": data}` bodies.

use axum::{http::StatusCode, Json};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Serializes as a one-entry object, e.g. `{"topics": [...]}`.
pub struct Keyed<T> {
    pub key: &'static str,
    pub data: T,
}

impl<T: Serialize> Serialize for Keyed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, &self.data)?;
        map.end()
    }
}

pub fn ok<T: Serialize>(key: &'static str, data: T) -> (StatusCode, Json<Keyed<T>>) {
    (StatusCode::OK, Json(Keyed { key, data }))
}

pub fn created<T: Serialize>(key: &'static str, data: T) -> (StatusCode, Json<Keyed<T>>) {
    (StatusCode::CREATED, Json(Keyed { key, data }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_wraps_data_under_key() {
        let v = serde_json::to_value(Keyed { key: "topics", data: vec!["mitch"] }).unwrap();
        assert_eq!(v, serde_json::json!({ "topics": ["mitch"] }));
    }
}
