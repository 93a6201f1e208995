//! Local user records.

use serde::Serialize;
use serde_json::Value;

/// A user known to the local Keybase installation.
///
/// Wraps exactly one raw record from the `users` section of the config.
/// Construction never fails; the accessors return `None` for fields the
/// record does not carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct User {
    record: Value,
}

impl User {
    pub fn new(record: Value) -> Self {
        Self { record }
    }

    /// The username.
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// The Keybase user ID.
    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    /// The device ID provisioned for this user.
    pub fn device(&self) -> Option<&str> {
        self.str_field("device")
    }

    pub fn eldest_kid(&self) -> Option<&str> {
        self.str_field("eldest_kid")
    }

    pub fn salt(&self) -> Option<&str> {
        self.str_field("salt")
    }

    /// The record as it appears in the config file.
    pub fn record(&self) -> &Value {
        &self.record
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.record.get(key).and_then(Value::as_str)
    }
}

impl From<Value> for User {
    fn from(record: Value) -> Self {
        User::new(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors() {
        let user = User::new(json!({
            "name": "alice",
            "id": "0123",
            "device": "dev",
            "eldest_kid": "kid",
            "salt": "salt"
        }));
        assert_eq!(user.name(), Some("alice"));
        assert_eq!(user.id(), Some("0123"));
        assert_eq!(user.device(), Some("dev"));
        assert_eq!(user.eldest_kid(), Some("kid"));
        assert_eq!(user.salt(), Some("salt"));
    }

    #[test]
    fn test_non_object_record_still_constructs() {
        let user = User::from(json!("opaque"));
        assert_eq!(user.name(), None);
        assert_eq!(user.record(), &json!("opaque"));
    }

    #[test]
    fn test_serializes_as_raw_record() {
        let user = User::new(json!({"name": "bob", "extra": 1}));
        let out = serde_json::to_value(&user).unwrap();
        assert_eq!(out, json!({"name": "bob", "extra": 1}));
    }
}
