use serde::{Deserialize, Serialize};

/// Marker used in a [`DeleteAck`] when the whole store was cleared.
pub const DELETED_ALL: &str = "all";

/// Acknowledgment returned by both delete routes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeleteAck {
    pub deleted: String,
}

impl DeleteAck {
    pub fn key(key: impl Into<String>) -> Self {
        Self { deleted: key.into() }
    }

    pub fn all() -> Self {
        Self { deleted: DELETED_ALL.to_string() }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyList {
    pub keys: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_ack_wire_shape() {
        let v = serde_json::to_value(DeleteAck::key("session-123")).unwrap();
        assert_eq!(v, serde_json::json!({"deleted": "session-123"}));
        let v = serde_json::to_value(DeleteAck::all()).unwrap();
        assert_eq!(v, serde_json::json!({"deleted": "all"}));
    }

    #[test]
    fn error_body_wire_shape() {
        let body = ErrorBody { error: "Key not found".into() };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"error":"Key not found"}"#);
    }
}
