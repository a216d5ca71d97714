//! Success/failure envelope for callable operations

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Payload {
        url: String,
    }

    #[test]
    fn test_envelope_flattens_data() {
        let ok = serde_json::to_value(Envelope::success("done", Payload { url: "u".into() })).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["url"], "u");

        let failed = serde_json::to_value(Envelope::<Payload>::failure("nope")).unwrap();
        assert_eq!(failed["success"], false);
        assert!(failed.get("url").is_none());
    }
}
