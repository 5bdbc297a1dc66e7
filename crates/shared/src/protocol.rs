use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumbersResponse {
    pub list: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyNumberRequest {
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyNumberResponse {
    pub input: i64,
    pub action: String,
    pub updated: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// One input of a replayed sequence and the ledger as it stood afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayStep {
    pub input: i64,
    pub list: Vec<i64>,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayResponse {
    pub sequence: Vec<i64>,
    pub steps: Vec<ReplayStep>,
    #[serde(rename = "final")]
    pub final_list: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_request_requires_integer_value() {
        let ok: ApplyNumberRequest = serde_json::from_str(r#"{"value": -6}"#).expect("json");
        assert_eq!(ok.value, -6);

        assert!(serde_json::from_str::<ApplyNumberRequest>(r#"{}"#).is_err());
        assert!(serde_json::from_str::<ApplyNumberRequest>(r#"{"value": "6"}"#).is_err());
        assert!(serde_json::from_str::<ApplyNumberRequest>(r#"{"value": 1.5}"#).is_err());
    }

    #[test]
    fn replay_response_uses_final_key() {
        let response = ReplayResponse {
            sequence: vec![5],
            steps: vec![ReplayStep {
                input: 5,
                list: vec![5],
                action: "list empty, appended 5".into(),
            }],
            final_list: vec![5],
        };
        let value = serde_json::to_value(&response).expect("json");
        assert_eq!(value["final"], serde_json::json!([5]));
        assert_eq!(value["steps"][0]["list"], serde_json::json!([5]));
    }
}
