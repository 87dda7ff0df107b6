use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a provisioned instance. The provider may report
/// statuses this client does not know about; those round-trip verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InstanceStatus {
    Active,
    Stopped,
    Redeploying,
    Other(String),
}

impl From<String> for InstanceStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "active" => Self::Active,
            "stopped" => Self::Stopped,
            "redeploying" => Self::Redeploying,
            _ => Self::Other(s),
        }
    }
}

impl From<InstanceStatus> for String {
    fn from(status: InstanceStatus) -> Self {
        status.label().to_string()
    }
}

impl InstanceStatus {
    pub fn label(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Stopped => "stopped",
            Self::Redeploying => "redeploying",
            Self::Other(s) => s,
        }
    }
}

/// One provisioned database deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub id: String,
    pub name: String,
    pub region: String,
    pub status: InstanceStatus,
    pub vcpu: u32,
    pub memory_gb: u32,
    pub endpoint: String,
    pub cluster_id: String,
}

/// A named query stored on one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuery {
    pub id: Uuid,
    pub name: String,
    pub content: String,
}

/// The query subset sent in save and delete bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPayload {
    pub id: Uuid,
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQueriesResponse {
    pub queries: Vec<SavedQuery>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveQueryRequest {
    pub instance_name: String,
    pub cluster_id: String,
    pub region: String,
    pub query: QueryPayload,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQueryRequest {
    pub instance_name: String,
    pub cluster_id: String,
    pub region: String,
    pub query: QueryPayload,
}

/// Error body shape returned by the API on failures.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_status_round_trips_known_values() {
        for (s, expected) in [
            ("active", InstanceStatus::Active),
            ("stopped", InstanceStatus::Stopped),
            ("redeploying", InstanceStatus::Redeploying),
        ] {
            let parsed = InstanceStatus::from(s.to_string());
            assert_eq!(parsed, expected);
            assert_eq!(parsed.label(), s);
        }
    }

    #[test]
    fn instance_status_preserves_unknown_values() {
        let parsed = InstanceStatus::from("hibernating".to_string());
        assert_eq!(parsed, InstanceStatus::Other("hibernating".into()));
        assert_eq!(parsed.label(), "hibernating");
    }

    #[test]
    fn instance_deserializes_camel_case() {
        let json = r#"{
            "id": "inst-1",
            "name": "prod",
            "region": "eu-west-1",
            "status": "active",
            "vcpu": 4,
            "memoryGb": 16,
            "endpoint": "https://inst-1.db.example.com",
            "clusterId": "cl-9"
        }"#;
        let inst: Instance = serde_json::from_str(json).unwrap();
        assert_eq!(inst.memory_gb, 16);
        assert_eq!(inst.cluster_id, "cl-9");
        assert_eq!(inst.status, InstanceStatus::Active);
    }

    #[test]
    fn save_request_serializes_camel_case() {
        let req = SaveQueryRequest {
            instance_name: "prod".into(),
            cluster_id: "cl-9".into(),
            region: "eu-west-1".into(),
            query: QueryPayload {
                id: Uuid::nil(),
                name: "foo".into(),
                content: "QUERY foo ()".into(),
            },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("instanceName").is_some());
        assert!(json.get("clusterId").is_some());
        assert_eq!(json["query"]["name"], "foo");
    }
}
