use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Subsystem name → status, in the order the backend reported them.
pub type HealthReport = IndexMap<String, SubsystemHealth>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthEnvelope {
    #[serde(default)]
    pub health: Option<HealthReport>,
}

/// One subsystem entry. A missing, null or non-string field never fails the
/// whole report; it only makes that entry read as unhealthy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsystemHealth {
    #[serde(default)]
    pub status: HealthStatus,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: String,
}

/// Only the literal `healthy` is healthy; any other value is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Value>", into = "String")]
pub enum HealthStatus {
    Healthy,
    Unhealthy(String),
}

impl Default for HealthStatus {
    fn default() -> Self {
        HealthStatus::Unhealthy(String::new())
    }
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

impl From<String> for HealthStatus {
    fn from(raw: String) -> Self {
        if raw == "healthy" {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy(raw)
        }
    }
}

impl From<Option<Value>> for HealthStatus {
    fn from(raw: Option<Value>) -> Self {
        match raw {
            Some(Value::String(text)) => HealthStatus::from(text),
            Some(Value::Null) | None => HealthStatus::default(),
            Some(other) => HealthStatus::Unhealthy(other.to_string()),
        }
    }
}

impl From<HealthStatus> for String {
    fn from(status: HealthStatus) -> Self {
        match status {
            HealthStatus::Healthy => "healthy".to_string(),
            HealthStatus::Unhealthy(raw) => raw,
        }
    }
}

/// Strings pass through; null reads as empty and anything else as its JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => text,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_keeps_backend_order() {
        let envelope: HealthEnvelope = serde_json::from_value(json!({
            "health": {
                "vectorstore": {"status": "healthy", "message": "ok"},
                "db": {"status": "unhealthy", "message": "timeout"},
                "llm": {"status": "degraded", "message": "slow"}
            }
        }))
        .unwrap();
        let report = envelope.health.unwrap();
        let names: Vec<&str> = report.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["vectorstore", "db", "llm"]);
        assert!(report["vectorstore"].status.is_healthy());
        assert_eq!(
            report["llm"].status,
            HealthStatus::Unhealthy("degraded".to_string())
        );
    }

    #[test]
    fn test_status_match_is_case_sensitive() {
        assert!(!HealthStatus::from("Healthy".to_string()).is_healthy());
    }

    #[test]
    fn test_missing_health_key_is_none() {
        let envelope: HealthEnvelope = serde_json::from_value(json!({"status": "ok"})).unwrap();
        assert!(envelope.health.is_none());
    }

    #[test]
    fn test_odd_entries_read_unhealthy_without_failing_report() {
        let envelope: HealthEnvelope = serde_json::from_value(json!({
            "health": {
                "vectorstore": {"status": "healthy", "message": "ok"},
                "db": {"status": null, "message": "down"},
                "cache": {"status": 503, "message": null},
                "llm": {"message": 42}
            }
        }))
        .unwrap();
        let report = envelope.health.unwrap();
        let names: Vec<&str> = report.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["vectorstore", "db", "cache", "llm"]);

        assert!(report["vectorstore"].status.is_healthy());
        assert_eq!(report["db"].status, HealthStatus::Unhealthy(String::new()));
        assert_eq!(report["db"].message, "down");
        assert_eq!(report["cache"].status, HealthStatus::Unhealthy("503".to_string()));
        assert_eq!(report["cache"].message, "");
        assert!(!report["llm"].status.is_healthy());
        assert_eq!(report["llm"].message, "42");
    }
}
