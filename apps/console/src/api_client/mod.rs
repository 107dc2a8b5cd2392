//! API client: every call from the console to the profile backend goes
//! through an `ApiTransport`.
//!
//! `HttpTransport` is the real implementation; `ScriptedTransport` replays
//! canned replies for hosts without a backend and for tests.
//! No retries and no timeouts: a request runs until it completes or fails.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::errors::ConsoleError;
use crate::models::{
    FeedbackReply, HealthEnvelope, HealthReport, Profile, ProfileEnvelope,
    ProfileRequest, SkillsReply, SkillsRequest,
};

mod scripted;

pub use scripted::{RecordedRequest, ScriptedTransport};

pub const HEALTH_CHECK_PATH: &str = "/api/health-check";
pub const GENERATE_PROFILE_PATH: &str = "/api/generate-profile";
pub const RETRIEVE_SKILLS_PATH: &str = "/api/retrieve-skills";
pub const SUBMIT_FEEDBACK_PATH: &str = "/submit-feedback";

const HEALTH_UNAVAILABLE: &str = "Unable to retrieve health data.";

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The network seam. Only transport failures are errors here; any HTTP
/// status comes back as a `RawResponse` for the caller to classify.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn get(&self, path: &str) -> Result<RawResponse, ConsoleError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<RawResponse, ConsoleError>;
}

/// `reqwest`-backed transport resolving paths against the configured base URL.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, ConsoleError> {
        let mut base_url = config.api_base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: Client::builder().build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url, ConsoleError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ConsoleError::Transport(format!("invalid endpoint path '{path}': {e}")))
    }

    async fn finish(response: reqwest::Response) -> Result<RawResponse, ConsoleError> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "API response received");
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get(&self, path: &str) -> Result<RawResponse, ConsoleError> {
        let url = self.resolve(path)?;
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        Self::finish(response).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<RawResponse, ConsoleError> {
        let url = self.resolve(path)?;
        debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().await?;
        Self::finish(response).await
    }
}

/// A decoded 2xx reply plus the body's own `error` field, if it carried one.
#[derive(Debug, Clone)]
pub struct Reply<T> {
    pub payload: T,
    pub server_error: Option<String>,
}

/// Classifies a response: non-2xx becomes `Server` carrying the body's
/// reason when there is one; a 2xx body must be JSON shaped like `T`.
pub fn decode<T: DeserializeOwned>(response: RawResponse) -> Result<Reply<T>, ConsoleError> {
    if !response.is_success() {
        let reason = serde_json::from_str::<Value>(&response.body)
            .ok()
            .as_ref()
            .and_then(error_reason);
        return Err(ConsoleError::Server {
            status: response.status,
            reason,
        });
    }

    // `T` is read from the raw text so object key order survives into ordered maps.
    let value: Value = serde_json::from_str(&response.body)?;
    let server_error = error_reason(&value);
    let payload = match serde_json::from_str::<T>(&response.body) {
        Ok(payload) => payload,
        Err(err) => {
            return Err(match server_error {
                Some(reason) => ConsoleError::MissingPayload {
                    reason: Some(reason),
                },
                None => ConsoleError::Malformed(err),
            })
        }
    };
    Ok(Reply {
        payload,
        server_error,
    })
}

/// Pulls a human-readable reason out of `{"error": "..."}` or
/// `{"error": {"message": "..."}}`.
pub fn error_reason(body: &Value) -> Option<String> {
    let reason = match body.get("error")? {
        Value::String(text) => text.clone(),
        Value::Object(detail) => detail.get("message")?.as_str()?.to_string(),
        _ => return None,
    };
    if reason.trim().is_empty() {
        None
    } else {
        Some(reason)
    }
}

/// Unwraps the profile from a 2xx reply, treating an absent profile or an
/// error-only profile as a missing payload.
pub fn profile_from_reply(reply: Reply<ProfileEnvelope>) -> Result<Profile, ConsoleError> {
    let Reply {
        payload,
        server_error,
    } = reply;

    if let Some(stats) = &payload.stats {
        debug!(time_taken = stats.time_taken, "profile generated");
    }

    match payload.profile {
        Some(profile) => match profile.generation_error() {
            Some(reason) => Err(ConsoleError::MissingPayload {
                reason: Some(reason.to_string()),
            }),
            None => Ok(profile),
        },
        None => Err(ConsoleError::MissingPayload {
            reason: server_error,
        }),
    }
}

pub fn health_from_reply(reply: Reply<HealthEnvelope>) -> Result<HealthReport, ConsoleError> {
    reply
        .payload
        .health
        .ok_or_else(|| ConsoleError::MissingPayload {
            reason: Some(HEALTH_UNAVAILABLE.to_string()),
        })
}

pub async fn fetch_health(api: &dyn ApiTransport) -> Result<HealthReport, ConsoleError> {
    let response = api.get(HEALTH_CHECK_PATH).await?;
    health_from_reply(decode(response)?)
}

pub async fn generate_profile(
    api: &dyn ApiTransport,
    request: &ProfileRequest,
) -> Result<Profile, ConsoleError> {
    let body = serde_json::to_value(request)?;
    let response = api.post_json(GENERATE_PROFILE_PATH, &body).await?;
    profile_from_reply(decode(response)?)
}

/// The server's confirmation message from a 2xx feedback reply.
pub fn feedback_from_reply(reply: Reply<FeedbackReply>) -> Result<String, ConsoleError> {
    reply.payload.message.ok_or(ConsoleError::MissingPayload {
        reason: reply.server_error,
    })
}

pub async fn retrieve_skills(
    api: &dyn ApiTransport,
    profession: &str,
) -> Result<Vec<String>, ConsoleError> {
    let body = serde_json::to_value(SkillsRequest {
        profession: profession.to_string(),
    })?;
    let response = api.post_json(RETRIEVE_SKILLS_PATH, &body).await?;
    let reply: Reply<SkillsReply> = decode(response)?;
    reply
        .payload
        .keywords
        .ok_or(ConsoleError::MissingPayload {
            reason: reply.server_error,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HealthStatus;
    use serde_json::json;

    #[test]
    fn test_error_reason_reads_string_and_object_forms() {
        assert_eq!(
            error_reason(&json!({"error": "bad input"})).as_deref(),
            Some("bad input")
        );
        assert_eq!(
            error_reason(&json!({"error": {"code": "X", "message": "nested"}})).as_deref(),
            Some("nested")
        );
        assert!(error_reason(&json!({"error": 42})).is_none());
        assert!(error_reason(&json!({"error": ""})).is_none());
        assert!(error_reason(&json!({"profile": {}})).is_none());
    }

    #[test]
    fn test_decode_non_success_carries_server_reason() {
        let response = RawResponse::json(500, &json!({"error": "vectorstore offline"}));
        let err = decode::<ProfileEnvelope>(response).unwrap_err();
        match err {
            ConsoleError::Server { status, reason } => {
                assert_eq!(status, 500);
                assert_eq!(reason.as_deref(), Some("vectorstore offline"));
            }
            other => panic!("expected Server error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_non_success_with_html_body_has_no_reason() {
        let response = RawResponse::new(502, "<html>Bad Gateway</html>");
        let err = decode::<ProfileEnvelope>(response).unwrap_err();
        assert_eq!(
            err.user_message(),
            "Error: Unexpected response from the server."
        );
    }

    #[test]
    fn test_decode_success_with_invalid_json_is_malformed() {
        let err = decode::<ProfileEnvelope>(RawResponse::new(200, "not json")).unwrap_err();
        assert!(matches!(err, ConsoleError::Malformed(_)));
    }

    #[test]
    fn test_profile_missing_uses_body_error() {
        let reply = decode::<ProfileEnvelope>(RawResponse::json(
            200,
            &json!({"error": "generation disabled"}),
        ))
        .unwrap();
        let err = profile_from_reply(reply).unwrap_err();
        assert_eq!(err.user_message(), "Error: generation disabled");
    }

    #[test]
    fn test_error_only_profile_is_missing_payload() {
        let reply = decode::<ProfileEnvelope>(RawResponse::json(
            200,
            &json!({"profile": {"error": "openai timeout"}}),
        ))
        .unwrap();
        let err = profile_from_reply(reply).unwrap_err();
        assert_eq!(err.user_message(), "Error: openai timeout");
    }

    #[tokio::test]
    async fn test_fetch_health_without_health_key() {
        let api = ScriptedTransport::new();
        api.push_json(200, json!({"status": "ok"}));
        let err = fetch_health(&api).await.unwrap_err();
        assert_eq!(err.user_message(), "Error: Unable to retrieve health data.");
        assert_eq!(api.requests()[0].path, HEALTH_CHECK_PATH);
    }

    #[tokio::test]
    async fn test_fetch_health_parses_report() {
        let api = ScriptedTransport::new();
        api.push_json(
            200,
            json!({"health": {"db": {"status": "unhealthy", "message": "timeout"}}}),
        );
        let report = fetch_health(&api).await.unwrap();
        assert_eq!(
            report["db"].status,
            HealthStatus::Unhealthy("unhealthy".to_string())
        );
        assert_eq!(report["db"].message, "timeout");
    }

    #[tokio::test]
    async fn test_generate_profile_posts_request_body() {
        let api = ScriptedTransport::new();
        api.push_json(200, json!({"profile": {"elevator_pitch": "X", "About Me": "Y"}}));
        let request = ProfileRequest {
            profession: "Engineer".to_string(),
            experience_level: "Senior".to_string(),
            keywords: vec!["a".to_string(), "b".to_string()],
            background: None,
            resume: None,
            target_goal: None,
        };

        let profile = generate_profile(&api, &request).await.unwrap();
        assert_eq!(profile.elevator_pitch_text(), "X");

        let sent = &api.requests()[0];
        assert_eq!(sent.path, GENERATE_PROFILE_PATH);
        assert_eq!(sent.body.as_ref().unwrap()["keywords"], json!(["a", "b"]));
    }

    #[test]
    fn test_feedback_reply_returns_message_or_reason() {
        let ok = decode::<FeedbackReply>(RawResponse::json(200, &json!({"message": "Thanks!"})));
        assert_eq!(feedback_from_reply(ok.unwrap()).unwrap(), "Thanks!");

        let bare = decode::<FeedbackReply>(RawResponse::json(200, &json!({"error": "closed"})));
        let err = feedback_from_reply(bare.unwrap()).unwrap_err();
        assert_eq!(err.user_message(), "Error: closed");
    }

    #[test]
    fn test_wrong_shape_with_error_field_keeps_server_reason() {
        let err = decode::<ProfileEnvelope>(RawResponse::json(
            200,
            &json!({"error": "quota", "profile": "n/a"}),
        ))
        .unwrap_err();
        assert_eq!(err.user_message(), "Error: quota");

        let err = decode::<ProfileEnvelope>(RawResponse::json(
            200,
            &json!({"error": "bad keywords", "profile": {"retrieved_keywords": [1, 2]}}),
        ))
        .unwrap_err();
        assert_eq!(err.user_message(), "Error: bad keywords");
    }

    #[test]
    fn test_wrong_shape_without_reason_is_malformed() {
        let err = decode::<ProfileEnvelope>(RawResponse::json(200, &json!({"profile": "n/a"})))
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Malformed(_)));
    }

    #[test]
    fn test_decode_keeps_health_key_order() {
        let body = r#"{"health":{"vectorstore":{"status":"healthy","message":"ok"},"db":{"status":"unhealthy","message":"timeout"},"api":{"status":"healthy","message":"ok"}}}"#;
        let report = health_from_reply(decode(RawResponse::new(200, body)).unwrap()).unwrap();
        let names: Vec<&str> = report.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["vectorstore", "db", "api"]);
    }

    #[tokio::test]
    async fn test_retrieve_skills_returns_keywords() {
        let api = ScriptedTransport::new();
        api.push_json(200, json!({"keywords": ["Rust", "Tokio"]}));
        let keywords = retrieve_skills(&api, "Backend Engineer").await.unwrap();
        assert_eq!(keywords, vec!["Rust", "Tokio"]);
        assert_eq!(
            api.requests()[0].body,
            Some(json!({"profession": "Backend Engineer"}))
        );
    }

    #[test]
    fn test_http_transport_keeps_base_path() {
        let config = Config::with_base_url("http://localhost:5000/console").unwrap();
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(
            transport.resolve(HEALTH_CHECK_PATH).unwrap().as_str(),
            "http://localhost:5000/console/api/health-check"
        );
    }
}
