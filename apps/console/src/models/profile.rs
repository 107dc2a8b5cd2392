use serde::{Deserialize, Serialize};

pub const NO_ELEVATOR_PITCH: &str = "No elevator pitch generated.";
pub const NO_ABOUT_ME: &str = "No About Me section generated.";

/// Body of `POST /api/generate-profile`. Built fresh for every submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub profession: String,
    pub experience_level: String,
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_goal: Option<String>,
}

/// Top-level reply of the profile endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileEnvelope {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub stats: Option<GenerationStats>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationStats {
    pub time_taken: f64,
}

/// Generated profile sections. Every key is optional; empty strings count as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub elevator_pitch: Option<String>,
    #[serde(rename = "About Me", default)]
    pub about_me: Option<String>,
    #[serde(default)]
    pub retrieved_keywords: Option<KeywordList>,
    #[serde(default)]
    pub reason: Option<String>,
    /// Set by the backend when generation failed inside an otherwise successful reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Keywords arrive either as a JSON array or as one comma-joined string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeywordList {
    Many(Vec<String>),
    Joined(String),
}

impl KeywordList {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            KeywordList::Many(items) => items
                .iter()
                .map(|k| k.trim())
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect(),
            KeywordList::Joined(joined) => split_keywords(joined),
        }
    }
}

impl Profile {
    pub fn elevator_pitch_text(&self) -> &str {
        non_empty(&self.elevator_pitch).unwrap_or(NO_ELEVATOR_PITCH)
    }

    pub fn about_me_text(&self) -> &str {
        non_empty(&self.about_me).unwrap_or(NO_ABOUT_ME)
    }

    /// Retrieved keywords, empty when absent.
    pub fn keywords(&self) -> Vec<String> {
        self.retrieved_keywords
            .as_ref()
            .map(KeywordList::to_vec)
            .unwrap_or_default()
    }

    pub fn reason_text(&self) -> Option<&str> {
        non_empty(&self.reason)
    }

    /// A profile that carries only an `error` is a failed generation, not an empty profile.
    pub fn generation_error(&self) -> Option<&str> {
        let has_text = non_empty(&self.elevator_pitch).is_some() || non_empty(&self.about_me).is_some();
        if has_text {
            None
        } else {
            non_empty(&self.error)
        }
    }
}

/// Splits the comma-separated keywords input: trims each piece and drops empty ones.
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
