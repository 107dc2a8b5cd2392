use serde::{Deserialize, Serialize};

/// Body of `POST /submit-feedback`. Values are sent exactly as the form holds them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub stars: String,
    pub comments: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackReply {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /api/retrieve-skills`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillsRequest {
    pub profession: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillsReply {
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}
