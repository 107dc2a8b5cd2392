pub mod feedback;
pub mod health;
pub mod profile;

pub use feedback::{FeedbackReply, FeedbackRequest, SkillsReply, SkillsRequest};
pub use health::{HealthEnvelope, HealthReport, HealthStatus, SubsystemHealth};
pub use profile::{KeywordList, Profile, ProfileEnvelope, ProfileRequest};
