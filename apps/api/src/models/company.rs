use serde::{Deserialize, Serialize};

/// Company profile the interviewer persona is built around.
/// Comes from the preset catalog, the company search, or the client as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub interview_focus: Vec<String>,
    #[serde(default)]
    pub portfolio_tips: Vec<String>,
    #[serde(default)]
    pub common_questions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_posting: Option<String>,
}

impl Company {
    /// The job posting, if one was given and is not blank.
    pub fn job_posting(&self) -> Option<&str> {
        self.job_posting
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}
