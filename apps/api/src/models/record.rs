use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::company::Company;
use crate::models::interview::{Experience, Message, Position};

/// Raw database row from `interview_records`.
#[derive(Debug, Clone, FromRow)]
pub struct InterviewRecordRow {
    pub id: Uuid,
    pub company: Value,
    pub position: String,
    pub experience: String,
    pub messages: Value,
    pub difficult_questions: Vec<String>,
    pub file_count: i32,
    pub created_at: DateTime<Utc>,
}

/// The slice of the company profile kept with a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCompany {
    pub name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub interview_focus: Vec<String>,
}

impl From<&Company> for RecordCompany {
    fn from(company: &Company) -> Self {
        Self {
            name: company.name.trim().to_string(),
            industry: company.industry.clone(),
            interview_focus: company.interview_focus.clone(),
        }
    }
}

/// Body of `POST /api/v1/interviews`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecordRequest {
    #[serde(default)]
    pub user_consent: bool,
    pub company: Company,
    pub position: Position,
    pub experience: Experience,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub difficult_questions: Vec<String>,
    #[serde(default)]
    pub file_count: u32,
}

/// A saved interview as the API returns it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    pub id: Uuid,
    pub company: RecordCompany,
    pub position: Position,
    pub experience: Experience,
    pub messages: Vec<Message>,
    pub difficult_questions: Vec<String>,
    pub file_count: u32,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<InterviewRecordRow> for InterviewRecord {
    type Error = anyhow::Error;

    fn try_from(row: InterviewRecordRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            company: serde_json::from_value(row.company)
                .with_context(|| format!("record {} has a malformed company", row.id))?,
            position: row.position.parse::<Position>().map_err(anyhow::Error::msg)?,
            experience: row.experience.parse::<Experience>().map_err(anyhow::Error::msg)?,
            messages: serde_json::from_value(row.messages)
                .with_context(|| format!("record {} has malformed messages", row.id))?,
            difficult_questions: row.difficult_questions,
            file_count: u32::try_from(row.file_count).unwrap_or_default(),
            created_at: row.created_at,
        })
    }
}
