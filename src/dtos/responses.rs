use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::question::{Choice, QuestionWithChoices};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(status: u16, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: status as i32,
            message: message.into(),
            data,
            timestamp: Utc::now(),
            error: None,
        }
    }
}

/// Admin view of a question, including the derived predicates.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponseDTO {
    pub question_id: String,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
    pub was_published_recently: bool,
    pub has_enough_choices: bool,
    pub choices: Vec<ChoiceResponseDTO>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceResponseDTO {
    pub choice_id: String,
    pub choice_text: String,
    pub votes: u32,
}

impl From<Choice> for ChoiceResponseDTO {
    fn from(choice: Choice) -> Self {
        Self {
            choice_id: choice.id,
            choice_text: choice.choice_text,
            votes: choice.votes,
        }
    }
}

impl QuestionResponseDTO {
    pub fn from_loaded(loaded: QuestionWithChoices, now: DateTime<Utc>) -> Self {
        let was_published_recently = loaded.question.was_published_recently(now);
        let has_enough_choices = loaded.has_enough_choices();
        Self {
            question_id: loaded.question.id,
            question_text: loaded.question.question_text,
            pub_date: loaded.question.pub_date,
            was_published_recently,
            has_enough_choices,
            choices: loaded.choices.into_iter().map(Into::into).collect(),
        }
    }
}
