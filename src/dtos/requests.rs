use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Form body posted by the voting page.
#[derive(Deserialize, Clone, Debug)]
pub struct VoteForm {
    pub choice: Option<String>,
}

/// Calendar ranges offered by the admin question listing.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PublishedFilter {
    Today,
    #[serde(rename = "past_7_days")]
    PastSevenDays,
    ThisMonth,
    ThisYear,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct QuestionListParams {
    pub search: Option<String>,
    pub published: Option<PublishedFilter>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionDTO {
    pub question_text: String,
    pub pub_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub choices: Vec<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionDTO {
    pub question_text: Option<String>,
    pub pub_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateChoiceDTO {
    pub choice_text: String,
    #[serde(default)]
    pub votes: u32,
}
