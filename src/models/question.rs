use chrono::{DateTime, Duration, Utc};
use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A question needs at least this many choices before users can see it.
pub const MIN_CHOICES: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: String,
    pub question_text: String,
    #[serde(with = "bson_datetime")]
    pub pub_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(rename = "_id")]
    pub id: String,
    /// References the owning question's `_id`
    pub question_id: String,
    pub choice_text: String,
    pub votes: u32,
}

/// A question loaded together with its choices.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionWithChoices {
    pub question: Question,
    pub choices: Vec<Choice>,
}

impl Question {
    pub fn new(question_text: impl Into<String>, pub_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            question_text: question_text.into(),
            pub_date,
        }
    }

    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        self.pub_date <= now
    }

    /// True when `pub_date` falls in `(now - 1 day, now]`.
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) < self.pub_date && self.pub_date <= now
    }
}

impl Choice {
    pub fn new(question_id: impl Into<String>, choice_text: impl Into<String>, votes: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            question_id: question_id.into(),
            choice_text: choice_text.into(),
            votes,
        }
    }
}

impl QuestionWithChoices {
    pub fn has_enough_choices(&self) -> bool {
        self.choices.len() >= MIN_CHOICES
    }

    /// Published and provisioned with enough choices to be shown to users.
    pub fn is_eligible(&self, now: DateTime<Utc>) -> bool {
        self.question.is_published(now) && self.has_enough_choices()
    }
}

/// Stores chrono timestamps as native BSON datetimes so range queries on
/// `pub_date` compare instants rather than strings.
mod bson_datetime {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        BsonDateTime::from_millis(date.timestamp_millis()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        BsonDateTime::deserialize(deserializer).map(|bson_dt| {
            DateTime::<Utc>::from_timestamp_millis(bson_dt.timestamp_millis()).unwrap_or_default()
        })
    }
}
