use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use tracing::{error, info, warn};

use crate::{
    dtos::requests::{
        CreateChoiceDTO, CreateQuestionDTO, PublishedFilter, QuestionListParams, UpdateQuestionDTO,
    },
    error::{AppResult, PollsError},
    models::question::{Choice, Question, QuestionWithChoices},
    repositories::question_repository::QuestionStore,
};

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// `[start, end)` in UTC for a calendar filter, relative to `now`.
pub fn published_range(
    filter: PublishedFilter,
    now: DateTime<Utc>,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let today = now.date_naive();
    let tomorrow = midnight(today) + Duration::days(1);
    match filter {
        PublishedFilter::Today => Some((midnight(today), tomorrow)),
        PublishedFilter::PastSevenDays => Some((midnight(today) - Duration::days(7), tomorrow)),
        PublishedFilter::ThisMonth => {
            let start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)?;
            let end = if today.month() == 12 {
                NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?
            } else {
                NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)?
            };
            Some((midnight(start), midnight(end)))
        }
        PublishedFilter::ThisYear => {
            let start = NaiveDate::from_ymd_opt(today.year(), 1, 1)?;
            let end = NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?;
            Some((midnight(start), midnight(end)))
        }
    }
}

fn required_text(value: &str, what: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{what} must not be blank"));
    }
    Ok(trimmed.to_string())
}

/// Data management for questions and their choices. No eligibility filtering
/// applies here.
#[derive(Clone)]
pub struct AdminService {
    store: Arc<dyn QuestionStore>,
}

impl AdminService {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    async fn load(&self, question: Question) -> AppResult<QuestionWithChoices> {
        let choices = self.store.choices_for(&question.id).await?;
        Ok(QuestionWithChoices { question, choices })
    }

    pub async fn list_questions(
        &self,
        params: &QuestionListParams,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<QuestionWithChoices>> {
        let search = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);
        let range = params.published.map(|filter| published_range(filter, now));

        let mut listed = Vec::new();
        for question in self.store.list_questions().await? {
            if let Some(term) = &search {
                if !question.question_text.to_lowercase().contains(term) {
                    continue;
                }
            }
            if let Some(range) = range {
                let in_range = range
                    .map_or(false, |(start, end)| start <= question.pub_date && question.pub_date < end);
                if !in_range {
                    continue;
                }
            }
            listed.push(self.load(question).await?);
        }
        Ok(listed)
    }

    pub async fn get_question(&self, question_id: &str) -> AppResult<QuestionWithChoices> {
        let question = self
            .store
            .get_question(question_id)
            .await?
            .ok_or(PollsError::QuestionNotFound)?;
        self.load(question).await
    }

    pub async fn create_question(
        &self,
        payload: CreateQuestionDTO,
        now: DateTime<Utc>,
    ) -> AppResult<QuestionWithChoices> {
        let question_text =
            required_text(&payload.question_text, "questionText").map_err(PollsError::InvalidQuestion)?;
        let choice_texts = payload
            .choices
            .iter()
            .map(|text| required_text(text, "choice text"))
            .collect::<Result<Vec<_>, _>>()
            .map_err(PollsError::InvalidChoice)?;

        let question = Question::new(question_text, payload.pub_date.unwrap_or(now));
        let choices: Vec<_> = choice_texts
            .into_iter()
            .map(|choice_text| Choice::new(&question.id, choice_text, 0))
            .collect();

        self.store.insert_question(question.clone()).await?;
        if let Err(err) = self.store.insert_choices(choices.clone()).await {
            warn!("Rolling back question {}: {}", question.id, err);
            if let Err(cleanup_err) = self.store.delete_question(&question.id).await {
                error!("Failed to roll back question {}: {}", question.id, cleanup_err);
            }
            return Err(err);
        }

        info!(
            "Question {} created with {} choice(s)",
            question.id,
            choices.len()
        );
        Ok(QuestionWithChoices { question, choices })
    }

    pub async fn update_question(
        &self,
        question_id: &str,
        payload: UpdateQuestionDTO,
    ) -> AppResult<QuestionWithChoices> {
        let mut question = self
            .store
            .get_question(question_id)
            .await?
            .ok_or(PollsError::QuestionNotFound)?;

        if let Some(text) = payload.question_text {
            question.question_text =
                required_text(&text, "questionText").map_err(PollsError::InvalidQuestion)?;
        }
        if let Some(pub_date) = payload.pub_date {
            question.pub_date = pub_date;
        }

        if !self.store.update_question(&question).await? {
            return Err(PollsError::QuestionNotFound.into());
        }
        info!("Question {} updated", question.id);
        self.load(question).await
    }

    pub async fn delete_question(&self, question_id: &str) -> AppResult<()> {
        if !self.store.delete_question(question_id).await? {
            return Err(PollsError::QuestionNotFound.into());
        }
        info!("Question {} deleted", question_id);
        Ok(())
    }

    pub async fn add_choice(&self, question_id: &str, payload: CreateChoiceDTO) -> AppResult<Choice> {
        let question = self
            .store
            .get_question(question_id)
            .await?
            .ok_or(PollsError::QuestionNotFound)?;
        let choice_text =
            required_text(&payload.choice_text, "choiceText").map_err(PollsError::InvalidChoice)?;

        let choice = Choice::new(&question.id, choice_text, payload.votes);
        self.store.insert_choice(choice.clone()).await?;
        info!("Choice {} added to question {}", choice.id, question.id);
        Ok(choice)
    }

    pub async fn delete_choice(&self, question_id: &str, choice_id: &str) -> AppResult<()> {
        if !self.store.delete_choice(question_id, choice_id).await? {
            return Err(PollsError::ChoiceNotFound.into());
        }
        info!("Choice {} removed from question {}", choice_id, question_id);
        Ok(())
    }
}
