use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{
    error::{AppResult, PollsError},
    models::question::{Question, QuestionWithChoices},
    repositories::question_repository::QuestionStore,
};

/// How many questions the index page shows.
pub const LATEST_QUESTIONS_LIMIT: usize = 5;

/// Result of a vote submission.
#[derive(Debug)]
pub enum VoteOutcome {
    /// The vote was stored; show the results for this question.
    Recorded { question_id: String },
    /// Nothing was selected, or the selection is not a choice of this question.
    NoChoiceSelected(QuestionWithChoices),
}

#[derive(Clone)]
pub struct PollService {
    store: Arc<dyn QuestionStore>,
}

impl PollService {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    async fn load(&self, question: Question) -> AppResult<QuestionWithChoices> {
        let choices = self.store.choices_for(&question.id).await?;
        Ok(QuestionWithChoices { question, choices })
    }

    /// The most recent eligible questions, at most [`LATEST_QUESTIONS_LIMIT`].
    ///
    /// Published questions arrive newest first, so choices are only loaded
    /// until the page is full.
    pub async fn latest_questions(&self, now: DateTime<Utc>) -> AppResult<Vec<QuestionWithChoices>> {
        let mut latest = Vec::with_capacity(LATEST_QUESTIONS_LIMIT);
        for question in self.store.published_questions(now).await? {
            let loaded = self.load(question).await?;
            if !loaded.is_eligible(now) {
                continue;
            }
            latest.push(loaded);
            if latest.len() == LATEST_QUESTIONS_LIMIT {
                break;
            }
        }
        debug!("{} question(s) listed", latest.len());
        Ok(latest)
    }

    /// Looks a question up for the detail and results pages. Unknown and
    /// ineligible questions both come back as `QuestionNotFound`.
    pub async fn eligible_question(
        &self,
        question_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<QuestionWithChoices> {
        let question = self
            .store
            .get_question(question_id)
            .await?
            .ok_or(PollsError::QuestionNotFound)?;

        let loaded = self.load(question).await?;
        if !loaded.is_eligible(now) {
            debug!("Question {} is not eligible for display", question_id);
            return Err(PollsError::QuestionNotFound.into());
        }
        Ok(loaded)
    }

    /// Records one vote for `choice_id` under `question_id`.
    ///
    /// The question only has to exist; eligibility is not checked here.
    pub async fn vote(&self, question_id: &str, choice_id: Option<&str>) -> AppResult<VoteOutcome> {
        let question = self
            .store
            .get_question(question_id)
            .await?
            .ok_or(PollsError::QuestionNotFound)?;

        let recorded = match choice_id {
            Some(choice_id) => self.store.increment_votes(&question.id, choice_id).await?,
            None => false,
        };

        if !recorded {
            debug!("Vote on question {} without a valid choice", question_id);
            return Ok(VoteOutcome::NoChoiceSelected(self.load(question).await?));
        }

        info!("Vote recorded on question {}", question.id);
        Ok(VoteOutcome::Recorded {
            question_id: question.id,
        })
    }
}
