use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    error::{AppResult, PollsError},
    models::question::{Choice, Question},
    repositories::question_repository::QuestionStore,
};

#[derive(Default)]
struct Records {
    questions: Vec<Question>,
    choices: Vec<Choice>,
}

/// Process-local store for running without MongoDB. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryQuestionStore {
    records: RwLock<Records>,
}

impl InMemoryQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut questions: Vec<Question>) -> Vec<Question> {
    questions.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
    questions
}

#[async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn list_questions(&self) -> AppResult<Vec<Question>> {
        let records = self.records.read().await;
        Ok(newest_first(records.questions.clone()))
    }

    async fn published_questions(&self, now: DateTime<Utc>) -> AppResult<Vec<Question>> {
        let records = self.records.read().await;
        let published = records
            .questions
            .iter()
            .filter(|question| question.is_published(now))
            .cloned()
            .collect();
        Ok(newest_first(published))
    }

    async fn get_question(&self, question_id: &str) -> AppResult<Option<Question>> {
        let records = self.records.read().await;
        Ok(records
            .questions
            .iter()
            .find(|question| question.id == question_id)
            .cloned())
    }

    async fn insert_question(&self, question: Question) -> AppResult<()> {
        self.records.write().await.questions.push(question);
        Ok(())
    }

    async fn update_question(&self, question: &Question) -> AppResult<bool> {
        let mut records = self.records.write().await;
        match records.questions.iter_mut().find(|q| q.id == question.id) {
            Some(existing) => {
                *existing = question.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_question(&self, question_id: &str) -> AppResult<bool> {
        let mut records = self.records.write().await;
        let before = records.questions.len();
        records.questions.retain(|question| question.id != question_id);
        if records.questions.len() == before {
            return Ok(false);
        }
        records.choices.retain(|choice| choice.question_id != question_id);
        Ok(true)
    }

    async fn choices_for(&self, question_id: &str) -> AppResult<Vec<Choice>> {
        let records = self.records.read().await;
        Ok(records
            .choices
            .iter()
            .filter(|choice| choice.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn insert_choice(&self, choice: Choice) -> AppResult<()> {
        self.records.write().await.choices.push(choice);
        Ok(())
    }

    async fn insert_choices(&self, choices: Vec<Choice>) -> AppResult<()> {
        self.records.write().await.choices.extend(choices);
        Ok(())
    }

    async fn delete_choice(&self, question_id: &str, choice_id: &str) -> AppResult<bool> {
        let mut records = self.records.write().await;
        let before = records.choices.len();
        records
            .choices
            .retain(|choice| !(choice.id == choice_id && choice.question_id == question_id));
        Ok(records.choices.len() < before)
    }

    async fn increment_votes(&self, question_id: &str, choice_id: &str) -> AppResult<bool> {
        let mut records = self.records.write().await;
        match records
            .choices
            .iter_mut()
            .find(|choice| choice.id == choice_id && choice.question_id == question_id)
        {
            Some(choice) => {
                choice.votes = choice
                    .votes
                    .checked_add(1)
                    .ok_or_else(|| PollsError::VoteLimitReached(choice.id.clone()))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use chrono::Duration;

    #[tokio::test]
    async fn deleting_a_question_cascades_to_its_choices() {
        let store = InMemoryQuestionStore::new();
        let kept = Question::new("Kept", Utc::now());
        let doomed = Question::new("Doomed", Utc::now());
        store.insert_question(kept.clone()).await.unwrap();
        store.insert_question(doomed.clone()).await.unwrap();
        store.insert_choice(Choice::new(&kept.id, "a", 0)).await.unwrap();
        store.insert_choice(Choice::new(&doomed.id, "b", 0)).await.unwrap();
        store.insert_choice(Choice::new(&doomed.id, "c", 0)).await.unwrap();

        assert!(store.delete_question(&doomed.id).await.unwrap());

        assert!(store.get_question(&doomed.id).await.unwrap().is_none());
        assert!(store.choices_for(&doomed.id).await.unwrap().is_empty());
        assert_eq!(store.choices_for(&kept.id).await.unwrap().len(), 1);
        assert!(!store.delete_question(&doomed.id).await.unwrap());
    }

    #[tokio::test]
    async fn published_questions_are_newest_first_and_exclude_future() {
        let store = InMemoryQuestionStore::new();
        let now = Utc::now();
        let old = Question::new("old", now - Duration::days(30));
        let recent = Question::new("recent", now - Duration::days(1));
        let future = Question::new("future", now + Duration::days(1));
        for question in [old.clone(), future, recent.clone()] {
            store.insert_question(question).await.unwrap();
        }

        let published = store.published_questions(now).await.unwrap();

        assert_eq!(published, vec![recent, old]);
    }

    #[tokio::test]
    async fn votes_only_count_for_choices_of_the_question() {
        let store = InMemoryQuestionStore::new();
        let question = Question::new("Q", Utc::now());
        let other = Question::new("Other", Utc::now());
        let choice = Choice::new(&question.id, "foo", 0);
        store.insert_question(question.clone()).await.unwrap();
        store.insert_question(other.clone()).await.unwrap();
        store.insert_choice(choice.clone()).await.unwrap();

        assert!(!store.increment_votes(&other.id, &choice.id).await.unwrap());
        assert!(store.increment_votes(&question.id, &choice.id).await.unwrap());

        let choices = store.choices_for(&question.id).await.unwrap();
        assert_eq!(choices[0].votes, 1);
    }

    #[tokio::test]
    async fn votes_stop_at_the_counter_limit() {
        let store = InMemoryQuestionStore::new();
        let question = Question::new("Q", Utc::now());
        let choice = Choice::new(&question.id, "maxed", u32::MAX);
        store.insert_question(question.clone()).await.unwrap();
        store.insert_choices(vec![choice.clone()]).await.unwrap();

        let err = store
            .increment_votes(&question.id, &choice.id)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Poll(PollsError::VoteLimitReached(_))));
        assert_eq!(store.choices_for(&question.id).await.unwrap()[0].votes, u32::MAX);
    }
}
