use serde::Serialize;

use crate::models::question::{Choice, QuestionWithChoices};

/// Template context for a single question on the detail and results pages.
#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub id: String,
    pub question_text: String,
    pub choices: Vec<ChoicePage>,
}

#[derive(Debug, Serialize)]
pub struct ChoicePage {
    pub id: String,
    pub choice_text: String,
    pub votes: u32,
}

/// One row of the index page.
#[derive(Debug, Serialize)]
pub struct QuestionLink {
    pub id: String,
    pub question_text: String,
}

impl From<Choice> for ChoicePage {
    fn from(choice: Choice) -> Self {
        Self {
            id: choice.id,
            choice_text: choice.choice_text,
            votes: choice.votes,
        }
    }
}

impl From<QuestionWithChoices> for QuestionPage {
    fn from(loaded: QuestionWithChoices) -> Self {
        Self {
            id: loaded.question.id,
            question_text: loaded.question.question_text,
            choices: loaded.choices.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<QuestionWithChoices> for QuestionLink {
    fn from(loaded: QuestionWithChoices) -> Self {
        Self {
            id: loaded.question.id,
            question_text: loaded.question.question_text,
        }
    }
}
