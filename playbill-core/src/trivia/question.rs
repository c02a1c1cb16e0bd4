//! Trivia questions

use serde::{Deserialize, Serialize};

use super::category::{CategoryKey, CategoryRef};
use crate::validation::{FieldErrors, Validate, ValidationError};

/// Maximum length for question and answer text
pub const MAX_TEXT_LEN: usize = 1000;

/// Accepted difficulty range
pub const MIN_DIFFICULTY: i64 = 1;
pub const MAX_DIFFICULTY: i64 = 5;

/// A stored question, serialized in its public (formatted) shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: CategoryKey,
    pub difficulty: i32,
}

/// A validated question ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: CategoryKey,
    pub difficulty: i32,
}

/// Difficulty as clients send it: a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DifficultyRef {
    Number(i64),
    Text(String),
}

impl DifficultyRef {
    pub fn to_level(&self) -> Option<i64> {
        match self {
            Self::Number(level) => Some(*level),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// `POST /questions` body; every field optional so absence can be reported.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionSubmission {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<DifficultyRef>,
    pub category: Option<CategoryRef>,
}

impl QuestionSubmission {
    /// Names of required fields absent from the body.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.question.is_none() {
            missing.push("question");
        }
        if self.answer.is_none() {
            missing.push("answer");
        }
        if self.difficulty.is_none() {
            missing.push("difficulty");
        }
        if self.category.is_none() {
            missing.push("category");
        }
        missing
    }
}

impl Validate for QuestionSubmission {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        for field in self.missing_fields() {
            errors.add(field, ValidationError::Required);
        }

        if let Some(question) = &self.question {
            errors.require_text("question", question, MAX_TEXT_LEN);
        }
        if let Some(answer) = &self.answer {
            errors.require_text("answer", answer, MAX_TEXT_LEN);
        }
        match self.difficulty.as_ref().map(DifficultyRef::to_level) {
            Some(None) => errors.add(
                "difficulty",
                ValidationError::InvalidFormat {
                    reason: "must be an integer",
                },
            ),
            Some(Some(level)) if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&level) => errors.add(
                "difficulty",
                ValidationError::OutOfRange {
                    min: MIN_DIFFICULTY,
                    max: MAX_DIFFICULTY,
                },
            ),
            _ => {}
        }
        if let Some(category) = &self.category {
            if CategoryKey::from(category.clone()).is_blank() {
                errors.add("category", ValidationError::Required);
            }
        }

        errors.into_result()
    }
}

impl TryFrom<QuestionSubmission> for NewQuestion {
    type Error = FieldErrors;

    fn try_from(submission: QuestionSubmission) -> Result<Self, Self::Error> {
        submission.validate()?;

        match (
            submission.question,
            submission.answer,
            submission.category,
            submission
                .difficulty
                .and_then(|d| d.to_level())
                .and_then(|d| i32::try_from(d).ok()),
        ) {
            (Some(question), Some(answer), Some(category), Some(difficulty)) => Ok(Self {
                question: question.trim().to_owned(),
                answer: answer.trim().to_owned(),
                category: CategoryKey::from(category),
                difficulty,
            }),
            _ => {
                let mut errors = FieldErrors::new();
                errors.add("difficulty", ValidationError::Required);
                Err(errors)
            }
        }
    }
}
