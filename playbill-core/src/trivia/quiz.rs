//! Quiz question selection
//!
//! A round is described entirely by the caller: which category to draw
//! from and which questions were already shown. No session state is kept
//! between rounds.

use std::collections::HashSet;

use serde::Deserialize;

use super::category::{CategoryKey, CategoryRef};
use super::question::Question;
use crate::random::RandomSource;

/// Selector type meaning "every category"
pub const ALL_CATEGORIES: &str = "click";

/// Reasons a quiz request is rejected before any query runs
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("quiz_category of type '{0}' has no id")]
    MissingCategoryId(String),
}

/// `quiz_category` as sent by clients
#[derive(Debug, Clone, Deserialize)]
pub struct QuizCategory {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<CategoryRef>,
}

/// `POST /quizzes` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizRequest {
    pub previous_questions: Option<Vec<i64>>,
    pub quiz_category: Option<QuizCategory>,
}

/// Which questions a round may draw from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(CategoryKey),
}

impl QuizCategory {
    pub fn scope(&self) -> Result<QuizScope, QuizError> {
        let kind = self
            .kind
            .as_deref()
            .ok_or(QuizError::MissingField("quiz_category.type"))?;
        if kind == ALL_CATEGORIES {
            return Ok(QuizScope::All);
        }
        let key = self
            .id
            .clone()
            .map(CategoryKey::from)
            .ok_or_else(|| QuizError::MissingCategoryId(kind.to_owned()))?;
        Ok(QuizScope::Category(key))
    }
}

/// One validated quiz round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRound {
    pub scope: QuizScope,
    pub previous: HashSet<i64>,
}

impl TryFrom<QuizRequest> for QuizRound {
    type Error = QuizError;

    fn try_from(req: QuizRequest) -> Result<Self, Self::Error> {
        let previous = req
            .previous_questions
            .ok_or(QuizError::MissingField("previous_questions"))?;
        let category = req
            .quiz_category
            .ok_or(QuizError::MissingField("quiz_category"))?;

        Ok(Self {
            scope: category.scope()?,
            previous: previous.into_iter().collect(),
        })
    }
}

impl QuizRound {
    pub fn new(scope: QuizScope, previous: impl IntoIterator<Item = i64>) -> Self {
        Self {
            scope,
            previous: previous.into_iter().collect(),
        }
    }

    /// Category restriction, if any.
    pub fn category(&self) -> Option<&CategoryKey> {
        match &self.scope {
            QuizScope::All => None,
            QuizScope::Category(key) => Some(key),
        }
    }

    /// Whether `question` belongs to the candidate pool.
    pub fn admits(&self, question: &Question) -> bool {
        if self.previous.contains(&question.id) {
            return false;
        }
        match &self.scope {
            QuizScope::All => true,
            QuizScope::Category(key) => &question.category == key,
        }
    }

    /// Previous ids in ascending order, for binding into a query.
    pub fn excluded_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.previous.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Draw one question uniformly from the admitted candidates.
    ///
    /// Returns `None` when no candidate is left.
    pub fn pick(&self, candidates: Vec<Question>, rng: &dyn RandomSource) -> Option<Question> {
        let mut pool: Vec<Question> = candidates.into_iter().filter(|q| self.admits(q)).collect();
        if pool.is_empty() {
            return None;
        }
        let index = rng.index(pool.len()).min(pool.len() - 1);
        Some(pool.swap_remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FixedIndex;

    fn question(id: i64, category: i64) -> Question {
        Question {
            id,
            question: format!("question {id}"),
            answer: format!("answer {id}"),
            category: CategoryKey::from(category),
            difficulty: 1,
        }
    }

    fn request(value: serde_json::Value) -> QuizRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn click_selects_all_categories() {
        let round = QuizRound::try_from(request(serde_json::json!({
            "previous_questions": [],
            "quiz_category": { "type": "click", "id": 0 }
        })))
        .unwrap();
        assert_eq!(round.scope, QuizScope::All);
        assert_eq!(round.category(), None);
    }

    #[test]
    fn labelled_selector_restricts_category() {
        let round = QuizRound::try_from(request(serde_json::json!({
            "previous_questions": [4, 2],
            "quiz_category": { "type": "Science", "id": "1" }
        })))
        .unwrap();
        assert_eq!(round.scope, QuizScope::Category(CategoryKey::from(1)));
        assert_eq!(round.excluded_ids(), vec![2, 4]);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let err = QuizRound::try_from(request(serde_json::json!({
            "quiz_category": { "type": "click" }
        })))
        .unwrap_err();
        assert_eq!(err, QuizError::MissingField("previous_questions"));

        let err = QuizRound::try_from(request(serde_json::json!({
            "previous_questions": []
        })))
        .unwrap_err();
        assert_eq!(err, QuizError::MissingField("quiz_category"));

        let err = QuizRound::try_from(request(serde_json::json!({
            "previous_questions": [],
            "quiz_category": { "type": "Art" }
        })))
        .unwrap_err();
        assert_eq!(err, QuizError::MissingCategoryId("Art".into()));
    }

    #[test]
    fn pick_skips_previous_questions() {
        let round = QuizRound::new(QuizScope::All, [1, 2]);
        let candidates = vec![question(1, 1), question(2, 1), question(3, 2)];
        let picked = round.pick(candidates, &FixedIndex(0)).unwrap();
        assert_eq!(picked.id, 3);
    }

    #[test]
    fn pick_respects_category() {
        let round = QuizRound::new(QuizScope::Category(CategoryKey::from(2)), []);
        let candidates = vec![question(1, 1), question(2, 2), question(3, 2)];
        let picked = round.pick(candidates, &FixedIndex(1)).unwrap();
        assert_eq!(picked.id, 3);
    }

    #[test]
    fn exhausted_pool_yields_none() {
        let round = QuizRound::new(QuizScope::All, [1]);
        assert_eq!(round.pick(vec![question(1, 1)], &FixedIndex(0)), None);
        assert_eq!(round.pick(Vec::new(), &FixedIndex(0)), None);
    }
}
