//! Trivia domain: questions, categories and quiz rounds

pub mod category;
pub mod question;
pub mod quiz;

pub use category::{Category, CategoryKey, CategoryRef};
pub use question::{DifficultyRef, NewQuestion, Question, QuestionSubmission};
pub use quiz::{QuizCategory, QuizError, QuizRequest, QuizRound, QuizScope};

/// `POST /questions/search` body
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
}

impl SearchRequest {
    /// The search term, or `None` when absent or empty.
    pub fn term(&self) -> Option<&str> {
        self.search_term.as_deref().filter(|t| !t.is_empty())
    }
}

/// Case-insensitive substring match used by in-memory search.
pub fn matches_term(text: &str, term: &str) -> bool {
    text.to_lowercase().contains(&term.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_term_is_none() {
        let req: SearchRequest = serde_json::from_str(r#"{"searchTerm": ""}"#).unwrap();
        assert_eq!(req.term(), None);

        let req: SearchRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.term(), None);

        let req: SearchRequest = serde_json::from_str(r#"{"searchTerm": "title"}"#).unwrap();
        assert_eq!(req.term(), Some("title"));
    }

    #[test]
    fn term_matching_ignores_case() {
        assert!(matches_term("Whose autobiography is entitled?", "TITLE"));
        assert!(!matches_term("What boxer's original name?", "title"));
    }
}
