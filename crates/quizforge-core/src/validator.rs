//! Answer format validation.

use crate::model::Question;

/// Decides whether raw input names one of a question's options.
pub trait AnswerValidator: Send + Sync {
    fn is_recognized_option(&self, question: &Question, answer: &str) -> bool;
}

/// Accepts an option's letter (`A`, `b`, ...) within the question's range, or
/// the option's text, ignoring case and surrounding whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionValidator;

impl AnswerValidator for OptionValidator {
    fn is_recognized_option(&self, question: &Question, answer: &str) -> bool {
        question.resolve_answer(answer).is_some()
    }
}
