use crate::errors::SibylResult;
use crate::models::GeneratedAnswer;

/// Answer generation provider: question + context passages in, answer out.
pub trait IAnswerGenerator: Send + Sync {
    /// Generate an answer for `question` using only `context`.
    fn generate(&self, question: &str, context: &[String]) -> SibylResult<GeneratedAnswer>;

    /// Model identifier reported in provenance metadata.
    fn name(&self) -> &str;

    /// Whether this provider is currently usable.
    fn is_available(&self) -> bool;
}
