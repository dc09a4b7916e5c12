//! Terminal rendering of a classified answer for `ask --plain`.

use filmqa::{ParsedAnswer, Renderer};

/// Formats a parsed answer as plain text.
///
/// The not-found case keeps the model's reply and adds the search link on its own line.
pub fn plain_text(answer: &ParsedAnswer, renderer: &Renderer) -> String {
    match answer {
        ParsedAnswer::NotFound { question, reply } => {
            format!("{reply}\n🔍 {}", renderer.fallback_url(question))
        }
        ParsedAnswer::Structured {
            reasoning,
            final_answer,
        } => format!("{reasoning}\n\n{final_answer}"),
        ParsedAnswer::Raw { text } => text.clone(),
    }
}
