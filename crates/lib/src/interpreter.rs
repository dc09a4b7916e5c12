//! # Response Interpreter
//!
//! Classifies a raw completion reply against the answer format contract. Every reply maps
//! to exactly one [`ParsedAnswer`]; a reply that breaks the contract becomes
//! [`ParsedAnswer::Raw`] and is shown unmodified instead of failing the query.

use crate::prompts::contract::{ANSWER_MARKER, NOT_FOUND_KEY, REASONING_MARKER};
use serde::Serialize;
use tracing::{debug, warn};

/// The classified form of a completion reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedAnswer {
    /// The model returned the sentinel. `question` feeds the fallback search link and
    /// `reply` is the model's full text.
    NotFound { question: String, reply: String },
    /// A reply with one findings section and one final answer.
    Structured {
        reasoning: String,
        final_answer: String,
    },
    /// A reply that did not follow the template, carried byte-for-byte.
    Raw { text: String },
}

impl ParsedAnswer {
    pub fn kind(&self) -> &'static str {
        match self {
            ParsedAnswer::NotFound { .. } => "not_found",
            ParsedAnswer::Structured { .. } => "structured",
            ParsedAnswer::Raw { .. } => "raw",
        }
    }
}

/// Returns `true` when the reply contains the opening of the "not found" sentence anywhere.
pub fn is_not_found(reply: &str) -> bool {
    reply.contains(NOT_FOUND_KEY)
}

/// Splits a reply into its reasoning and final-answer segments.
///
/// Returns `None` unless the final-answer marker occurs exactly once and both trimmed
/// segments are non-empty. The reasoning marker is removed from the first segment.
pub fn split_sections(reply: &str) -> Option<(String, String)> {
    let mut parts = reply.split(ANSWER_MARKER);
    let (before, after) = match (parts.next(), parts.next(), parts.next()) {
        (Some(before), Some(after), None) => (before, after),
        _ => return None,
    };

    let reasoning = before.replace(REASONING_MARKER, "").trim().to_string();
    let final_answer = after.trim().to_string();
    if reasoning.is_empty() || final_answer.is_empty() {
        return None;
    }
    Some((reasoning, final_answer))
}

/// Classifies a completion reply for the given question.
pub fn interpret(reply: &str, question: &str) -> ParsedAnswer {
    if is_not_found(reply) {
        debug!("Reply contains the not-found sentinel");
        return ParsedAnswer::NotFound {
            question: question.to_string(),
            reply: reply.to_string(),
        };
    }

    match split_sections(reply) {
        Some((reasoning, final_answer)) => ParsedAnswer::Structured {
            reasoning,
            final_answer,
        },
        None => {
            warn!(
                markers = reply.matches(ANSWER_MARKER).count(),
                "Reply does not follow the two-section template, showing it as raw text"
            );
            ParsedAnswer::Raw {
                text: reply.to_string(),
            }
        }
    }
}
