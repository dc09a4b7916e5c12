//! # Answer Rendering
//!
//! Turns a [`ParsedAnswer`] (or a pipeline failure) into the HTML fragment handed to the
//! presentation layer. Model text is inserted as-is apart from the newline and emoji
//! transforms, so the raw panel keeps the reply byte-for-byte.

use crate::constants::DEFAULT_SEARCH_URL;
use crate::interpreter::ParsedAnswer;
use crate::prompts::contract::FILM_MARKER;
use serde::Serialize;
use std::fmt::Display;

/// Which panel a rendered fragment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    NotFound,
    Structured,
    Raw,
    Error,
    Warning,
}

/// A rendered HTML fragment and the panel kind it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub kind: AnswerKind,
    pub html: String,
}

/// Replaces every `\n` with `<br>`.
pub fn newlines_to_breaks(text: &str) -> String {
    text.replace('\n', "<br>")
}

/// Wraps every film marker in a span with the given font size, in `em`.
pub fn emphasize_markers(html: &str, size_em: f32) -> String {
    html.replace(
        FILM_MARKER,
        &format!("<span style=\"font-size: {size_em}em;\">{FILM_MARKER}</span>"),
    )
}

/// Escapes the characters that would let text open or close markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Builds `<base>?q=<question>` with the question percent-encoded.
pub fn search_url(base: &str, question: &str) -> String {
    format!("{base}?q={}", urlencoding::encode(question))
}

/// Renders answers into HTML panels.
#[derive(Debug, Clone)]
pub struct Renderer {
    search_base_url: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_URL)
    }
}

impl Renderer {
    pub fn new(search_base_url: impl Into<String>) -> Self {
        Self {
            search_base_url: search_base_url.into(),
        }
    }

    pub fn search_base_url(&self) -> &str {
        &self.search_base_url
    }

    /// The fallback search link for a question.
    pub fn fallback_url(&self, question: &str) -> String {
        search_url(&self.search_base_url, question)
    }

    pub fn render(&self, answer: &ParsedAnswer) -> Rendered {
        match answer {
            ParsedAnswer::NotFound { question, reply } => self.render_not_found(question, reply),
            ParsedAnswer::Structured {
                reasoning,
                final_answer,
            } => self.render_structured(reasoning, final_answer),
            ParsedAnswer::Raw { text } => self.render_raw(text),
        }
    }

    pub fn render_not_found(&self, question: &str, reply: &str) -> Rendered {
        let url = self.fallback_url(question);
        let reply_html = newlines_to_breaks(reply);
        let html = format!(
            r#"<div class="not-found-section" style="text-align: center; padding: 20px; background-color: #2b2b2b; border-radius: 10px; border: 1px solid #ff6b6b; margin-top: 20px;">
<h3 style="color: #ff6b6b;">🦇 Извините, такого нет в базе</h3>
<p style="color: #cccccc; font-size: 1.1em;">{reply_html}</p>
<br>
<a class="search-fallback" href="{url}" target="_blank" rel="noopener noreferrer" style="text-decoration: none;">
<div style="display: inline-block; background-color: #4285F4; color: white; padding: 12px 24px; border-radius: 5px; font-weight: bold; font-size: 16px; box-shadow: 0 4px 6px rgba(0,0,0,0.3); transition: 0.3s;">🔍 Найти ответ в Google</div>
</a>
</div>"#
        );
        Rendered {
            kind: AnswerKind::NotFound,
            html,
        }
    }

    /// Reasoning first, final answer second. The film marker is drawn larger in the
    /// reasoning panel than in the final answer.
    pub fn render_structured(&self, reasoning: &str, final_answer: &str) -> Rendered {
        let reasoning_html = emphasize_markers(&newlines_to_breaks(reasoning), 1.3);
        let final_answer_html = emphasize_markers(&newlines_to_breaks(final_answer), 1.2);
        let html = format!(
            r#"<div class="reasoning-section">
<h3 style="color: #f0e68c; text-align: center;">🔍 Результаты поиска:</h3>
<div class="films-list">
{reasoning_html}
</div>
</div>
<br>
<div style="border-top: 2px solid #f0e68c; margin: 20px 0;"></div>
<br>
<div class="final-answer-section">
<h3 style="color: #f0e68c; text-align: center;">📋 Итоговый ответ:</h3>
<div class="final-answer">
{final_answer_html}
</div>
</div>"#
        );
        Rendered {
            kind: AnswerKind::Structured,
            html,
        }
    }

    pub fn render_raw(&self, text: &str) -> Rendered {
        Rendered {
            kind: AnswerKind::Raw,
            html: format!(r#"<div class="answer-text">{}</div>"#, newlines_to_breaks(text)),
        }
    }

    /// Error details come from the transport (an upstream body, for instance) and are
    /// escaped, unlike model text.
    pub fn render_error(&self, error: impl Display) -> Rendered {
        let detail = escape_html(&error.to_string());
        Rendered {
            kind: AnswerKind::Error,
            html: format!(r#"<div class="error-message">🎃 Произошла ошибка: {detail}</div>"#),
        }
    }

    pub fn render_empty_question(&self) -> Rendered {
        Rendered {
            kind: AnswerKind::Warning,
            html: r#"<div class="warning-message">❓ Пожалуйста, введите ваш вопрос!</div>"#
                .to_string(),
        }
    }

    /// Shown instead of the form when the catalog failed to load.
    pub fn render_catalog_error(&self) -> Rendered {
        Rendered {
            kind: AnswerKind::Error,
            html: r#"<div class="error-message">💀 Критическая ошибка: Не удалось загрузить базу знаний.</div>"#
                .to_string(),
        }
    }

    /// Shown instead of the form when the API key is missing.
    pub fn render_config_error(&self) -> Rendered {
        Rendered {
            kind: AnswerKind::Error,
            html: r#"<div class="error-message">🔑 Ошибка API: Не установлен ключ GROQ.</div>"#
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emphasize_markers_uses_size() {
        assert_eq!(
            emphasize_markers("🎬 Beetlejuice", 1.3),
            "<span style=\"font-size: 1.3em;\">🎬</span> Beetlejuice"
        );
    }

    #[test]
    fn test_search_url_encodes_reserved_characters() {
        assert_eq!(
            search_url("https://www.google.com/search", "a b&c"),
            "https://www.google.com/search?q=a%20b%26c"
        );
    }
}
