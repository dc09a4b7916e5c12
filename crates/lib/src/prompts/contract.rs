//! # Answer Format Contract
//!
//! The literals shared by the prompt composer and the response interpreter. The composer
//! instructs the model to emit them and the interpreter looks for them in the reply, so
//! both sides must reference these constants and never re-type them.

/// Opens the findings section of a well-formed reply.
pub const REASONING_MARKER: &str = "[РАССУЖДЕНИЯ]";

/// Opens the final, user-facing answer section of a well-formed reply.
pub const ANSWER_MARKER: &str = "[ОТВЕТ]";

macro_rules! not_found_key {
    () => {
        "Извините, такого нет в базе"
    };
}

/// The opening words of the "not found" sentence. Replies are matched on these alone,
/// so a model that drops or rewords the tail after the comma is still recognized.
pub const NOT_FOUND_KEY: &str = not_found_key!();

/// The exact sentence the model must return when the catalog has no answer.
pub const NOT_FOUND_SENTINEL: &str = concat!(
    not_found_key!(),
    ", попробуйте поискать в интернете"
);

/// The emoji that opens each film entry in the reasoning section.
pub const FILM_MARKER: &str = "🎬";
