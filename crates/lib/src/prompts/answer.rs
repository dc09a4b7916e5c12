//! # Answer Prompt
//!
//! Builds the single user-role prompt sent to the completion endpoint: the role
//! statement, the binding rules, the two-section output template, the serialized
//! catalog and the question, in that order.

use super::contract::{ANSWER_MARKER, FILM_MARKER, NOT_FOUND_SENTINEL, REASONING_MARKER};

/// The role statement and the numbered rules, including the output template.
///
/// Placeholders: `{reasoning_marker}`, `{answer_marker}`, `{not_found}`, `{film_marker}`.
/// Each contract literal is referenced exactly once so the interpreter can rely on it.
pub const ANSWER_INSTRUCTIONS_TEMPLATE: &str = r#"Твоя роль - быть экспертом по творчеству Тима Бёртона. Ты должен отвечать на вопросы, основываясь ИСКЛЮЧИТЕЛЬНО на предоставленных данных.

СТРОГИЕ ИНСТРУКЦИИ:
1.  **ПОЛНЫЙ ПОИСК:** Найди ВСЕ записи, которые соответствуют запросу пользователя.
2.  **ПОЛНАЯ ИНФОРМАЦИЯ:** В блоке рассуждений покажи ВСЕ найденные фильмы с ПОЛНОЙ информацией о каждом.
3.  **НИКАКИХ ДОГАДОК:** Отвечай ИСКЛЮЧИТЕЛЬНО на основе предоставленных данных.
4.  **ФИЛЬТР ТЕМЫ:** Если запрос пользователя НЕ КАСАЕТСЯ актёров, фильмов, Тима Бёртона, его жанров, композиторов или персонажей его фильмов, ИЛИ если ответа нет в предоставленных данных, твой ответ должен быть СТРОГО одной фразой: "{not_found}".
5.  **ФОРМАТ ОТВЕТА (ЕСЛИ ИНФОРМАЦИЯ НАЙДЕНА):**
    {reasoning_marker}
    ПОИСКОВЫЕ РЕЗУЛЬТАТЫ:

    {film_marker} [Название фильма 1]:
    🎭 Название: [полное название]
    💰 Бюджет: [бюджет]
    🔞 Возрастной рейтинг: [рейтинг]
    📅 Год выпуска: [год]
    🎫 Сборы: [сборы]
    🌎 Оригинальное название: [оригинал]
    📖 Описание: [описание]
    ⏱️ Продолжительность: [время]
    💬 Слоган: [слоган]
    🏴 Страна: [страна]

    АНАЛИЗ: [краткий анализ]

    {answer_marker}
    [итоговый ответ пользователю]"#;

/// Expands the instruction template with the contract literals.
pub fn answer_instructions() -> String {
    ANSWER_INSTRUCTIONS_TEMPLATE
        .replace("{reasoning_marker}", REASONING_MARKER)
        .replace("{answer_marker}", ANSWER_MARKER)
        .replace("{not_found}", NOT_FOUND_SENTINEL)
        .replace("{film_marker}", FILM_MARKER)
}

/// Composes the full prompt for one question.
///
/// The catalog text is embedded as-is, never truncated or summarized. The catalog and the
/// question are appended after template expansion, so placeholder-like text inside
/// either of them is left untouched.
pub fn compose_answer_prompt(catalog_text: &str, question: &str) -> String {
    let instructions = answer_instructions();
    let mut prompt =
        String::with_capacity(instructions.len() + catalog_text.len() + question.len() + 32);
    prompt.push_str(&instructions);
    prompt.push_str("\n\nДАННЫЕ:\n");
    prompt.push_str(catalog_text);
    prompt.push_str("\n\nВОПРОС: ");
    prompt.push_str(question);
    prompt.push_str("\n\nОТВЕТ:");
    prompt
}
