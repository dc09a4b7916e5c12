//! # Answer Prompt Tests
//!
//! This test suite validates `filmqa::prompts::answer`, which embeds the catalog, the
//! question and the answer format contract into one prompt. The interpreter relies on
//! the contract literals appearing exactly once, so most tests count occurrences.

use filmqa::prompts::answer::{answer_instructions, compose_answer_prompt};
use filmqa::prompts::contract::{
    ANSWER_MARKER, NOT_FOUND_KEY, NOT_FOUND_SENTINEL, REASONING_MARKER,
};
use filmqa_test_utils::{edward_scissorhands_catalog, sample_catalog};

/// Verifies that every contract literal and the catalog text appear verbatim, once each.
#[test]
fn test_prompt_contains_contract_once() {
    let catalog_text = sample_catalog().serialize();
    let prompt = compose_answer_prompt(&catalog_text, "Фильмы 90-х годов");

    assert_eq!(prompt.matches(NOT_FOUND_SENTINEL).count(), 1);
    assert_eq!(prompt.matches(NOT_FOUND_KEY).count(), 1);
    assert_eq!(prompt.matches(REASONING_MARKER).count(), 1);
    assert_eq!(prompt.matches(ANSWER_MARKER).count(), 1);
    assert_eq!(prompt.matches(catalog_text.as_str()).count(), 1);
}

/// Verifies the order: role, rules, template, catalog, question.
#[test]
fn test_prompt_section_order() {
    let catalog_text = edward_scissorhands_catalog().serialize();
    let question = "Сколько фильмов 90-х?";
    let prompt = compose_answer_prompt(&catalog_text, question);

    let role = prompt.find("Твоя роль").expect("role statement");
    let rules = prompt.find("СТРОГИЕ ИНСТРУКЦИИ").expect("rules");
    let reasoning = prompt.find(REASONING_MARKER).expect("reasoning marker");
    let answer = prompt.find(ANSWER_MARKER).expect("answer marker");
    let catalog = prompt.find(catalog_text.as_str()).expect("catalog text");
    let question_at = prompt.rfind(question).expect("question");

    assert!(role < rules);
    assert!(rules < reasoning);
    assert!(reasoning < answer);
    assert!(answer < catalog);
    assert!(catalog < question_at);
    assert!(prompt.trim_end().ends_with("ОТВЕТ:"));
}

/// Verifies that the four binding rules are numbered in the instruction block.
#[test]
fn test_instructions_list_binding_rules() {
    let instructions = answer_instructions();
    for rule in [
        "1.  **ПОЛНЫЙ ПОИСК:**",
        "2.  **ПОЛНАЯ ИНФОРМАЦИЯ:**",
        "3.  **НИКАКИХ ДОГАДОК:**",
        "4.  **ФИЛЬТР ТЕМЫ:**",
    ] {
        assert!(instructions.contains(rule), "missing rule: {rule}");
    }
    assert!(!instructions.contains("{not_found}"));
    assert!(!instructions.contains("{reasoning_marker}"));
}

/// Verifies that placeholder-like text in the question is not expanded.
#[test]
fn test_question_with_braces_is_left_verbatim() {
    let question = "что такое {answer_marker}?";
    let prompt = compose_answer_prompt("", question);
    assert!(prompt.contains(question));
    assert_eq!(prompt.matches(ANSWER_MARKER).count(), 1);
}

/// An empty catalog still produces a complete prompt.
#[test]
fn test_prompt_with_empty_catalog() {
    let prompt = compose_answer_prompt("", "Фильмы с Джонни Деппом");
    assert!(prompt.contains("ДАННЫЕ:\n\n\nВОПРОС: Фильмы с Джонни Деппом"));
}
