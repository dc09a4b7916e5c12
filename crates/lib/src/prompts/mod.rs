//! # Prompt Template Modules
//!
//! This module organizes the prompt used by the question-answering pipeline.
//! `contract` owns the markers shared with the response interpreter and `answer`
//! composes the full prompt around them.

pub mod answer;
pub mod contract;
