//! local-agent: a terminal coding assistant grounded in the current repository
//!
//! Questions are answered by a local Ollama model from a bounded context pack
//! (file tree plus the most relevant files). Requests for exact source lines
//! never reach the model; they are answered from a literal search or refused.

pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod prompt;
pub mod quote;
pub mod rank;
pub mod repo;
pub mod safety;
pub mod scan;
pub mod search;
pub mod session;
pub mod templates;
pub mod utils;
