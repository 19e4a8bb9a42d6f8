pub mod dedup;
pub mod evaluation;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod questions;
pub mod similarity;
