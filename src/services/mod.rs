//! Service layer: document composition and sync bookkeeping.

pub mod composer;
pub mod sync;

pub use composer::{
    add_tool, add_tool_to_file, compose, compose_document, has_tool_by_name, minimal_document,
    research_guidelines_prompt, set_research_guidelines_prompt,
};
pub use sync::{content_hash, needs_push, SyncDecision};
