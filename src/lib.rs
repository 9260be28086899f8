//! Falling Blocks (workspace facade crate).
//!
//! Re-exports the workspace crates as `falling_blocks::{core,input,term,types}`
//! so the binary, integration tests and benches share one import path.

pub use falling_blocks_core as core;
pub use falling_blocks_input as input;
pub use falling_blocks_term as term;
pub use falling_blocks_types as types;
