//! Terminal falling-block game (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_blockfall::{core,input,term,types}`
//! so the binary, the integration tests and the benchmarks share one import
//! path while the implementation lives in dedicated crates under `crates/`.

pub use tui_blockfall_core as core;
pub use tui_blockfall_input as input;
pub use tui_blockfall_term as term;
pub use tui_blockfall_types as types;
