//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `query.rs` — connect/render/suggest/classify one-shot commands.
//! - `session.rs` — interactive event loop over stdin and worker threads.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate presentation logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod query;
pub mod session;

pub use query::{handle_classify, handle_connect, handle_render, handle_suggest};
pub use session::run_session;
