//! Service layer containing the presentation pipeline and side-effect helpers.
//!
//! ## Service map
//! - `controller.rs` — query validation, request tokens, Idle/Loading/Results/Error.
//! - `selector.rs` — equally-short path set and the active index.
//! - `presenter.rs` — path rendering, summaries, text views.
//! - `normalizer.rs` — season ordering and team grouping per connection.
//! - `classifier.rs` — failure message → user-facing category with hints.
//! - `response.rs` — wire path shape checks.
//! - `client.rs` — HTTP calls to the connection service.
//! - `config.rs` — settings file + flag overrides.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Network and filesystem access stay in `client.rs` and `config.rs`.
//! - Keep command handlers thin; delegate to services.

pub mod classifier;
pub mod client;
pub mod config;
pub mod controller;
pub mod normalizer;
pub mod output;
pub mod presenter;
pub mod response;
pub mod selector;
