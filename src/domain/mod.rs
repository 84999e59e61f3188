//! Shared data model layer (structs only).
//!
//! ## Purpose
//! - Keep wire, view and settings structs in one place.
//! - Avoid cyclic imports between services.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! `PathView` and `ClassifiedError` are the `--json` output contracts.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod models;
