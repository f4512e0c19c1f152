//! bid_target_optimizer — response-curve fitting and bid target suggestions.
//!
//! Purpose
//! -------
//! Turn sparse "what-if" simulation points reported by an advertising
//! platform (metrics observed at candidate bid targets) into continuous
//! response curves, search the primary curve for an optimal target, and
//! derive a risk-limited suggestion together with predictions of every
//! tracked metric.
//!
//! Key behaviors
//! -------------
//! - `optimization`: Nelder–Mead curve fitting (power-log and quadratic
//!   families) and bounded sign-gradient target search, both on Argmin.
//! - `suggestion`: entity shapes, metric registry, per-entity orchestration
//!   and row rendering.
//!
//! Invariants & assumptions
//! ------------------------
//! - Pure in-process computation: no I/O, no persistence, no shared state.
//! - Deterministic: identical inputs give identical results.
//!
//! Conventions
//! -----------
//! - Progress and data-quality decisions are logged through `tracing`; the
//!   crate never installs a subscriber.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the code; `tests/` holds end-to-end pipelines
//!   from provider JSON to rendered rows.

pub mod optimization;
pub mod suggestion;
