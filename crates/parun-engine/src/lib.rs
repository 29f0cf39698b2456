//! parun-engine: the bounded-concurrency execution core.
//!
//! Given an ordered list of command vectors, a concurrency cap and a
//! failure policy, the engine reproduces each command as an OS process,
//! manages its lifetime, and aggregates output and exit status
//! deterministically.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                            Engine                              │
//! │  launch in index order, at most job_limit running at once      │
//! │  ┌───────┐  pipe   ┌───────┐  pipe   ┌───────┐                 │
//! │  │ job 0 │────────▶│ job 1 │────────▶│ job 2 │   (pipeline)    │
//! │  └───────┘         └───────┘         └───────┘                 │
//! │     │ wait-any slot recycling    │ child-event latch           │
//! │     ▼                            ▼                             │
//! │  final phase: reap everything, or SIGTERM → grace → SIGKILL    │
//! │  drain captured stdout in index order → exit code of last job  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Concurrency comes from process-level parallelism: one control task plus
//! one OS process per job, connected by real kernel pipes. Every pipe
//! endpoint is an `OwnedFd` moved exactly once, so each descriptor is
//! closed exactly once, in the parent and in the child.

mod collector;
mod engine;
mod error;
mod launcher;
mod monitor;
mod queue;
mod terminator;

pub use engine::{Engine, RunReport};
pub use error::{EngineError, EngineResult};
pub use queue::Job;
