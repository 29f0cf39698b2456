//! parun-types: the data contract shared by the execution engine and the CLI.
//!
//! This crate is deliberately small and dependency-free:
//!
//! - **Job status**: the lifecycle of one job, `Pending → Running → terminal`
//! - **Engine configuration**: concurrency cap, pipeline and failure policy
//! - **Exit codes**: the process exit codes parun reports, and the mapping
//!   from a job's terminal status to them

pub mod config;
pub mod exit;
pub mod job;

pub use config::{AbortOn, EngineConfig, MAX_JOB_LIMIT, MIN_JOB_LIMIT};
pub use job::JobStatus;
