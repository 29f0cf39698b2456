//! Engine configuration.

/// Smallest accepted concurrency cap.
pub const MIN_JOB_LIMIT: usize = 1;
/// Largest accepted concurrency cap, and the default when none is given.
pub const MAX_JOB_LIMIT: usize = 120;

/// What arms the abort sequence when the pipeline or halt-on-failure
/// policy is active.
///
/// The failure latch records child *state changes*, not failures: with
/// [`AbortOn::AnyChildEvent`] (the default) a halt-enabled or pipelined
/// run aborts once any job has terminated by the end of the launch phase,
/// even a job that succeeded. [`AbortOn::FailureOnly`] restricts the
/// latch to genuinely failed jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbortOn {
    /// Any child termination sets the latch.
    #[default]
    AnyChildEvent,
    /// Only a non-zero exit, a signal death, or an exec failure sets it.
    FailureOnly,
}

/// Everything the execution engine needs for one run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Hard ceiling on simultaneously running jobs, in
    /// [[`MIN_JOB_LIMIT`], [`MAX_JOB_LIMIT`]].
    pub job_limit: usize,
    /// Chain all jobs into one pipeline, stdout to stdin; only the last
    /// stage's output surfaces.
    pub pipeline: bool,
    /// Abort the whole run once the failure latch trips.
    pub halt_on_failure: bool,
    /// What trips the failure latch. See [`AbortOn`].
    pub abort_on: AbortOn,
    /// The jobs, in launch and output order. Each command vector must be
    /// non-empty; element 0 is the program.
    pub commands: Vec<Vec<String>>,
}

impl EngineConfig {
    /// Configuration with defaults: maximum job limit, no pipeline, no
    /// halt-on-failure, historical abort policy.
    pub fn new(commands: Vec<Vec<String>>) -> Self {
        Self {
            job_limit: MAX_JOB_LIMIT,
            pipeline: false,
            halt_on_failure: false,
            abort_on: AbortOn::default(),
            commands,
        }
    }

    pub fn with_job_limit(mut self, limit: usize) -> Self {
        self.job_limit = limit;
        self
    }

    pub fn with_pipeline(mut self, pipeline: bool) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn with_halt_on_failure(mut self, halt: bool) -> Self {
        self.halt_on_failure = halt;
        self
    }

    pub fn with_abort_on(mut self, abort_on: AbortOn) -> Self {
        self.abort_on = abort_on;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::new(vec![vec!["true".into()]]);
        assert_eq!(config.job_limit, MAX_JOB_LIMIT);
        assert!(!config.pipeline);
        assert!(!config.halt_on_failure);
        assert_eq!(config.abort_on, AbortOn::AnyChildEvent);
    }
}
