//! Job lifecycle status.

/// Status of one job. Advances monotonically: `Pending → Running → terminal`;
/// a job never regresses to an earlier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// Created but not yet launched.
    Pending,
    /// Process is alive.
    Running,
    /// Process exited normally with this code.
    Completed(i32),
    /// Process was terminated by this signal.
    Signaled(i32),
    /// The program could not be executed at all (missing, not executable).
    ExecFailed,
}

impl JobStatus {
    /// True once the job can no longer change state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed(_) | JobStatus::Signaled(_) | JobStatus::ExecFailed
        )
    }

    /// True for any terminal state other than a clean zero exit.
    pub fn is_failure(&self) -> bool {
        match self {
            JobStatus::Completed(code) => *code != 0,
            JobStatus::Signaled(_) | JobStatus::ExecFailed => true,
            JobStatus::Pending | JobStatus::Running => false,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Completed(code) => write!(f, "exited({code})"),
            JobStatus::Signaled(sig) => write!(f, "signaled({sig})"),
            JobStatus::ExecFailed => write!(f, "exec failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Completed(0).is_terminal());
        assert!(JobStatus::Signaled(15).is_terminal());
        assert!(JobStatus::ExecFailed.is_terminal());
    }

    #[test]
    fn zero_exit_is_not_a_failure() {
        assert!(!JobStatus::Completed(0).is_failure());
        assert!(JobStatus::Completed(1).is_failure());
        assert!(JobStatus::Signaled(9).is_failure());
        assert!(JobStatus::ExecFailed.is_failure());
    }
}
