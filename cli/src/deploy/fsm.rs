//! Finite State Machine for deployment status polling

use crate::models::deployment::DeploymentStatus;

/// Polling state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    /// Waiting for the deployment to reach a terminal status
    Polling,

    /// Deployment finished successfully
    Succeeded,

    /// Deployment failed, or its status could not be determined
    Failed,
}

/// Polling event, one per status check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    /// The deployment is still rolling out
    InProgress(Option<DeploymentStatus>),

    /// The deployment succeeded
    Succeeded(String),

    /// The deployment failed
    Failed(String),
}

/// Polling FSM
#[derive(Debug, Clone)]
pub struct PollFsm {
    state: PollState,
    message: Option<String>,
    checks: u32,
}

impl PollFsm {
    /// Create a new FSM in polling state
    pub fn new() -> Self {
        Self {
            state: PollState::Polling,
            message: None,
            checks: 0,
        }
    }

    /// Get current state
    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Message of the terminal transition, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Number of status checks processed
    pub fn checks(&self) -> u32 {
        self.checks
    }

    /// Process an event and transition state
    pub fn process(&mut self, event: PollEvent) -> Result<(), String> {
        let new_state = match (&self.state, event) {
            (PollState::Polling, PollEvent::InProgress(_)) => PollState::Polling,
            (PollState::Polling, PollEvent::Succeeded(message)) => {
                self.message = Some(message);
                PollState::Succeeded
            }
            (PollState::Polling, PollEvent::Failed(message)) => {
                self.message = Some(message);
                PollState::Failed
            }

            // Terminal states accept nothing
            (state, event) => {
                return Err(format!("Invalid transition: {:?} -> {:?}", state, event));
            }
        };

        self.checks += 1;
        self.state = new_state;
        Ok(())
    }
}

impl Default for PollFsm {
    fn default() -> Self {
        Self::new()
    }
}
