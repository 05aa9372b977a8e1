//! Command options

use std::time::Duration;

use crate::deploy::poller;

/// Options of `ecs deploy`
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Name of the service to deploy
    pub service_name: String,

    /// Container image to use for the service
    pub image: Option<String>,

    /// Force a new deployment even if the image has not changed
    pub force: bool,

    /// Secret ARNs to attach to the service
    pub secret_arns: Vec<String>,

    /// Poller options used once the deployment is started
    pub poller: poller::Options,
}

impl DeployOptions {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            image: None,
            force: false,
            secret_arns: Vec::new(),
            poller: poller::Options::default(),
        }
    }
}

/// Options of `ecs status`
#[derive(Debug, Clone)]
pub struct StatusOptions {
    /// Name of the service to check
    pub service_name: String,

    /// Poller options
    pub poller: poller::Options,
}

impl StatusOptions {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            poller: poller::Options::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.poller.delay = delay;
        self
    }
}
