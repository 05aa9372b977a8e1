//! Deployment module

pub mod fsm;
pub mod poller;
pub mod submitter;
