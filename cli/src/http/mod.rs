//! HTTP access to the deployment API

pub mod client;
pub mod deployments;
