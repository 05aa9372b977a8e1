//! maws Library
//!
//! Client for ECS service deployments: submits a deployment request for a
//! service and polls its status until the rollout is finished.

pub mod app;
pub mod console;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod models;
pub mod storage;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
