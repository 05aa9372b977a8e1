//! OpenAPI models for the ECS service deployment API.

pub mod models;
