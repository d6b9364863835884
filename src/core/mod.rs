//! Core types & traits: error model and the GitHub collaborator ports.

pub mod error;
pub mod github;
