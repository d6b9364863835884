//! MCP tools that let an agent drive GitHub: create repositories, commit
//! files, open issues and pull requests, audit a repository, write a README.

pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod tools;
