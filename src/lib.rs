//! wonder - aggregates per-author commit statistics for a GitHub repository.
//!
//! The pipeline lists a repository's recent commits page by page, enriches
//! every commit with its statistics through a second API call, and folds the
//! results into per-author totals. See [`pipeline::Wonder`].

pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod pipeline;
pub mod routes;
