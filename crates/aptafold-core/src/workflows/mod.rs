//! # Workflows Module
//!
//! This module provides the high-level entry points that run a complete aptafold stage
//! over a batch of inputs.
//!
//! ## Overview
//!
//! Workflows tie the [`crate::core`] readers and analysis to the [`crate::engine`]
//! folding machinery. They report progress through a
//! [`ProgressReporter`](crate::engine::progress::ProgressReporter), never abort on a
//! single bad record, and leave file handling at the edges to the caller.
//!
//! ## Architecture
//!
//! - **Fold Workflow** ([`fold`]) - Fold, analyze and aggregate every record, sequentially or
//!   with a bounded worker pool, preserving input order and honouring cancellation.
//! - **Analyze Workflow** ([`analyze`]) - Append loop metrics to an existing table that
//!   already carries a structure column.
//!
//! ## Key Capabilities
//!
//! - **One row per input record**, whatever happens to individual folds
//! - **Order independent of completion order** when folding concurrently
//! - **Aggregate failure counts** for end-of-run reporting

pub mod analyze;
pub mod fold;
