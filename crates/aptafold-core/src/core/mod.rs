//! # Core Module
//!
//! This module provides the stateless building blocks of aptafold: the data records that
//! travel through a run, the readers and writers for the file formats at its edges, and
//! the dot-bracket structure analysis.
//!
//! ## Overview
//!
//! Nothing in this module spawns processes or holds state between calls. Each function
//! takes plain values and returns plain values, so every piece can be exercised on its
//! own and reused from the higher-level [`crate::engine`] and [`crate::workflows`] layers.
//!
//! ## Architecture
//!
//! - **Data Records** ([`models`]) - Sequence records, fold results, loop metrics, output rows
//! - **File I/O** ([`io`]) - FASTA input and CSV result tables
//! - **Structure Analysis** ([`structure`]) - Dot-bracket alphabet checks and loop counting
//!
//! ## Key Capabilities
//!
//! - **Order-preserving FASTA parsing**, eager or lazy, with line-accurate error reporting
//! - **Total loop analysis** that never fails, even on malformed bracket strings
//! - **Streaming CSV output** with configurable column names

pub mod io;
pub mod models;
pub mod structure;
