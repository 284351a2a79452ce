//! # Core Models Module
//!
//! This module contains the transient data structures that flow through a single
//! aptafold run, from the parsed input records to the rows written to the output table.
//!
//! ## Overview
//!
//! Every entity is created per run and held only long enough to be written out; there
//! is no persistence layer. The models are deliberately plain values so that each
//! pipeline stage can be constructed and tested in isolation:
//!
//! - **Input** - A [`record::SequenceRecord`] per header in the input file
//! - **Folding** - A [`fold::FoldResult`] per record, either a validated structure or a sentinel
//! - **Analysis** - [`fold::StructuralMetrics`] derived from the dot-bracket structure
//! - **Output** - An [`row::OutputRow`] joining all of the above, one per input record
//!
//! ## Key Components
//!
//! - [`record`] - Identifier and sequence read from the input file
//! - [`fold`] - Fold outcome and loop descriptors
//! - [`row`] - Joined output row

pub mod fold;
pub mod record;
pub mod row;
