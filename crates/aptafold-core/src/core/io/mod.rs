//! Provides input/output functionality for sequence and result table formats.
//!
//! This module contains the reader for header-delimited (FASTA) sequence files and
//! the CSV table readers and writers used by the fold and analyze workflows. Sequence
//! readers share the [`traits::SequenceFile`] interface so that callers can read from
//! paths, strings, or any buffered reader in the same way.

pub mod fasta;
pub mod table;
pub mod traits;
