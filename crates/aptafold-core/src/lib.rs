//! # aptafold Core Library
//!
//! Batch prediction of RNA secondary structures for aptamer libraries, and loop-region
//! analysis of the resulting dot-bracket structures.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture that keeps the single external
//! dependency, the folding program, isolated in one place.
//!
//! - **[`core`]: The Foundation.** Stateless records (`SequenceRecord`, `FoldResult`,
//!   `OutputRow`), FASTA and CSV I/O, and the total dot-bracket loop analysis.
//!
//! - **[`engine`]: The Logic Core.** The folding backend trait and its RNAfold process
//!   implementation, the fail-soft invoker, result aggregation, configuration,
//!   cancellation and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Complete stages built from the layers below:
//!   folding a batch of records into ordered output rows, and annotating an existing
//!   structure table with loop metrics.
//!
//! ## Example
//!
//! ```no_run
//! use aptafold::core::io::fasta;
//! use aptafold::engine::cancel::CancellationToken;
//! use aptafold::engine::config::{BatchConfig, FoldConfig};
//! use aptafold::engine::folding::{FoldingInvoker, RnaFoldProcess};
//! use aptafold::engine::progress::ProgressReporter;
//! use aptafold::workflows;
//!
//! let records = fasta::parse(">apt-1\nGGGAAACCC\n")?;
//! let invoker = FoldingInvoker::new(RnaFoldProcess::new(FoldConfig::default()));
//! let outcome = workflows::fold::run(
//!     records,
//!     &invoker,
//!     &BatchConfig::sequential(),
//!     &ProgressReporter::new(),
//!     &CancellationToken::new(),
//! )?;
//! println!("{} row(s), {} failed", outcome.summary.rows, outcome.summary.failed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
