//! # Engine Module
//!
//! This module implements the stateful side of aptafold: launching the external folding
//! program, turning its replies into fold results, and joining them with structural
//! metrics into output rows.
//!
//! ## Overview
//!
//! The external process is the only part of the pipeline that can block, time out or be
//! cancelled, and it is isolated behind the [`folding::FoldingBackend`] trait. Everything
//! downstream of it works on plain values, so workflows can be exercised against a
//! deterministic fake backend without spawning anything.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Folding executable, pass-through options, timeout, batch width
//! - **Folding** ([`folding`]) - Backend trait, RNAfold process backend, reply parser, fail-soft invoker
//! - **Aggregation** ([`aggregate`]) - Joins records, fold results and metrics into rows
//! - **Cancellation** ([`cancel`]) - Shared token that stops in-flight invocations
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Per-record fold errors and batch-level engine errors
//!
//! ## Key Capabilities
//!
//! - **Injection-safe invocation**: sequences travel over stdin, never through a shell
//! - **Bounded invocations** with wall-clock timeouts and prompt cancellation
//! - **Fail-soft folding**: per-record failures become zero-valued results

pub mod aggregate;
pub mod cancel;
pub mod config;
pub mod error;
pub mod folding;
pub mod progress;
