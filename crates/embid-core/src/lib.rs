//! # embid-core
//!
//! Core types for the embid embedding-lookup toolkit.
//!
//! This crate provides the foundations the lookup layers are built on:
//!
//! - [`CpuBackend`]: the default burn compute backend for the toolkit
//! - [`AutodiffCpuBackend`]: the differentiation collaborator, used by
//!   gradient checks and training callers
//! - [`TrainableModule`]: the named-parameter protocol through which
//!   save/load and optimization code discovers and mutates trainable state
//!
//! The tensor framework itself is [burn](https://crates.io/crates/burn);
//! nothing in this workspace reimplements differentiation or device
//! placement.

pub mod backend;
pub mod param;

pub use backend::*;
pub use param::*;
