//! Configuration module for otelsign.
//!
//! This module contains the signing processor configuration and the per-level
//! attribute names derived from it.

pub mod processor;

pub use processor::{AttributeNames, ProcessorConfig};
