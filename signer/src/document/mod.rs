//! Generic document tree helpers.
//!
//! Batches are handled as `serde_json::Value` trees built with the
//! `preserve_order` feature, so mappings keep their field order through a
//! decode/sign/encode cycle. Every access that expects a particular shape goes
//! through [`access`], which reports a [`crate::SignError::MalformedTree`] with
//! the offending path instead of assuming the type.

pub mod access;
pub mod attributes;

pub use access::{as_object_mut, child_list, sub_object_state, SubObject};
pub use attributes::{merge_attribute, set_string_attribute, string_value};
