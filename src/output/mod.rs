//! Human-readable output for the `netspec` binary.
//!
//! - [`describe`] - recognise an argument and describe the value
//! - [`terminal`] - aligned, colored field formatting

mod describe;
mod terminal;

pub use describe::{classify, describe, Parsed};
pub use terminal::{format_field, format_flags, format_heading, LABEL_WIDTH};
