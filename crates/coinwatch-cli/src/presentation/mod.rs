//! Shared CLI presentation utilities.
//!
//! This module provides reusable display and formatting functions
//! for consistent CLI output across commands.
//!
//! Keep this module format-only: no domain transforms.

pub mod format;

pub use format::{format_change, format_price, format_quantity, print_separator};
