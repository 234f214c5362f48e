//! Core helpers shared across all subdomains.
//!
//! - [`string`]: slug titling and identifier joining

pub mod string;
