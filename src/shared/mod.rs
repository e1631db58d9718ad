//! Shared utilities used across SDK modules.

pub mod scaling;

pub use scaling::{format_token_amount, scale_token_amount, ScalingError};
