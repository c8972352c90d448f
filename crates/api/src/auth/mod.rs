//! Identity-provider token handling.

pub mod jwt;
