//! UEX access, normalization and the on-disk snapshot cache.

pub mod cache;
pub mod config;
pub mod data_source;
pub mod normalize;
pub mod uex;
