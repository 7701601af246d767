//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types
//! - Handle-keyed job registries
//! - Frame time management
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod time;
pub mod logging;
