//! Testing utilities and mock implementations
//!
//! This module provides fixtures and a recording thread sink for testing the
//! board engine without the surrounding dashboard services.

pub mod mocks;

pub use mocks::*;
