//! Mock infrastructure for testing external services
//!
//! This module provides mock servers and test helpers for the one external
//! dependency: the text-generation provider.

#![allow(dead_code)]


pub use inference::*;
