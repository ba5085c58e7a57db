//! CLI command implementations.

pub mod common;
pub mod demo;
pub mod inspect;
pub mod run;
pub mod script;
pub mod tick;
