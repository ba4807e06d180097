//! The `codediff` command-line front end.
//!
//! Reads panels from files, runs them through [`codediff_core`], and prints
//! gutter views, fold ranges, find results, or summaries.

pub mod cli;
pub mod commands;
pub mod config;
pub mod paths;
