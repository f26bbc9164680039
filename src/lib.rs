//! locscan - localization scanner for C#, Visual Basic and ASP.NET sources
//!
//! locscan finds string literals that should move to `.resx` resource files
//! and existing references to resource entries (`Namespace.Class.Key`).
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanning engine, resource trie and project plumbing
//! - `issues`: Finding type definitions and reporting trait
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod utils;
