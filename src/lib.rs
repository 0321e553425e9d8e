//! # cmdgrammar
//!
//! Grammar-driven parsing of single command lines for interactive shells and REPLs.
//!
//! A host supplies a grammar as a mapping of rule names to rule expressions, feeds input
//! lines to a [CommandParser](cmdgrammar::CommandParser), and reads the matched arguments
//! back from its result mapping.

pub mod cmdgrammar;
