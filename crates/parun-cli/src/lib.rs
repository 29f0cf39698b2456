//! parun front end: everything between the command line and the engine.
//!
//! The binary in `main.rs` stays thin; the layers live here so they can be
//! tested directly:
//!
//! - **settings**: argument parsing and validation
//! - **lexer**: the space-splitting, double-quote-aware line tokenizer
//! - **commands**: building the executable command list
//! - **dry_run**: printing generated commands without executing
//! - **sequential**: the one-command-per-stdin-line mode

pub mod commands;
pub mod dry_run;
pub mod lexer;
pub mod sequential;
pub mod settings;
