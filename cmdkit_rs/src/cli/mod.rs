//! CLI layer: commands, option parsing, dispatch and the process entry point.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 argv: [globals...] <command> [options...]       │
//! └─────────────────────────────────────────────────────────────────┘
//!                                  │
//!                                  ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Dispatcher                             │
//! │   first token naming a registered command splits the list       │
//! │  ┌─────────────────────┐          ┌─────────────────────────┐   │
//! │  │  OptionParser       │          │  OptionParser           │   │
//! │  │  (tokens before)    │          │  (tokens after)         │   │
//! │  └─────────┬───────────┘          └────────────┬────────────┘   │
//! │            ▼                                   ▼                │
//! │  ┌─────────────────────┐          ┌─────────────────────────┐   │
//! │  │  Configuration      │          │  OptionDeclarations     │   │
//! │  │  (app name, labels) │          │  (required, equivalent) │   │
//! │  └─────────┬───────────┘          └────────────┬────────────┘   │
//! └────────────┼───────────────────────────────────┼────────────────┘
//!              └─────────────────┬─────────────────┘
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │      Command::execute (with a Runtime unless it opts out)       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`command`] - Command trait, registry, declarations and help
//! - [`configuration`] - Bound global options and the label store
//! - [`parser`] - Quote coalescing and option parsing
//! - [`dispatch`] - Command identification and execution
//! - [`entrypoint`] - Shared `main()` body for binaries

pub mod command;
pub mod configuration;
pub mod dispatch;
pub mod entrypoint;
pub mod parser;

// Re-export main types for convenience
pub use command::{Command, CommandLookup, CommandRegistry, Invocation, OptionDeclarations};
pub use configuration::Configuration;
pub use dispatch::{DispatchResult, Dispatcher};
pub use parser::OptionParser;
