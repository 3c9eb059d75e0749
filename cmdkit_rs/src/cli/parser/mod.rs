//! Option parsing for global and command arguments.
//!
//! # Module Structure
//!
//! - [`quotes`] - Quote coalescing (re-joins shell-split quoted runs)
//! - [`core`] - The option parser proper
//! - `helpers` - Help token detection, command suggestions
//!
//! # Usage
//!
//! ```
//! use cmdkit::cli::command::CommandRegistry;
//! use cmdkit::cli::parser::OptionParser;
//!
//! let registry = CommandRegistry::new();
//! let mut args: Vec<String> = vec!["-t".into(), "2".into()];
//! let options = OptionParser::new(&registry).parse(&mut args, 0).unwrap();
//! assert_eq!(options[0].as_long(), Some(2));
//! assert!(args.is_empty());
//! ```

pub mod core;
pub(crate) mod helpers;
pub mod quotes;

// Re-export public API
pub use self::core::OptionParser;
pub use quotes::{coalesce, coalesce_in_place};
