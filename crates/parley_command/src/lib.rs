//! Command trees for Parley.
//!
//! This crate provides:
//! - [`CommandNode`] - A command definition: aliases, permission, arguments, executor
//! - [`CommandRegistry`] - Case-insensitive alias lookup among sibling commands
//! - [`CommandTree`] - The arena owning every command, addressed by [`CommandId`]
//! - [`Invocation`] / [`Execution`] - Input to and view of a running command
//!
//! # Example
//!
//! ```
//! use parley_command::{CommandNode, CommandTree, Invocation};
//! use parley_foundation::{Identity, MessageLog};
//! use parley_parser::{ArgumentExt, IntegerArgument};
//!
//! let mut tree = CommandTree::new();
//! let root = tree.add_root(CommandNode::new("shop"))?;
//! tree.add_child(
//!     root,
//!     CommandNode::new("list")
//!         .with_argument(IntegerArgument::positive("page").or_default_value(1))
//!         .with_executor(|exec| {
//!             let page = exec.get("page").and_then(|v| v.as_int()).unwrap_or(1);
//!             exec.reply(&format!("page {page}"));
//!             Ok(())
//!         }),
//! )?;
//!
//! let log = MessageLog::new();
//! let bob = Identity::player("Bob");
//! tree.dispatch(&Invocation::new(&bob, root, "shop", ["list", "3"]), &log);
//! assert_eq!(log.last().as_deref(), Some("page 3"));
//! # Ok::<(), parley_foundation::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dispatch;
pub mod node;
pub mod registry;
pub mod tree;

pub use dispatch::{Execution, Invocation, ParsedCommand, USAGE_MESSAGE};
pub use node::{
    ARGUMENTS_SEPARATOR, COMMAND_PREFIX, CommandNode, Executor, PermissionTest,
    SOURCE_REJECTED_MESSAGE,
};
pub use registry::{CommandRegistry, normalize};
pub use tree::{CommandId, CommandTree};
