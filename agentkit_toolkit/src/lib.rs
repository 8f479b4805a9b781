//! Agent-facing toolkit over the built-in Solana actions.
//!
//! ```no_run
//! use std::sync::Arc;
//! use agentkit_core::Agentkit;
//! use agentkit_toolkit::{AgentTool, Toolkit};
//!
//! # fn main() -> anyhow::Result<()> {
//! let kit = Arc::new(Agentkit::from_env()?);
//! let toolkit = Toolkit::from_agentkit(kit);
//! for tool in toolkit.get_tools() {
//!     println!("{}", tool.name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod tool;
pub mod toolkit;

pub use tool::{ActionTool, AgentTool, ToolDefinition};
pub use toolkit::Toolkit;
