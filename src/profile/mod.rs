//! Per-tool profiling of a profile table.

mod tool_summary;

pub use tool_summary::{profile_tools, ToolSummary};
