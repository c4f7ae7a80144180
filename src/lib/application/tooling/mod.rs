mod discovery;
mod error;
mod interface;
mod process;
mod registry;
mod result;

pub use discovery::discover_tools;
pub use error::{DiscoveryError, ToolInvokeError};
pub use interface::{ServerToolInfo, ToolInvoker};
pub use process::McpProcess;
pub use registry::{ToolDescriptor, ToolRegistry};
pub use result::adapt_call_result;
