// MCP (Model Context Protocol) surface for the Sumble data API.
// Transport-independent: the HTTP/SSE server and the stdio binary both
// drive `McpServer::handle_request`.

pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use error::ToolError;
pub use server::McpServer;
pub use tools::ToolRegistry;
