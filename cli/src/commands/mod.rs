pub mod decode;
pub mod health;
pub mod mcp;
pub mod search;
