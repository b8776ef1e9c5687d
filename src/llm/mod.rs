//! LLM 模块
//!
//! 提供结构化输出（generateContent）的 HTTP 客户端。

mod client;
mod format;
mod types;

pub use client::LlmClient;
pub use types::*;
