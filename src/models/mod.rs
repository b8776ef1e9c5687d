//! 数据模型

mod api;
mod recommendation;

pub use api::*;
pub use recommendation::*;

#[cfg(test)]
pub(crate) use recommendation::fixtures;
