//! 展示层
//!
//! 控制器状态机、分类图标映射和页面渲染。

mod controller;
mod icons;
mod session;
mod view;

pub use controller::GENERIC_ERROR_MESSAGE;
pub use session::Session;
pub use view::IndexPage;

#[cfg(test)]
pub(crate) use session::testing;
