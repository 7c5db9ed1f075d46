//! mdtyper - 终端 Markdown 编辑器库
//!
//! 模块结构：
//! - core: 命令与输入事件
//! - kernel: 无头状态机（文档集合、编辑缓冲、AI 助手状态）与服务端口/适配器
//! - app: 应用层（Workbench、预览、主题）
//! - tui: 终端生命周期（raw mode / alternate screen）

pub mod core;
pub mod kernel;

#[cfg(feature = "tui")]
pub mod app;
#[cfg(feature = "tui")]
pub mod tui;
