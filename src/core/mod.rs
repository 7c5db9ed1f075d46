//! 核心框架模块
//!
//! - Command: 语义命令（按键绑定的目标）
//! - Event: 统一输入事件（仅 TUI）

pub mod command;
#[cfg(feature = "tui")]
pub mod event;

pub use command::Command;
#[cfg(feature = "tui")]
pub use event::{InputEvent, Key};
