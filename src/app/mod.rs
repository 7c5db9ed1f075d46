//! 应用层：工作台、主题与 Markdown 预览

pub mod preview;
pub mod theme;
pub mod workbench;

pub use workbench::{Workbench, WorkbenchDeps};
