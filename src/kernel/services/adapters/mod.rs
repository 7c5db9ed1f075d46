//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod gemini;
#[cfg(feature = "tui")]
pub mod keybinding;
pub mod kv_file;
pub mod paths;
pub mod runtime;
pub mod settings;

pub use gemini::GeminiClient;
#[cfg(feature = "tui")]
pub use keybinding::{KeybindingContext, KeybindingService};
pub use kv_file::FileKeyValueStore;
pub use paths::{ensure_data_dir, ensure_log_dir, get_data_dir, get_log_dir};
pub use runtime::{AppMessage, AsyncRuntime};
pub use settings::{ensure_settings_file, get_settings_path, load_settings};
