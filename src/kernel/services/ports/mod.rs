//! Service ports: traits + data contracts.

pub mod generation;
pub mod kv;
pub mod settings;

pub use generation::{GenerationError, GenerationRequest, GenerationResponse, TextGenerator};
pub use kv::{KeyValueStore, KvError, MemoryKeyValueStore};
pub use settings::{AssistantSettings, KeybindingRule, Settings};
