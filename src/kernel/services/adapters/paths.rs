//! 应用目录
//!
//! 数据/日志放在平台的应用数据目录下，设置文件放在缓存目录下：
//! - macOS: ~/Library/Application Support/mdtyper，~/Library/Caches
//! - Linux: $XDG_DATA_HOME/mdtyper（或 ~/.local/share/mdtyper），$XDG_CACHE_HOME（或 ~/.cache）
//! - Windows: %APPDATA%\mdtyper，%LOCALAPPDATA%

use std::path::{Path, PathBuf};

const APP_NAME: &str = "mdtyper";
const DATA_DIR: &str = "data";
const LOG_DIR: &str = "logs";

#[derive(Debug, Clone, Copy)]
enum BaseDir {
    AppData,
    Cache,
}

fn env_dir(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn home_join(rel: &str) -> Option<PathBuf> {
    env_dir("HOME").map(|home| home.join(rel))
}

#[cfg(target_os = "macos")]
fn base_dir(kind: BaseDir) -> Option<PathBuf> {
    match kind {
        BaseDir::AppData => home_join("Library/Application Support"),
        BaseDir::Cache => home_join("Library/Caches"),
    }
}

#[cfg(target_os = "linux")]
fn base_dir(kind: BaseDir) -> Option<PathBuf> {
    match kind {
        BaseDir::AppData => env_dir("XDG_DATA_HOME").or_else(|| home_join(".local/share")),
        BaseDir::Cache => env_dir("XDG_CACHE_HOME").or_else(|| home_join(".cache")),
    }
}

#[cfg(target_os = "windows")]
fn base_dir(kind: BaseDir) -> Option<PathBuf> {
    match kind {
        BaseDir::AppData => env_dir("APPDATA"),
        BaseDir::Cache => env_dir("LOCALAPPDATA").or_else(|| env_dir("APPDATA")),
    }
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
fn base_dir(kind: BaseDir) -> Option<PathBuf> {
    let _ = kind;
    home_join(".local/share")
}

fn app_dir() -> Option<PathBuf> {
    base_dir(BaseDir::AppData).map(|dir| dir.join(APP_NAME))
}

/// 设置文件所在的缓存根目录（不含应用名）
pub(crate) fn cache_base_dir() -> Option<PathBuf> {
    base_dir(BaseDir::Cache)
}

/// 文档存储目录（键值文件所在处）
pub fn get_data_dir() -> Option<PathBuf> {
    app_dir().map(|p| p.join(DATA_DIR))
}

pub fn get_log_dir() -> Option<PathBuf> {
    app_dir().map(|p| p.join(LOG_DIR))
}

pub fn ensure_data_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_data_dir(), "Cannot determine data directory")
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_log_dir(), "Cannot determine log directory")
}

fn ensure_dir(dir: Option<PathBuf>, missing: &str) -> std::io::Result<PathBuf> {
    let dir = dir.ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, missing))?;
    create_if_missing(&dir)?;
    Ok(dir)
}

pub(crate) fn create_if_missing(dir: &Path) -> std::io::Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
