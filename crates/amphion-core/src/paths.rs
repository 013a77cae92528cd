use std::path::{Path, PathBuf};

pub const AMPHION_DIR: &str = ".amphion";
pub const CONFIG_FILE: &str = ".amphion/chat-dispatch.yaml";
pub const LOGS_DIR: &str = ".amphion/logs";
pub const DISPATCH_LOG_FILE: &str = ".amphion/logs/chat-dispatch.log";

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn dispatch_log_path(root: &Path) -> PathBuf {
    root.join(DISPATCH_LOG_FILE)
}
