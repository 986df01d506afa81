use std::path::PathBuf;

/// Shared application state / 共享应用状态
///
/// The data directory is resolved once at startup; its contents are
/// re-read on every search.
pub struct AppState {
    pub data_dir: PathBuf,
}
