//! Locating the C print runtime that generated programs link against.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeFile {
    /// Path relative to the runtime root.
    pub path: PathBuf,
    pub contents: String,
}

impl RuntimeFile {
    pub fn is_header(&self) -> bool {
        self.path.extension().is_some_and(|ext| ext == "h")
    }
}

/// The `runtime/` directory shipped at the workspace root.
pub fn default_runtime_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../runtime")
}

/// Collect every `.h` and `.c` file under `root`, sorted by path.
pub fn load_runtime_files(root: impl AsRef<Path>) -> Result<Vec<RuntimeFile>, CoreError> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(CoreError::MissingRuntime(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        let is_c_source = path
            .extension()
            .is_some_and(|ext| ext == "h" || ext == "c");
        if path.is_file() && is_c_source {
            let contents = fs::read_to_string(path)?;
            let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
            files.push(RuntimeFile {
                path: relative,
                contents,
            });
        }
    }
    Ok(files)
}
