use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use merkletree::Hash32;

pub fn init_logging(max_level: &str) {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(max_level));
}

/// Relative path of `path` under `root`.
pub fn relative_path(root: &Path, path: &Path) -> Result<PathBuf> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| anyhow!("{} is not under {}", path.display(), root.display()))?;
    Ok(relative.to_path_buf())
}

/// Bytes of a relative path with `/` between components on every platform.
///
/// Names that are not valid UTF-8 keep their raw encoding.
pub fn slash_name(relative: &Path) -> Vec<u8> {
    let mut name = Vec::new();
    for (i, component) in relative.components().enumerate() {
        if i > 0 {
            name.push(b'/');
        }
        name.extend_from_slice(component.as_os_str().as_encoded_bytes());
    }
    name
}

pub fn hex_root(root: Option<&Hash32>) -> String {
    match root {
        Some(root) => hex::encode(root),
        None => String::from("<empty>"),
    }
}
