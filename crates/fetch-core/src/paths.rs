use std::env;
use std::path::{Path, PathBuf};

/// Root against which relative config and repository paths resolve: the
/// parent of the directory holding the executable, falling back to the
/// current directory when that cannot be determined.
pub fn project_root() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| {
            exe.parent()
                .and_then(Path::parent)
                .map(Path::to_path_buf)
        })
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
