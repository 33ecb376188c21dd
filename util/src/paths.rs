use crate::config;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Ensure the parent directory of a *file path* exists (no-op if none).
pub fn ensure_parent_dir<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    if let Some(parent) = file_path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Global storage root (absolute), from `config::submission_storage_root()`.
/// If relative in env, resolve against current_dir().
pub fn storage_root() -> PathBuf {
    let root = config::submission_storage_root();
    let p = PathBuf::from(root);
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// A single assignment folder: {STORAGE_ROOT}/assignment_{assignment_id}
pub fn assignment_dir(assignment_id: i64) -> PathBuf {
    storage_root().join(format!("assignment_{assignment_id}"))
}

/// A student's folder under an assignment:
/// {STORAGE_ROOT}/assignment_{assignment_id}/user_{user_id}
pub fn submission_dir(assignment_id: i64, user_id: i64) -> PathBuf {
    assignment_dir(assignment_id).join(format!("user_{user_id}"))
}

/// Full on-disk path for a student's uploaded file (does not create).
pub fn submission_file_path(assignment_id: i64, user_id: i64, filename: &str) -> PathBuf {
    submission_dir(assignment_id, user_id).join(filename)
}

/// Storage-root-relative reference stored in the database.
/// Example: `assignment_3/user_7/solution.pdf`
pub fn submission_file_url(assignment_id: i64, user_id: i64, filename: &str) -> String {
    format!("assignment_{assignment_id}/user_{user_id}/{filename}")
}
