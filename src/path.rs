//! Path splitting and entry-name validation.
//!
//! Paths are absolute, `/`-separated, and resolved against the fixed
//! namespace; there is no working directory and no `.`/`..` traversal.

use crate::error::FsError;
use crate::types::NAME_MAX;

/// Split a path into entry-name components.
///
/// Leading, trailing, and repeated separators collapse, so `""`, `"/"`, and
/// `"//"` all yield no components (the root). `.` and `..` are rejected.
pub fn split_components(path: &str) -> Result<Vec<&str>, FsError> {
    let mut components = Vec::new();
    for component in path.split('/') {
        if component.is_empty() {
            continue;
        }
        if component == "." || component == ".." {
            return Err(FsError::InvalidArgument(format!(
                "relative component {component:?} in path {path:?}"
            )));
        }
        components.push(component);
    }
    Ok(components)
}

/// Whether `name` is usable as a directory-entry name.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= NAME_MAX
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\0')
}
