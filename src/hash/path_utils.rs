// Path key utilities
// Derives the root-relative string keys used as file identity across trees

use std::path::{Component, Path};

/// Build the relative key for a file under `root`: the root prefix is
/// stripped and the remaining components are joined with `/`, with no
/// leading separator. Returns None when `path` is not under `root`.
pub fn relative_key(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;

    let mut key = String::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                if !key.is_empty() {
                    key.push('/');
                }
                key.push_str(&part.to_string_lossy());
            }
            // Anything else means the path escaped the root
            _ => return None,
        }
    }

    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}
