#![forbid(unsafe_code)]

use std::path::Path;

use crate::pak::error::{PakError, PakResult};

/// Default reserved prefix: version-control metadata never belongs in a pak.
pub const DEFAULT_RESERVED: &str = ".git";

pub fn normalize_rel_path(input_root: &Path, file_path: &Path) -> PakResult<String> {
    let rel = file_path
        .strip_prefix(input_root)
        .map_err(|_| PakError::Outside(file_path.to_string_lossy().into_owned()))?;

    let mut out = String::new();
    for (i, comp) in rel.components().enumerate() {
        if i != 0 {
            out.push('/');
        }
        out.push_str(&comp.as_os_str().to_string_lossy());
    }

    while out.starts_with('/') {
        out.remove(0);
    }
    out = out.replace('\\', "/");

    if out.is_empty() {
        return Err(PakError::Invalid("empty relative path".into()));
    }

    Ok(out)
}

/// True when the normalized relative path starts with the reserved
/// directory name (as its first component, or as the whole path).
pub fn is_reserved(norm_path: &str, reserved: &str) -> bool {
    if reserved.is_empty() {
        return false;
    }
    match norm_path.strip_prefix(reserved) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

pub fn should_exclude(norm_path: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|e| !e.is_empty() && norm_path.contains(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn normalizes_to_forward_slashes() {
        let root = PathBuf::from("root");
        let file = root.join("sub").join("b.txt");
        assert_eq!(normalize_rel_path(&root, &file).unwrap(), "sub/b.txt");
    }

    #[test]
    fn rejects_path_outside_root() {
        let root = PathBuf::from("root");
        assert!(normalize_rel_path(&root, Path::new("elsewhere/a.txt")).is_err());
    }

    #[test]
    fn reserved_matches_first_component_only() {
        assert!(is_reserved(".git/config", ".git"));
        assert!(is_reserved(".git", ".git"));
        assert!(!is_reserved(".gitignore", ".git"));
        assert!(!is_reserved("src/.git/config", ".git"));
        assert!(!is_reserved("a.txt", ".git"));
    }

    #[test]
    fn exclude_is_substring_match() {
        let ex = vec!["tmp".to_string()];
        assert!(should_exclude("a/tmp/b", &ex));
        assert!(!should_exclude("a/b", &ex));
        assert!(!should_exclude("a/b", &[String::new()]));
    }
}
