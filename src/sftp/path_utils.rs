//! Cross-platform path utilities for SFTP operations
//!
//! Local paths are normalised lexically (no filesystem access) so that
//! configured context paths compare predictably against editor paths.
//! Remote SFTP paths always use `/` as separator.

use std::path::{Component, Path, PathBuf};

/// Check if a remote SFTP path is absolute.
pub fn is_absolute_remote_path(path: &str) -> bool {
    path.starts_with('/')
}

/// Resolve `.` and `..` components without touching the filesystem.
///
/// `..` never climbs above the root of an absolute path.
pub fn normalize_local_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Path of `target` relative to `base`, with `/` separators.
///
/// Both paths are normalised first. When `target` is not below `base` the
/// result climbs out with `..` segments.
pub fn relative_local_path(base: &Path, target: &Path) -> String {
    let base = normalize_local_path(base);
    let target = normalize_local_path(target);

    let base_parts: Vec<_> = base.components().collect();
    let target_parts: Vec<_> = target.components().collect();

    let common = base_parts
        .iter()
        .zip(target_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<String> = Vec::new();
    for _ in common..base_parts.len() {
        segments.push("..".to_string());
    }
    for part in &target_parts[common..] {
        segments.push(part.as_os_str().to_string_lossy().replace('\\', "/"));
    }
    segments.join("/")
}

/// Join remote SFTP path components using `/` separator.
///
/// The result is normalised the way POSIX `path.join` does: empty and `.`
/// segments are dropped and `..` pops the previous segment.
pub fn join_remote_path(base: &str, component: &str) -> String {
    let joined = if component.is_empty() {
        base.to_string()
    } else if base.is_empty() {
        component.to_string()
    } else if base.ends_with('/') {
        format!("{}{}", base, component)
    } else {
        format!("{}/{}", base, component)
    };
    normalize_remote_path(&joined)
}

/// Normalise a POSIX path lexically.
pub fn normalize_remote_path(path: &str) -> String {
    let absolute = is_absolute_remote_path(path);
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let body = segments.join("/");
    match (absolute, body.is_empty()) {
        (true, _) => format!("/{}", body),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_absolute_remote_path() {
        assert!(is_absolute_remote_path("/home/user"));
        assert!(is_absolute_remote_path("/"));
        assert!(!is_absolute_remote_path("relative/path"));
        assert!(!is_absolute_remote_path("C:\\Windows"));
    }

    #[test]
    fn test_join_remote_path() {
        assert_eq!(join_remote_path("/home", "file.txt"), "/home/file.txt");
        assert_eq!(join_remote_path("/home/", "file.txt"), "/home/file.txt");
        assert_eq!(join_remote_path("/", "home"), "/home");
        assert_eq!(join_remote_path("/srv", "a/./b.txt"), "/srv/a/b.txt");
        assert_eq!(join_remote_path("/srv/app", "../app2/x"), "/srv/app2/x");
        assert_eq!(join_remote_path("/srv", ""), "/srv");
    }

    #[test]
    fn test_normalize_remote_path() {
        assert_eq!(normalize_remote_path("/a//b/../c"), "/a/c");
        assert_eq!(normalize_remote_path("/.."), "/");
        assert_eq!(normalize_remote_path("a/../../b"), "../b");
        assert_eq!(normalize_remote_path(""), ".");
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_local_path() {
        assert_eq!(
            normalize_local_path(Path::new("/ws/./sub/../app")),
            PathBuf::from("/ws/app")
        );
        assert_eq!(normalize_local_path(Path::new("/../x")), PathBuf::from("/x"));
        assert_eq!(normalize_local_path(Path::new("a/..")), PathBuf::from("."));
    }

    #[cfg(unix)]
    #[test]
    fn test_relative_local_path() {
        assert_eq!(
            relative_local_path(Path::new("/ws"), Path::new("/ws/src/main.rs")),
            "src/main.rs"
        );
        assert_eq!(relative_local_path(Path::new("/ws"), Path::new("/ws")), "");
        assert_eq!(
            relative_local_path(Path::new("/ws/app"), Path::new("/ws/app2/x.txt")),
            "../app2/x.txt"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_relative_round_trip() {
        let base = Path::new("/ws/project");
        for rel in ["a.txt", "src/lib.rs", "deep/nested/dir/file", ".hidden/x"] {
            let joined = base.join(rel);
            assert_eq!(relative_local_path(base, &joined), rel);
        }
    }
}
