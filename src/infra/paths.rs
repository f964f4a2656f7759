// ============================================================
// Layer 6 — Path Resolution
// ============================================================
// Config and model paths may be typed relative to wherever the
// user launched the program. The external workflows may change
// directory, so every path is made absolute up front.
//
// Normalisation is purely lexical (no filesystem access):
//   "."  is dropped
//   ".." removes the previous component (never climbs above "/")

use std::path::{Component, Path, PathBuf};

/// Absolute, normalised form of `path`, taking relative paths
/// against `cwd`.
pub fn absolute_path(path: impl AsRef<Path>, cwd: &Path) -> PathBuf {
    let path = path.as_ref();
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    normalize(&joined)
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_joined_onto_cwd() {
        assert_eq!(
            absolute_path("configs/model.cfg", Path::new("/home/user/run")),
            PathBuf::from("/home/user/run/configs/model.cfg")
        );
    }

    #[test]
    fn test_absolute_kept() {
        assert_eq!(
            absolute_path("/data/train.cfg", Path::new("/elsewhere")),
            PathBuf::from("/data/train.cfg")
        );
    }

    #[test]
    fn test_dot_and_dotdot_collapsed() {
        assert_eq!(
            absolute_path("./a/../b/./c.cfg", Path::new("/root/x")),
            PathBuf::from("/root/x/b/c.cfg")
        );
        assert_eq!(
            absolute_path("../../../../up.cfg", Path::new("/a/b")),
            PathBuf::from("/up.cfg")
        );
    }

    #[test]
    fn test_relative_cwd_keeps_leading_parent() {
        assert_eq!(absolute_path("../m.save", Path::new("")), PathBuf::from("../m.save"));
    }
}
