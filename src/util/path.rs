//! Posix-style key path helpers. Keys are plain strings, `/` separated,
//! and never touch the local filesystem.

/// Collapses empty and `.` segments and resolves `..` lexically.
///
/// A leading `/` is kept and `..` cannot climb above it. An empty or fully
/// collapsed relative path normalizes to `""`.
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
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
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}

/// Joins `name` onto `base`. An absolute `name` replaces `base`.
pub fn join(base: &str, name: &str) -> String {
    if base.is_empty() || name.starts_with('/') {
        name.to_string()
    } else if base.ends_with('/') {
        format!("{}{}", base, name)
    } else {
        format!("{}/{}", base, name)
    }
}

/// Whether normalized `path` is `root` or lies below it, compared by whole
/// segments so that `/rootx` is not inside `/root`.
pub fn is_within(root: &str, path: &str) -> bool {
    if root.is_empty() {
        return !(path.starts_with('/') || path == ".." || path.starts_with("../"));
    }

    if root == "/" {
        return path.starts_with('/');
    }

    path == root
        || path
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Whether `name` names an entry of the current directory itself: non-empty,
/// not a dot segment and free of `/`.
pub fn is_plain_name(name: &str) -> bool {
    !(name.is_empty() || name == "." || name == ".." || name.contains('/'))
}

/// Listing prefix for a directory: the path with exactly one trailing `/`,
/// or `""` for the bucket top level.
pub fn dir_prefix(path: &str) -> String {
    if path.is_empty() || path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

/// `path` relative to `root`, `"."` when they are equal.
pub fn relative_to<'a>(root: &str, path: &'a str) -> &'a str {
    let rest = if root.is_empty() {
        path
    } else {
        path.strip_prefix(root).unwrap_or(path)
    };

    match rest.trim_start_matches('/') {
        "" => ".",
        rest => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let cases = vec![
            ("/bucket-root", "/bucket-root"),
            ("/bucket-root/", "/bucket-root"),
            ("/bucket-root//sub/./x", "/bucket-root/sub/x"),
            ("/bucket-root/sub/..", "/bucket-root"),
            ("/bucket-root/../..", "/"),
            ("/", "/"),
            ("a/b/../c", "a/c"),
            ("a/../..", ".."),
            ("../../a", "../../a"),
            ("", ""),
            (".", ""),
        ];

        for (input, expected) in cases {
            assert_eq!(normalize(input), expected, "failed for case: {}", input);
        }
    }

    #[test]
    fn test_join() {
        let cases = vec![
            ("/root", "sub", "/root/sub"),
            ("/root/", "sub", "/root/sub"),
            ("/root", "/other", "/other"),
            ("", "sub", "sub"),
            ("/root", "..", "/root/.."),
        ];

        for (base, name, expected) in cases {
            assert_eq!(join(base, name), expected, "failed for case: {} + {}", base, name);
        }
    }

    #[test]
    fn test_is_within() {
        let cases = vec![
            ("/bucket-root", "/bucket-root", true),
            ("/bucket-root", "/bucket-root/sub", true),
            ("/bucket-root", "/bucket-rootx", false),
            ("/bucket-root", "/", false),
            ("/bucket-root", "/other/bucket-root", false),
            ("/", "/anything", true),
            ("/", "relative", false),
            ("", "", true),
            ("", "sub/dir", true),
            ("", "..", false),
            ("", "../sub", false),
            ("", "/abs", false),
            ("a/b", "a", false),
            ("a/b", "a/b/c", true),
        ];

        for (root, path, expected) in cases {
            assert_eq!(
                is_within(root, path),
                expected,
                "failed for case: {} in {}",
                path,
                root
            );
        }
    }

    #[test]
    fn test_is_plain_name() {
        let cases = vec![
            ("a.txt", true),
            (".hidden", true),
            ("..data", true),
            ("", false),
            (".", false),
            ("..", false),
            ("/abs", false),
            ("sub/a.txt", false),
            ("dir/", false),
        ];

        for (input, expected) in cases {
            assert_eq!(is_plain_name(input), expected, "failed for case: {:?}", input);
        }
    }

    #[test]
    fn test_dir_prefix() {
        let cases = vec![("/root", "/root/"), ("/root/", "/root/"), ("/", "/"), ("", "")];

        for (input, expected) in cases {
            assert_eq!(dir_prefix(input), expected, "failed for case: {}", input);
        }
    }

    #[test]
    fn test_relative_to() {
        let cases = vec![
            ("/root", "/root", "."),
            ("/root", "/root/sub/x", "sub/x"),
            ("", "sub", "sub"),
            ("", "", "."),
            ("/", "/sub", "sub"),
        ];

        for (root, path, expected) in cases {
            assert_eq!(relative_to(root, path), expected, "failed for case: {}", path);
        }
    }
}
