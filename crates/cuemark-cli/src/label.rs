//! Label derivation from file paths.

/// Returns the file name of `path` without directory and extension.
///
/// Both `/` and `\` separate directories. A `.` inside a directory name is not
/// treated as an extension separator.
pub fn label_from_path(path: &str) -> String {
    let start = path
        .rfind(|c: char| c == '/' || c == '\\')
        .map_or(0, |i| i + 1);
    let end = match path.rfind('.') {
        Some(dot) if dot >= start => dot,
        _ => path.len(),
    };
    path[start..end].to_string()
}
