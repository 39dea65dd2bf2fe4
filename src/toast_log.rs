use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Append a timestamped line for a message shown to the user.
///
/// Failures to write are logged and otherwise ignored.
pub fn append_toast_log(path: &Path, msg: &str) {
    let res = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| writeln!(file, "{} - {}", Local::now().to_rfc3339(), msg));
    if let Err(e) = res {
        tracing::warn!(path = %path.display(), error = %e, "failed to append toast log");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_one_line_per_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toast.log");
        append_toast_log(&path, "first");
        append_toast_log(&path, "second");
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - first"));
        assert!(lines[1].ends_with(" - second"));
    }
}
