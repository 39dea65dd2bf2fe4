use crate::catalog::AppRecord;
use anyhow::Context;
use std::path::Path;
use std::process::{Command, Stdio};

/// Start `record`'s target without waiting for it.
pub fn launch(record: &AppRecord) -> anyhow::Result<()> {
    launch_path(
        &record.target_path,
        record.arguments.as_deref(),
        record.working_dir.as_deref(),
    )
}

/// Spawn `path` with `args`. Targets that are not executables and carry
/// no arguments (folders, documents) are handed to the system opener
/// instead.
pub fn launch_path(
    path: &Path,
    args: Option<&str>,
    working_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let is_exe = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("exe"))
        .unwrap_or(false);
    let args = args.map(str::trim).filter(|a| !a.is_empty());

    if !is_exe && args.is_none() {
        tracing::info!(path = %path.display(), "opening with system handler");
        return open::that_detached(path)
            .with_context(|| format!("failed to open {}", path.display()));
    }

    let mut command = Command::new(path);
    if let Some(arg_str) = args {
        push_args(&mut command, arg_str);
    }
    if let Some(dir) = working_dir.filter(|d| d.is_dir()) {
        command.current_dir(dir);
    }
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    detach(&mut command);

    let child = command
        .spawn()
        .with_context(|| format!("failed to launch {}", path.display()))?;
    tracing::info!(path = %path.display(), pid = child.id(), "launched");
    Ok(())
}

/// Shortcut arguments are already a Windows command line; backslashes in
/// paths must reach the child untouched.
#[cfg(windows)]
fn push_args(command: &mut Command, arg_str: &str) {
    use std::os::windows::process::CommandExt;
    command.raw_arg(arg_str);
}

#[cfg(not(windows))]
fn push_args(command: &mut Command, arg_str: &str) {
    match shlex::split(arg_str) {
        Some(list) => command.args(list),
        None => command.args(arg_str.split_whitespace()),
    };
}

#[cfg(windows)]
fn detach(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    use windows::Win32::System::Threading::{CREATE_NEW_PROCESS_GROUP, DETACHED_PROCESS};
    command.creation_flags(DETACHED_PROCESS.0 | CREATE_NEW_PROCESS_GROUP.0);
}

#[cfg(not(windows))]
fn detach(_command: &mut Command) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_executable_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("nope.exe");
        let err = launch_path(&exe, Some("--flag"), None).unwrap_err();
        assert!(err.to_string().contains("failed to launch"));
    }

    fn wait_for(path: &Path) -> String {
        for _ in 0..100 {
            if let Ok(s) = std::fs::read_to_string(path) {
                if !s.trim().is_empty() {
                    return s;
                }
            }
            std::thread::sleep(std::time::Duration::from_millis(50));
        }
        panic!("{} was never written", path.display());
    }

    #[cfg(windows)]
    #[test]
    fn windows_path_arguments_reach_child_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = Path::new(r"C:\Windows\System32\cmd.exe");
        launch_path(cmd, Some(r"/c echo C:\x\y.ini>out.txt"), Some(dir.path())).unwrap();
        let out = wait_for(&dir.path().join("out.txt"));
        assert_eq!(out.trim(), r"C:\x\y.ini");
    }

    #[cfg(unix)]
    #[test]
    fn quoted_arguments_reach_child_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let sh = Path::new("/bin/sh");
        launch_path(
            sh,
            Some(r#"-c 'printf %s "$1" > out.txt' sh 'C:\x\y.ini'"#),
            Some(dir.path()),
        )
        .unwrap();
        let out = wait_for(&dir.path().join("out.txt"));
        assert_eq!(out, r"C:\x\y.ini");
    }
}
