use std::path::{Path, PathBuf};

/// File extension of the shortcut files picked up by ingestion.
pub const SHORTCUT_EXTENSION: &str = "lnk";

/// What a shortcut file points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutInfo {
    pub target: PathBuf,
    pub arguments: Option<String>,
    pub working_dir: Option<PathBuf>,
}

/// Reads shortcut files. The Windows implementation goes through the shell's
/// link object; tests substitute their own.
pub trait ShortcutResolver {
    fn resolve(&self, shortcut: &Path) -> anyhow::Result<ShortcutInfo>;
}

/// Returns true when `path` has the shortcut extension (any case).
pub fn is_shortcut(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(SHORTCUT_EXTENSION))
        .unwrap_or(false)
}

/// Treat empty strings read from a link as absent.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Shortcut resolver backed by the Windows shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellLinkResolver;

#[cfg(windows)]
impl ShortcutResolver for ShellLinkResolver {
    fn resolve(&self, shortcut: &Path) -> anyhow::Result<ShortcutInfo> {
        win::read_link(shortcut)
    }
}

#[cfg(not(windows))]
impl ShortcutResolver for ShellLinkResolver {
    fn resolve(&self, shortcut: &Path) -> anyhow::Result<ShortcutInfo> {
        anyhow::bail!(
            "cannot resolve {}: shell links are only supported on Windows",
            shortcut.display()
        )
    }
}

#[cfg(windows)]
mod win {
    use super::{non_empty, ShortcutInfo};
    use anyhow::{anyhow, Context, Result};
    use std::path::{Path, PathBuf};
    use windows::core::{Interface, HSTRING};
    use windows::Win32::System::Com::{
        CoCreateInstance, CoInitializeEx, CoUninitialize, IPersistFile, CLSCTX_INPROC_SERVER,
        COINIT_APARTMENTTHREADED, STGM_READ,
    };
    use windows::Win32::UI::Shell::{IShellLinkW, ShellLink};

    const MAX_PATH_CHARS: usize = 1024;
    const MAX_ARGS_CHARS: usize = 4096;

    /// Balances a successful `CoInitializeEx` on drop.
    struct ComScope {
        initialized: bool,
    }

    impl ComScope {
        fn enter() -> Self {
            let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
            Self {
                initialized: hr.is_ok(),
            }
        }
    }

    impl Drop for ComScope {
        fn drop(&mut self) {
            if self.initialized {
                unsafe { CoUninitialize() };
            }
        }
    }

    fn wide_to_string(buf: &[u16]) -> String {
        let end = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
        String::from_utf16_lossy(&buf[..end])
    }

    pub(super) fn read_link(path: &Path) -> Result<ShortcutInfo> {
        let _com = ComScope::enter();
        // Interfaces are released before the COM scope closes.
        let info = unsafe {
            let link: IShellLinkW = CoCreateInstance(&ShellLink, None, CLSCTX_INPROC_SERVER)
                .context("creating shell link object")?;
            let persist: IPersistFile = link.cast()?;
            persist
                .Load(&HSTRING::from(path.as_os_str()), STGM_READ)
                .with_context(|| format!("loading {}", path.display()))?;

            let mut target = vec![0u16; MAX_PATH_CHARS];
            link.GetPath(&mut target, std::ptr::null_mut(), 0)
                .context("reading link target")?;
            let mut args = vec![0u16; MAX_ARGS_CHARS];
            let _ = link.GetArguments(&mut args);
            let mut dir = vec![0u16; MAX_PATH_CHARS];
            let _ = link.GetWorkingDirectory(&mut dir);

            ShortcutInfo {
                target: PathBuf::from(wide_to_string(&target)),
                arguments: non_empty(wide_to_string(&args)),
                working_dir: non_empty(wide_to_string(&dir)).map(PathBuf::from),
            }
        };
        if info.target.as_os_str().is_empty() {
            return Err(anyhow!("{} has no target", path.display()));
        }
        Ok(info)
    }
}
