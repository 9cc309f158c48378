//! Operating-system detection and platform-derived default paths.
use std::fmt;
use std::path::PathBuf;

/// Detected operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux and other Unix-likes without a dedicated layout.
    Linux,
    /// Windows.
    Windows,
    /// macOS.
    MacOs,
    /// Anything else; no default mods directory is known.
    Other,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Windows => write!(f, "windows"),
            Self::MacOs => write!(f, "macos"),
            Self::Other => write!(f, "unknown"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    /// Detected operating system.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            os: Self::detect_os(),
        }
    }

    /// Create a platform with an explicit OS.
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Whether this is Windows.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.os == Os::Windows
    }

    /// Default game client mods directory, read from the process environment.
    ///
    /// Returns `None` when the OS is unknown or the needed variable is unset.
    #[must_use]
    pub fn default_mods_dir(&self) -> Option<PathBuf> {
        self.default_mods_dir_with(|name| std::env::var(name).ok())
    }

    /// Default game client mods directory, resolving variables through `env`.
    pub fn default_mods_dir_with<F>(&self, env: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        match self.os {
            Os::Windows => env("APPDATA").map(|d| PathBuf::from(d).join(".minecraft").join("mods")),
            Os::MacOs => env("HOME").map(|h| {
                PathBuf::from(h)
                    .join("Library")
                    .join("Application Support")
                    .join("minecraft")
                    .join("mods")
            }),
            Os::Linux => env("HOME").map(|h| PathBuf::from(h).join(".minecraft").join("mods")),
            Os::Other => None,
        }
    }

    /// Per-user data directory under which the mod manager keeps its root.
    ///
    /// `$XDG_DATA_HOME`, then `~/.local/share` (`%APPDATA%` on Windows).
    pub fn data_dir_with<F>(&self, env: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.is_windows() {
            return env("APPDATA").map(PathBuf::from);
        }
        env("XDG_DATA_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| env("HOME").map(|h| PathBuf::from(h).join(".local").join("share")))
    }

    const fn detect_os() -> Os {
        if cfg!(target_os = "windows") {
            Os::Windows
        } else if cfg!(target_os = "macos") {
            Os::MacOs
        } else if cfg!(target_os = "linux") {
            Os::Linux
        } else {
            Os::Other
        }
    }
}
