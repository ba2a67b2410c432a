use std::fmt;

/// Build variant the binary was compiled as
///
/// Resolved once by the entry point and injected into [`crate::cli::commands::new`],
/// which decides which flags exist on the command surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    /// Regular user build
    #[default]
    Release,
    /// Exposes operational flags such as `--kubernetes-version`
    Development,
}

impl BuildMode {
    /// Build mode of the running binary, `Development` only with the `dev` feature
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(feature = "dev") {
            Self::Development
        } else {
            Self::Release
        }
    }

    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Release => write!(f, "release"),
            Self::Development => write!(f, "development"),
        }
    }
}
