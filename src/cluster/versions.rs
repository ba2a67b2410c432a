use anyhow::{Context, Result, bail};
use semver::Version;

/// Kubernetes releases this tool knows how to bootstrap, newest first
pub const SUPPORTED_KUBERNETES_VERSIONS: &[&str] = &["1.31.2", "1.30.6", "1.29.10"];

/// Parsed list of supported versions, newest first
///
/// # Errors
///
/// Returns an error if one of the built-in version strings does not parse
pub fn supported() -> Result<Vec<Version>> {
    let mut versions = SUPPORTED_KUBERNETES_VERSIONS
        .iter()
        .map(|v| Version::parse(v).with_context(|| format!("bad built-in version {v}")))
        .collect::<Result<Vec<_>>>()?;
    versions.sort_unstable_by(|a, b| b.cmp(a));
    Ok(versions)
}

/// Version used when none was requested
///
/// # Errors
///
/// Returns an error if the supported version list is empty or malformed
pub fn default_version() -> Result<Version> {
    supported()?
        .into_iter()
        .next()
        .context("no supported kubernetes versions")
}

/// Resolve a requested version, empty means [`default_version`]
///
/// A leading `v` is accepted (`v1.30.6`).
///
/// # Errors
///
/// Returns an error if the version does not parse or is not supported
pub fn resolve(requested: &str) -> Result<Version> {
    let requested = requested.trim();
    if requested.is_empty() {
        return default_version();
    }

    let version = Version::parse(requested.strip_prefix('v').unwrap_or(requested))
        .with_context(|| format!("Invalid kubernetes version: {requested}"))?;

    let supported = supported()?;
    if !supported.contains(&version) {
        bail!(
            "Unsupported kubernetes version: {version}, supported versions: {}",
            supported
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(version)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_supported_sorted_newest_first() {
        let versions = supported().unwrap();
        assert_eq!(versions.len(), SUPPORTED_KUBERNETES_VERSIONS.len());
        assert!(versions.windows(2).all(|w| w.first() > w.get(1)));
    }

    #[test]
    fn test_default_version() {
        assert_eq!(default_version().unwrap(), Version::new(1, 31, 2));
    }

    #[test]
    fn test_resolve_empty_uses_default() {
        assert_eq!(resolve("").unwrap(), default_version().unwrap());
    }

    #[test]
    fn test_resolve_explicit() {
        assert_eq!(resolve("1.30.6").unwrap(), Version::new(1, 30, 6));
        assert_eq!(resolve("v1.29.10").unwrap(), Version::new(1, 29, 10));
    }

    #[test]
    fn test_resolve_invalid() {
        let err = resolve("1.30").unwrap_err();
        assert!(err.to_string().contains("Invalid kubernetes version: 1.30"));

        let err = resolve("1.18.0").unwrap_err();
        assert!(
            err.to_string()
                .starts_with("Unsupported kubernetes version: 1.18.0")
        );
    }
}
