//! Compile-time build metadata for the spidey binary.

/// Version and provenance stamped in by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_sha: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
}

const fn or_unknown(value: Option<&'static str>) -> &'static str {
    match value {
        Some(v) => v,
        None => "unknown",
    }
}

pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: env!("CARGO_PKG_VERSION"),
    git_sha: or_unknown(option_env!("SPIDEY_BUILD_GIT_SHA")),
    timestamp: or_unknown(option_env!("SPIDEY_BUILD_TIMESTAMP")),
    target: or_unknown(option_env!("SPIDEY_BUILD_TARGET")),
};

impl BuildInfo {
    /// One-line description used for `--version` output.
    pub fn version_line(self) -> String {
        format!(
            "{} (rev {}, built {}, target {})",
            self.version, self.git_sha, self.timestamp, self.target
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_line_starts_with_package_version() {
        let line = BUILD_INFO.version_line();
        assert!(line.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(line.contains("rev "));
    }
}
