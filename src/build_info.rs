//! Build metadata embedded by build.rs

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const BUILD_NUMBER: Option<&str> = option_env!("FOODSWAP_BUILD_NUMBER");
const BUILD_TIMESTAMP: Option<&str> = option_env!("FOODSWAP_BUILD_TIMESTAMP");

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self::from_env(BUILD_NUMBER, BUILD_TIMESTAMP)
    }

    fn from_env(number: Option<&str>, timestamp: Option<&'static str>) -> Self {
        Self {
            version: VERSION,
            build_number: number.and_then(|n| n.trim().parse().ok()).unwrap_or(0),
            build_timestamp: timestamp.unwrap_or("unknown"),
        }
    }
}

/// Banner on stderr; stdout is the MCP channel
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("FoodSwap v{} (build #{}, {})", info.version, info.build_number, info.build_timestamp);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_from_env() {
        let info = BuildInfo::from_env(Some("42"), Some("2026-01-01T00:00:00Z"));
        assert_eq!(info.build_number, 42);
        assert_eq!(info.build_timestamp, "2026-01-01T00:00:00Z");

        let info = BuildInfo::from_env(Some("4x2"), None);
        assert_eq!(info.build_number, 0);
        assert_eq!(info.build_timestamp, "unknown");
    }
}
