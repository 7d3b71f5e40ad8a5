//! CLI command implementations

pub mod identity;
pub mod info;

use cubegen_lut::CubeConfig;

/// Format a domain for display
pub fn format_domain(config: &CubeConfig) -> String {
    format!("[{}, {}]", config.domain_min(), config.domain_max())
}
