//! Identity LUT command.
//!
//! Generates the lattice, passes it through unchanged and writes the `.cube`.

use crate::IdentityArgs;
use anyhow::Result;
use cubegen_lut::{CubeConfig, Identity, Resolution};
use tracing::{debug, trace};

/// Runs the identity command.
pub fn run(args: IdentityArgs, verbose: u8) -> Result<()> {
    trace!(size = %args.size, output = %args.output.display(), "identity::run");

    let config = build_config(&args)?;
    debug!(domain = %super::format_domain(&config), precision = config.precision(), "resolved config");

    if verbose > 0 {
        println!(
            "Baking {0}x{0}x{0} identity LUT over {1} -> {2}",
            config.size(),
            super::format_domain(&config),
            args.output.display()
        );
    }

    cubegen_lut::bake(&args.output, &config, &Identity)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}

/// Resolves the config: environment first, then command-line overrides.
fn build_config(args: &IdentityArgs) -> Result<CubeConfig> {
    let resolution = Resolution::parse_bounded(&args.size, args.max_size)?;
    let mut config = CubeConfig::from_env(resolution)?;

    if args.min.is_some() || args.max.is_some() {
        let min = args.min.unwrap_or(config.domain_min());
        let max = args.max.unwrap_or(config.domain_max());
        config = config.with_domain(min, max)?;
    }
    if let Some(precision) = args.precision {
        config = config.with_precision(precision)?;
    }
    if let Some(comment) = &args.comment {
        config = config.with_comment(comment.clone());
    }

    Ok(config)
}
