//! Cube info command.
//!
//! Prints the header fields and entry count of `.cube` files.

use crate::InfoArgs;
use anyhow::{Context, Result};
use cubegen_lut::{read_cube_file, CubeFile};
use std::path::Path;
use tracing::trace;

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for path in &args.input {
        trace!(path = %path.display(), "info::run");
        let lut = read_cube_file(path)
            .with_context(|| format!("Failed to read: {}", path.display()))?;

        print_text(path, &lut, verbose);

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}

fn print_text(path: &Path, lut: &CubeFile, verbose: u8) {
    println!("{}", path.display());
    if let Some(title) = &lut.title {
        println!("  Title:      {}", title);
    }
    println!("  Size:       {0}x{0}x{0}", lut.size);
    println!("  Entries:    {}", lut.entry_count());
    println!("  Domain:     [{}, {}]", lut.domain_min, lut.domain_max);

    if verbose > 0 {
        for comment in &lut.comments {
            println!("  Comment:    {}", comment);
        }
        if let (Some(first), Some(last)) = (lut.entries.first(), lut.entries.last()) {
            println!("  First:      {:?}", first);
            println!("  Last:       {:?}", last);
        }
    }
}
