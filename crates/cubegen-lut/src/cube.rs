//! `.cube` 3D LUT serialization.
//!
//! Writes a transformed lattice buffer as an Adobe/Resolve style `.cube`
//! file, and reads such files back for inspection.
//!
//! # Format
//!
//! ```text
//! ## optional comment
//!
//! TITLE "Generated by modified ctlrender from Color Transformation Language files"
//! LUT_3D_SIZE 33
//! LUT_3D_INPUT_RANGE -0.500000 2.000000
//!
//! 0.000000 0.000000 0.000000
//! ...
//! 1.000000 1.000000 1.000000
//! ```
//!
//! The input range line only appears when the domain is not `[0, 1]`. Body
//! lines follow buffer order: red varies fastest, blue slowest.
//!
//! # Number formatting
//!
//! Values are fixed-point with exactly `precision` fractional digits. They
//! are rounded from the exact binary value of the `f32`; exact ties go to
//! the even digit, so `0.125` at two digits is written `0.12`.
//!
//! # Example
//!
//! ```rust,ignore
//! use cubegen_lut::{cube, lattice, CubeConfig, Resolution};
//!
//! let config = CubeConfig::new(Resolution::parse("33")?);
//! let pixels = lattice::generate(&config);
//! cube::write_cube_file("identity.cube", &config, &pixels)?;
//! ```

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::{CubeConfig, CubeError, CubeResult, PixelBuffer};

/// Title line written into every generated LUT.
pub const TITLE: &str = "Generated by modified ctlrender from Color Transformation Language files";

/// Writes `pixels` as a `.cube` file at `path`.
///
/// Never overwrites: an existing path fails with
/// [`CubeError::OutputAlreadyExists`] and the file is left untouched. The
/// buffer length is checked against the configured size before anything is
/// created on disk.
pub fn write_cube_file<P: AsRef<Path>>(
    path: P,
    config: &CubeConfig,
    pixels: &PixelBuffer,
) -> CubeResult<()> {
    let path = path.as_ref();
    check_cardinality(config, pixels)?;

    let file = create_new(path)?;
    let mut writer = BufWriter::new(file);
    emit(&mut writer, config, pixels)?;
    writer.flush()?;

    info!(path = %path.display(), entries = pixels.len(), "cube file written");
    Ok(())
}

/// Writes `pixels` as `.cube` text to any writer.
pub fn write_cube<W: Write>(writer: &mut W, config: &CubeConfig, pixels: &PixelBuffer) -> CubeResult<()> {
    check_cardinality(config, pixels)?;
    emit(writer, config, pixels)
}

/// Header and body; cardinality is already checked by the callers.
fn emit<W: Write>(writer: &mut W, config: &CubeConfig, pixels: &PixelBuffer) -> CubeResult<()> {
    let prec = config.precision();

    // Header
    if let Some(comment) = config.comment() {
        writeln!(writer, "## {}", comment)?;
        writeln!(writer)?;
    }
    writeln!(writer, "TITLE \"{}\"", TITLE)?;
    writeln!(writer, "LUT_3D_SIZE {}", config.size())?;
    if !config.has_default_domain() {
        writeln!(
            writer,
            "LUT_3D_INPUT_RANGE {:.prec$} {:.prec$}",
            config.domain_min(),
            config.domain_max()
        )?;
    }
    writeln!(writer)?;

    // Data, alpha dropped
    for px in pixels.pixels() {
        writeln!(writer, "{:.prec$} {:.prec$} {:.prec$}", px[0], px[1], px[2])?;
    }

    debug!(entries = pixels.len(), precision = prec, "cube body written");
    Ok(())
}

fn check_cardinality(config: &CubeConfig, pixels: &PixelBuffer) -> CubeResult<()> {
    let expected = config.resolution().entry_count();
    if pixels.len() != expected {
        return Err(CubeError::BufferSizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

fn create_new(path: &Path) -> CubeResult<File> {
    // create_new makes the existence check and the open a single step.
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|err| match err.kind() {
            io::ErrorKind::AlreadyExists => CubeError::OutputAlreadyExists {
                path: path.to_path_buf(),
            },
            _ => CubeError::OutputUnwritable {
                path: path.to_path_buf(),
                source: err,
            },
        })
}

/// Contents of a `.cube` 3D LUT file.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeFile {
    /// `TITLE` value without quotes.
    pub title: Option<String>,
    /// Comment lines with the leading `#` characters and one space removed.
    pub comments: Vec<String>,
    /// Grid resolution from `LUT_3D_SIZE`.
    pub size: usize,
    /// Input domain minimum.
    pub domain_min: f32,
    /// Input domain maximum.
    pub domain_max: f32,
    /// Output RGB values in file order (red fastest).
    pub entries: Vec<[f32; 3]>,
}

/// Reads a `.cube` 3D LUT file.
pub fn read_cube_file<P: AsRef<Path>>(path: P) -> CubeResult<CubeFile> {
    let file = File::open(path.as_ref())?;
    parse_cube(BufReader::new(file))
}

/// Parses a `.cube` 3D LUT from a reader.
///
/// Accepts both `LUT_3D_INPUT_RANGE` and the per-channel
/// `DOMAIN_MIN`/`DOMAIN_MAX` keywords. Per-channel domains must be equal on
/// all three channels, since only cube-shaped domains are representable.
pub fn parse_cube<R: BufRead>(reader: R) -> CubeResult<CubeFile> {
    let mut title = None;
    let mut comments = Vec::new();
    let mut size: Option<usize> = None;
    let mut domain_min = 0.0_f32;
    let mut domain_max = 1.0_f32;
    let mut entries: Vec<[f32; 3]> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            let comment = comment.trim_start_matches('#');
            comments.push(comment.strip_prefix(' ').unwrap_or(comment).to_string());
            continue;
        }

        let keyword = line.split_whitespace().next().unwrap_or_default();
        match keyword {
            "TITLE" => {
                let value = line["TITLE".len()..].trim();
                title = Some(value.trim_matches('"').to_string());
            }
            "LUT_3D_SIZE" => size = Some(parse_size(line)?),
            "LUT_1D_SIZE" => {
                return Err(CubeError::Parse("expected 3D LUT, found 1D".into()));
            }
            "LUT_3D_INPUT_RANGE" => {
                let [min, max] = parse_floats::<2>(line, 1)?;
                domain_min = min;
                domain_max = max;
            }
            "DOMAIN_MIN" => domain_min = parse_uniform_domain(line)?,
            "DOMAIN_MAX" => domain_max = parse_uniform_domain(line)?,
            _ => entries.push(parse_floats::<3>(line, 0)?),
        }
    }

    let size = size.ok_or_else(|| CubeError::Parse("missing LUT_3D_SIZE".into()))?;
    let expected = size
        .checked_pow(3)
        .ok_or_else(|| CubeError::Parse(format!("LUT_3D_SIZE too large: {}", size)))?;
    if entries.len() != expected {
        return Err(CubeError::Parse(format!(
            "expected {} values, found {}",
            expected,
            entries.len()
        )));
    }

    Ok(CubeFile {
        title,
        comments,
        size,
        domain_min,
        domain_max,
        entries,
    })
}

impl CubeFile {
    /// Number of body entries (N³ for a valid file).
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Entry for grid point `(r, g, b)`.
    pub fn get(&self, r: usize, g: usize, b: usize) -> Option<[f32; 3]> {
        if r >= self.size || g >= self.size || b >= self.size {
            return None;
        }
        self.entries
            .get(crate::lattice::lattice_index(self.size, r, g, b))
            .copied()
    }
}

// Helper functions

fn parse_size(line: &str) -> CubeResult<usize> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(CubeError::Parse("invalid size line".into()));
    }
    parts[1]
        .parse()
        .map_err(|_| CubeError::Parse(format!("invalid size value: {}", parts[1])))
}

fn parse_floats<const N: usize>(line: &str, skip: usize) -> CubeResult<[f32; N]> {
    let parts: Vec<&str> = line.split_whitespace().skip(skip).collect();
    if parts.len() != N {
        return Err(CubeError::Parse(format!("invalid line: {}", line)));
    }
    let mut out = [0.0_f32; N];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| CubeError::Parse(format!("invalid number '{}' in line: {}", part, line)))?;
    }
    Ok(out)
}

fn parse_uniform_domain(line: &str) -> CubeResult<f32> {
    let [r, g, b] = parse_floats::<3>(line, 1)?;
    if r != g || g != b {
        return Err(CubeError::Parse(format!("non-uniform domain not supported: {}", line)));
    }
    Ok(r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lattice, Resolution};
    use std::io::Cursor;

    fn render(config: &CubeConfig, pixels: &PixelBuffer) -> String {
        let mut out = Vec::new();
        write_cube(&mut out, config, pixels).expect("write failed");
        String::from_utf8(out).unwrap()
    }

    fn config(size: usize) -> CubeConfig {
        CubeConfig::new(Resolution::new(size).unwrap())
    }

    #[test]
    fn header_for_default_domain() {
        let cfg = config(3);
        let text = render(&cfg, &lattice::generate(&cfg));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], format!("TITLE \"{}\"", TITLE));
        assert_eq!(lines[1], "LUT_3D_SIZE 3");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "0.000000 0.000000 0.000000");
        assert_eq!(lines[4], "0.500000 0.000000 0.000000");
        assert_eq!(*lines.last().unwrap(), "1.000000 1.000000 1.000000");
        assert_eq!(lines.len(), 3 + 27);
        assert!(!text.contains("LUT_3D_INPUT_RANGE"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn header_with_comment_and_range() {
        let cfg = config(3)
            .with_domain(-0.5, 2.0)
            .unwrap()
            .with_comment("alexa logC to acesLog");
        let text = render(&cfg, &lattice::generate(&cfg));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "## alexa logC to acesLog");
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with("TITLE "));
        assert_eq!(lines[3], "LUT_3D_SIZE 3");
        assert_eq!(lines[4], "LUT_3D_INPUT_RANGE -0.500000 2.000000");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "-0.500000 -0.500000 -0.500000");
    }

    #[test]
    fn range_written_when_only_one_bound_differs() {
        let cfg = config(3).with_domain(0.0, 4.0).unwrap().with_precision(2).unwrap();
        let text = render(&cfg, &lattice::generate(&cfg));
        assert!(text.contains("LUT_3D_INPUT_RANGE 0.00 4.00\n"));
    }

    #[test]
    fn alpha_not_written() {
        let cfg = config(3);
        let mut pixels = lattice::generate(&cfg);
        for px in pixels.pixels_mut() {
            px[3] = 0.25;
        }
        let text = render(&cfg, &pixels);
        let body: Vec<&str> = text.lines().skip(3).collect();
        assert!(body.iter().all(|line| line.split(' ').count() == 3));
    }

    #[test]
    fn precision_rounds_not_truncates() {
        let cfg = config(3).with_precision(4).unwrap();
        let mut pixels = lattice::generate(&cfg);
        pixels.pixels_mut()[0] = [0.123456789, 1.0, 0.99996, 1.0];
        let text = render(&cfg, &pixels);
        assert_eq!(text.lines().nth(3), Some("0.1235 1.0000 1.0000"));
    }

    #[test]
    fn ties_round_half_to_even() {
        let cfg = config(3).with_precision(2).unwrap();
        let mut pixels = lattice::generate(&cfg);
        // Exactly representable, so these are true ties.
        pixels.pixels_mut()[0] = [0.125, 0.375, 0.625, 1.0];
        let text = render(&cfg, &pixels);
        assert_eq!(text.lines().nth(3), Some("0.12 0.38 0.62"));
    }

    #[test]
    fn widest_precision() {
        let cfg = config(3).with_precision(crate::MAX_PRECISION).unwrap();
        let text = render(&cfg, &lattice::generate(&cfg));
        let first = text.lines().nth(3).unwrap();
        assert_eq!(first.split(' ').next().unwrap(), format!("0.{}", "0".repeat(32)));
    }

    #[test]
    fn zero_precision() {
        let cfg = config(3).with_precision(0).unwrap();
        let text = render(&cfg, &lattice::generate(&cfg));
        assert_eq!(text.lines().nth(3), Some("0 0 0"));
        assert_eq!(text.lines().last(), Some("1 1 1"));
    }

    #[test]
    fn mismatched_buffer_rejected() {
        let cfg = config(4);
        let pixels = lattice::generate(&config(3));
        let err = write_cube(&mut Vec::new(), &cfg, &pixels).unwrap_err();
        assert!(matches!(err, CubeError::BufferSizeMismatch { expected: 64, actual: 27 }));
    }

    #[test]
    fn parse_written_cube() {
        let cfg = config(5).with_domain(-0.125, 1.5).unwrap().with_comment("check");
        let text = render(&cfg, &lattice::generate(&cfg));
        let lut = parse_cube(Cursor::new(text)).expect("parse failed");

        assert_eq!(lut.size, 5);
        assert_eq!(lut.title.as_deref(), Some(TITLE));
        assert_eq!(lut.comments, vec!["check".to_string()]);
        assert_eq!(lut.domain_min, -0.125);
        assert_eq!(lut.domain_max, 1.5);
        assert_eq!(lut.entry_count(), 125);
        assert_eq!(lut.get(4, 0, 0), Some([1.5, -0.125, -0.125]));
        assert_eq!(lut.get(5, 0, 0), None);
    }

    #[test]
    fn parse_domain_keywords() {
        let cube = r#"
# Test LUT
TITLE "Test Grade"
LUT_3D_SIZE 2
DOMAIN_MIN 0.0 0.0 0.0
DOMAIN_MAX 2.0 2.0 2.0

0.0 0.0 0.0
1.0 0.0 0.0
0.0 1.0 0.0
1.0 1.0 0.0
0.0 0.0 1.0
1.0 0.0 1.0
0.0 1.0 1.0
1.0 1.0 1.0
"#;
        let lut = parse_cube(Cursor::new(cube)).expect("parse failed");
        assert_eq!(lut.size, 2);
        assert_eq!(lut.title.as_deref(), Some("Test Grade"));
        assert_eq!(lut.domain_max, 2.0);
        assert_eq!(lut.get(1, 0, 1), Some([1.0, 0.0, 1.0]));
    }

    #[test]
    fn parse_errors() {
        let missing_size = "0.0 0.0 0.0\n";
        assert!(matches!(parse_cube(Cursor::new(missing_size)), Err(CubeError::Parse(_))));

        let one_d = "LUT_1D_SIZE 2\n0 0 0\n1 1 1\n";
        assert!(matches!(parse_cube(Cursor::new(one_d)), Err(CubeError::Parse(_))));

        let short = "LUT_3D_SIZE 2\n0 0 0\n";
        assert!(matches!(parse_cube(Cursor::new(short)), Err(CubeError::Parse(_))));

        let bad_value = "LUT_3D_SIZE 2\n0 0 zero\n";
        assert!(matches!(parse_cube(Cursor::new(bad_value)), Err(CubeError::Parse(_))));

        let skewed = "LUT_3D_SIZE 2\nDOMAIN_MIN 0 0.1 0\n";
        assert!(matches!(parse_cube(Cursor::new(skewed)), Err(CubeError::Parse(_))));
    }
}
