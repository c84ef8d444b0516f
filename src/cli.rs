use anyhow::{anyhow, bail, Context};
use clap::{ArgAction, Parser};
use pingxel::addr::BaseAddress;
use pingxel::area::AxisOrigin;
use pingxel::color::Rgba;
use pingxel::config::DEFAULT_BASE_ADDRESS;
use pingxel::source::SizeRequest;
use std::path::{Path, PathBuf};

/// Command-Line arguments as a well formatted struct, parsed using clap.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub(crate) struct CliOpts {
    /// The image to draw
    #[arg(required_unless_present = "fill")]
    pub image: Option<PathBuf>,

    /// Draw a flat color rectangle instead of an image
    ///
    /// The color is given as RRGGBB or RRGGBBAA hex digits; a missing alpha
    /// channel defaults to fully opaque. Requires explicit --width and --height.
    #[arg(long = "fill", conflicts_with = "image", requires = "width", requires = "height")]
    pub fill: Option<Rgba>,

    /// Width to resize the source to before drawing
    ///
    /// Possible values: ["auto", <number>]. "auto" derives the width from
    /// --height and the source's aspect ratio, or keeps the source width.
    #[arg(long = "width", default_value = "auto")]
    pub width: SizeRequest,

    /// Height to resize the source to before drawing
    ///
    /// Possible values: ["auto", <number>]. "auto" derives the height from
    /// --width and the source's aspect ratio, or keeps the source height.
    #[arg(long = "height", default_value = "auto")]
    pub height: SizeRequest,

    /// The x coordinate to start drawing at
    #[arg(short = 'x', long = "x", conflicts_with = "cx")]
    pub x: Option<u32>,

    /// The y coordinate to start drawing at
    #[arg(short = 'y', long = "y", conflicts_with = "cy")]
    pub y: Option<u32>,

    /// The x coordinate to center the drawing on (instead of -x)
    #[arg(long = "cx")]
    pub cx: Option<u32>,

    /// The y coordinate to center the drawing on (instead of -y)
    #[arg(long = "cy")]
    pub cy: Option<u32>,

    /// Read the start coordinates from a file
    ///
    /// The first line must be "X,Y" or "X,Y,TYPE" where TYPE is D (top-left
    /// anchor, the default) or C (center anchor).
    #[arg(long = "coords", conflicts_with_all = ["x", "y", "cx", "cy"])]
    pub coords: Option<PathBuf>,

    /// The delay between each pixel in seconds
    ///
    /// The default delay is 1 second. Ignored when --workers is given.
    #[arg(short = 'd', long = "delay")]
    pub delay: Option<f64>,

    /// The base IPv6 address to draw to
    ///
    /// Pixels are painted at {BASEIP}XXXX:YYYY:RRGG:BBAA.
    #[arg(short = 'b', long = "baseip", default_value = DEFAULT_BASE_ADDRESS)]
    pub baseip: BaseAddress,

    /// Crop the drawing to the canvas when it sticks out over an edge
    #[arg(long = "overflow", conflicts_with = "push")]
    pub overflow: bool,

    /// Shift the drawing back onto the canvas when it sticks out over an edge
    #[arg(long = "push")]
    pub push: bool,

    /// Draw the pixels back-to-front
    #[arg(long = "reverse")]
    pub reverse: bool,

    /// Do not draw fully transparent pixels
    #[arg(long = "skip-transparent")]
    pub skip_transparent: bool,

    /// Paint through a pool of concurrent workers instead of one by one
    ///
    /// The pool size defaults to 3 when the flag is given without a value.
    #[arg(long = "workers", num_args = 0..=1, default_missing_value = "3")]
    pub workers: Option<usize>,

    /// Only print the addresses that would be pinged instead of pinging them
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Increase program verbosity
    ///
    /// The default verbosity level is INFO.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, default_value = "0")]
    pub verbose: u8,

    /// Decrease program verbosity
    ///
    /// The default verbosity level is INFO.
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, default_value = "0")]
    pub quiet: u8,
}

/// Determine the requested origin from the cli flags or the coordinate file
pub(crate) fn resolve_origin(opts: &CliOpts) -> anyhow::Result<(AxisOrigin, AxisOrigin)> {
    if let Some(path) = &opts.coords {
        return load_coordinate_file(path);
    }
    let x = match (opts.x, opts.cx) {
        (None, Some(center)) => AxisOrigin::Center(center as i64),
        (x, None) => AxisOrigin::TopLeft(x.unwrap_or(0) as i64),
        (Some(_), Some(_)) => unreachable!("clap rejects -x together with --cx"),
    };
    let y = match (opts.y, opts.cy) {
        (None, Some(center)) => AxisOrigin::Center(center as i64),
        (y, None) => AxisOrigin::TopLeft(y.unwrap_or(0) as i64),
        (Some(_), Some(_)) => unreachable!("clap rejects -y together with --cy"),
    };
    Ok((x, y))
}

/// Read the start coordinates from the first line of the given file
pub(crate) fn load_coordinate_file(path: &Path) -> anyhow::Result<(AxisOrigin, AxisOrigin)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read coordinate file {}", path.display()))?;
    let line = content
        .lines()
        .next()
        .ok_or_else(|| anyhow!("coordinate file {} is empty", path.display()))?;
    parse_coordinate_line(line).with_context(|| format!("invalid coordinate file {}", path.display()))
}

/// Parse one "X,Y" or "X,Y,TYPE" coordinate line
pub(crate) fn parse_coordinate_line(line: &str) -> anyhow::Result<(AxisOrigin, AxisOrigin)> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    let (x, y, anchor) = match fields.as_slice() {
        [x, y] => (*x, *y, "D"),
        [x, y, anchor] => (*x, *y, *anchor),
        _ => bail!("expected X,Y or X,Y,TYPE but got {:?}", line.trim()),
    };
    let x = parse_coordinate(x)?;
    let y = parse_coordinate(y)?;
    match anchor {
        "D" | "d" => Ok((AxisOrigin::TopLeft(x), AxisOrigin::TopLeft(y))),
        "C" | "c" => Ok((AxisOrigin::Center(x), AxisOrigin::Center(y))),
        other => bail!("unknown anchor type {:?}, expected D or C", other),
    }
}

fn parse_coordinate(s: &str) -> anyhow::Result<i64> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        bail!("coordinate {:?} must consist of digits only", s);
    }
    let value: u32 = s
        .parse()
        .with_context(|| format!("coordinate {:?} is too large", s))?;
    Ok(value as i64)
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn test_cli_definition_is_consistent() {
        CliOpts::command().debug_assert();
    }

    #[test]
    fn test_parse_top_left_coordinate_line() {
        let (x, y) = parse_coordinate_line("17,42").unwrap();
        assert_eq!(x, AxisOrigin::TopLeft(17));
        assert_eq!(y, AxisOrigin::TopLeft(42));
    }

    #[test]
    fn test_parse_anchored_coordinate_lines() {
        let (x, y) = parse_coordinate_line("1,2,C").unwrap();
        assert_eq!((x, y), (AxisOrigin::Center(1), AxisOrigin::Center(2)));
        let (x, y) = parse_coordinate_line("1,2,d").unwrap();
        assert_eq!((x, y), (AxisOrigin::TopLeft(1), AxisOrigin::TopLeft(2)));
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert!(parse_coordinate_line("17").is_err());
        assert!(parse_coordinate_line("17,42,X").is_err());
        assert!(parse_coordinate_line("17,42,C,extra").is_err());
        assert!(parse_coordinate_line("-1,42").is_err());
        assert!(parse_coordinate_line("a,b").is_err());
        assert!(parse_coordinate_line(",42").is_err());
    }

    #[test]
    fn test_coordinate_file_uses_only_the_first_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "100,200,C").unwrap();
        writeln!(file, "second line is ignored").unwrap();
        let (x, y) = load_coordinate_file(file.path()).unwrap();
        assert_eq!((x, y), (AxisOrigin::Center(100), AxisOrigin::Center(200)));
    }

    #[test]
    fn test_empty_coordinate_file_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(load_coordinate_file(file.path()).is_err());
    }

    #[test]
    fn test_conflicting_options_are_rejected() {
        assert!(CliOpts::try_parse_from(["pingxel", "img.png", "-x", "1", "--cx", "2"]).is_err());
        assert!(CliOpts::try_parse_from(["pingxel", "img.png", "--overflow", "--push"]).is_err());
        assert!(CliOpts::try_parse_from(["pingxel", "img.png", "--fill", "ff0000"]).is_err());
        assert!(CliOpts::try_parse_from(["pingxel"]).is_err());
    }

    #[test]
    fn test_fill_with_explicit_size_parses() {
        let opts =
            CliOpts::try_parse_from(["pingxel", "--fill", "ff0000", "--width", "10", "--height", "20"])
                .unwrap();
        assert_eq!(opts.fill, Some(Rgba(0xFF, 0, 0, 0xFF)));
        assert_eq!(opts.width, SizeRequest::Exact(10));
        assert_eq!(opts.height, SizeRequest::Exact(20));
    }

    #[test]
    fn test_workers_flag_defaults_to_three() {
        let opts = CliOpts::try_parse_from(["pingxel", "img.png", "--workers"]).unwrap();
        assert_eq!(opts.workers, Some(3));
        let opts = CliOpts::try_parse_from(["pingxel", "img.png", "--workers", "8"]).unwrap();
        assert_eq!(opts.workers, Some(8));
    }
}
