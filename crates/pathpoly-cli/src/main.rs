use pathpoly::geom::Rect;
use pathpoly::path::arc::{MAX_SEGMENTS_PER_TURN, MIN_SEGMENTS_PER_TURN};
use pathpoly::{ParseOptions, Polygon, Transform};
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Parse {
        line: usize,
        err: pathpoly::ParseError,
    },
    Transform(pathpoly::ParseError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Parse { line, err } => write!(f, "line {line}: {err}"),
            CliError::Transform(err) => write!(f, "--transform: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Path,
    Polygon,
    Polyline,
    Bounds,
}

#[derive(Debug, Clone, Copy, Default)]
enum OutputFormat {
    #[default]
    Json,
    Path,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "path" | "d" => Ok(Self::Path),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    format: OutputFormat,
    transform: Option<String>,
    options: ParseOptions,
    skip_invalid: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BoundsOut {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl From<Rect> for BoundsOut {
    fn from(r: Rect) -> Self {
        Self {
            x: r.origin.x,
            y: r.origin.y,
            width: r.size.width,
            height: r.size.height,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PolygonOut {
    vertices: Vec<[f64; 2]>,
    bezier_starts: Vec<usize>,
    subpath_starts: Vec<usize>,
    closed: bool,
    bounds: Option<BoundsOut>,
}

impl From<&Polygon> for PolygonOut {
    fn from(p: &Polygon) -> Self {
        Self {
            vertices: p.vertices().iter().map(|v| [v.x, v.y]).collect(),
            bezier_starts: p.bezier_starts().collect(),
            subpath_starts: p.subpath_starts().collect(),
            closed: p.is_closed(),
            bounds: p.bounds().map(BoundsOut::from),
        }
    }
}

fn usage() -> &'static str {
    "pathpoly-cli\n\
\n\
USAGE:\n\
  pathpoly-cli [path] [--pretty] [--format json|path] [--transform <list>] [--arc-segments <n>] [--skip-invalid] [<file>|-]\n\
  pathpoly-cli polygon [--pretty] [--format json|path] [--transform <list>] [--skip-invalid] [<file>|-]\n\
  pathpoly-cli polyline [--pretty] [--format json|path] [--transform <list>] [--skip-invalid] [<file>|-]\n\
  pathpoly-cli bounds [--pretty] [--transform <list>] [--arc-segments <n>] [--skip-invalid] [<file>|-]\n\
\n\
NOTES:\n\
  - If <file> is omitted or '-', input is read from stdin.\n\
  - Every non-empty input line is one path (`d` attribute) or one point list.\n\
  - --transform takes an SVG transform list, e.g. \"rotate(45, 100, 100) translate(10,10)\".\n\
  - json prints an array with one polygon object per line; path prints one path per line.\n\
  - --arc-segments is the number of curve segments per full turn (4..=360, default 12).\n\
  - bounds prints the bounding box of all polygons as JSON (null when there are none).\n\
  - Log verbosity is controlled with RUST_LOG (default: warn).\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "path" => args.command = Command::Path,
            "polygon" => args.command = Command::Polygon,
            "polyline" => args.command = Command::Polyline,
            "bounds" => args.command = Command::Bounds,
            "--pretty" => args.pretty = true,
            "--skip-invalid" => args.skip_invalid = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--transform" => {
                let Some(list) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.transform = Some(list.clone());
            }
            "--arc-segments" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let n = n.parse::<u32>().map_err(|_| CliError::Usage(usage()))?;
                if !(MIN_SEGMENTS_PER_TURN..=MAX_SEGMENTS_PER_TURN).contains(&n) {
                    return Err(CliError::Usage(usage()));
                }
                args.options = args.options.with_arc_segments_per_turn(n);
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn parse_line(command: Command, line: &str, options: ParseOptions) -> pathpoly::Result<Polygon> {
    match command {
        Command::Path | Command::Bounds => pathpoly::parse_path_with_options(line, options),
        Command::Polygon => pathpoly::parse_polygon(line),
        Command::Polyline => pathpoly::parse_polyline(line),
    }
}

fn parse_input(args: &Args, text: &str, transform: &Transform) -> Result<Vec<Polygon>, CliError> {
    let mut polygons = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(args.command, line, args.options) {
            Ok(p) => polygons.push(p.transform(transform)),
            Err(err) if args.skip_invalid => {
                tracing::warn!(line = line_no, offset = err.offset(), %err, "skipping invalid input");
            }
            Err(err) => return Err(CliError::Parse { line: line_no, err }),
        }
    }
    tracing::debug!(count = polygons.len(), "parsed input");
    Ok(polygons)
}

fn union_bounds(polygons: &[Polygon]) -> Option<Rect> {
    polygons
        .iter()
        .filter_map(Polygon::bounds)
        .reduce(|a, b| a.union(&b))
}

fn run(args: Args) -> Result<(), CliError> {
    let transform = match args.transform.as_deref() {
        Some(list) => pathpoly::transform::parse(list).map_err(CliError::Transform)?,
        None => Transform::identity(),
    };
    let text = read_input(args.input.as_deref())?;
    let polygons = parse_input(&args, &text, &transform)?;

    if args.command == Command::Bounds {
        return write_json(&union_bounds(&polygons).map(BoundsOut::from), args.pretty);
    }

    match args.format {
        OutputFormat::Json => {
            let out: Vec<PolygonOut> = polygons.iter().map(PolygonOut::from).collect();
            write_json(&out, args.pretty)
        }
        OutputFormat::Path => {
            for p in &polygons {
                println!("{p}");
            }
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
