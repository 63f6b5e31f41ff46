#![forbid(unsafe_code)]

//! SVG path data to polygon conversion (headless).
//!
//! Design goals:
//! - one renderer-agnostic output type ([`Polygon`]): vertices, cubic markers, closed flag
//! - arcs and quadratics flattened into cubic Bezier segments
//! - deterministic, allocation-light parsing with byte offsets on every error

pub mod error;
pub mod geom;
pub mod path;
pub mod points;
pub mod polygon;
pub mod shapes;
pub mod tokenizer;
pub mod transform;

pub use error::{ParseError, PolygonError, Result, TokenizerError};
pub use path::PathParser;
pub use points::{parse_polygon, parse_polyline};
pub use polygon::{Polygon, Segment};
pub use transform::Transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Number of Bezier segments a full elliptical turn is split into.
    pub arc_segments_per_turn: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            arc_segments_per_turn: 12,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamped to [`path::arc::MIN_SEGMENTS_PER_TURN`]..=[`path::arc::MAX_SEGMENTS_PER_TURN`].
    pub fn with_arc_segments_per_turn(mut self, segments: u32) -> Self {
        self.arc_segments_per_turn = segments.clamp(
            path::arc::MIN_SEGMENTS_PER_TURN,
            path::arc::MAX_SEGMENTS_PER_TURN,
        );
        self
    }
}

/// Parses SVG path data (the `d` attribute) with default options.
pub fn parse_path(data: &str) -> Result<Polygon> {
    parse_path_with_options(data, ParseOptions::default())
}

pub fn parse_path_with_options(data: &str, options: ParseOptions) -> Result<Polygon> {
    PathParser::new(data, options).parse()
}
