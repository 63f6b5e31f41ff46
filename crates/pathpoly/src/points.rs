//! Flat coordinate lists of the `<polygon>` and `<polyline>` `points` attribute.

use crate::error::Result;
use crate::geom::{Point, point};
use crate::polygon::Polygon;
use crate::tokenizer::Tokenizer;

/// Parses `x,y x,y ...` into a closed polygon without curves.
pub fn parse_polygon(text: &str) -> Result<Polygon> {
    Ok(Polygon::from_points(read_points(text)?, true))
}

/// Parses `x,y x,y ...` into an open polygon without curves.
pub fn parse_polyline(text: &str) -> Result<Polygon> {
    Ok(Polygon::from_points(read_points(text)?, false))
}

fn read_points(text: &str) -> Result<Vec<Point>> {
    let mut tokens = Tokenizer::new(text);
    let mut points = Vec::new();
    while !tokens.is_eof()? {
        let x = tokens.read_float()?;
        let y = tokens.read_float()?;
        points.push(point(x, y));
    }
    tracing::trace!(count = points.len(), "parsed point list");
    Ok(points)
}
