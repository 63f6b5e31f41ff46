//! Renderer-agnostic polygon: the only value that leaves the parser.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, PolygonError};
use crate::geom::{Point, Rect};
use crate::transform::Transform;

/// Ordered vertices with cubic-Bezier markers and an open/closed flag.
///
/// A Bezier-start marker at index `i` means vertices `i`, `i + 1` and `i + 2` are the two
/// control points and the end point of one cubic segment starting at vertex `i - 1`.
/// Vertices that begin a further subpath are recorded together with whether the previous
/// subpath was explicitly closed.
///
/// An empty polygon is always open, whatever flag it was built with.
#[derive(Debug, Clone, Default)]
pub struct Polygon {
    vertices: Vec<Point>,
    bezier_starts: BTreeSet<usize>,
    /// Subpath start index -> previous subpath ended with a close.
    subpath_starts: BTreeMap<usize, bool>,
    closed: bool,
}

/// Drawing operation derived from a [`Polygon`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    Close,
}

impl Polygon {
    pub fn new(closed: bool) -> Self {
        Self {
            closed,
            ..Self::default()
        }
    }

    /// Builds a polygon of straight edges.
    pub fn from_points(points: impl IntoIterator<Item = Point>, closed: bool) -> Self {
        Self {
            vertices: points.into_iter().collect(),
            closed,
            ..Self::default()
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed && !self.vertices.is_empty()
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex(&self, index: usize) -> Option<Point> {
        self.vertices.get(index).copied()
    }

    pub fn first(&self) -> Option<Point> {
        self.vertices.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.vertices.last().copied()
    }

    /// All vertices in order, control points included.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn is_bezier_start(&self, index: usize) -> bool {
        self.bezier_starts.contains(&index)
    }

    pub fn bezier_starts(&self) -> impl Iterator<Item = usize> + '_ {
        self.bezier_starts.iter().copied()
    }

    /// Indices of vertices that begin a subpath other than the first one.
    pub fn subpath_starts(&self) -> impl Iterator<Item = usize> + '_ {
        self.subpath_starts.keys().copied()
    }

    pub fn has_curves(&self) -> bool {
        !self.bezier_starts.is_empty()
    }

    pub fn add(&mut self, p: Point) -> &mut Self {
        self.vertices.push(p);
        self
    }

    /// Appends a cubic segment from the last vertex.
    ///
    /// An empty polygon starts at the origin, which is where the path cursor begins.
    pub fn add_cubic(&mut self, c1: Point, c2: Point, p: Point) -> &mut Self {
        if self.vertices.is_empty() {
            self.vertices.push(Point::origin());
        }
        self.bezier_starts.insert(self.vertices.len());
        self.vertices.extend([c1, c2, p]);
        self
    }

    /// Appends a quadratic segment from the last vertex as its exact cubic equivalent.
    pub fn add_quadratic(&mut self, c: Point, p: Point) -> &mut Self {
        let p0 = self.last().unwrap_or_else(Point::origin);
        let c1 = p0 + (c - p0) * (2.0 / 3.0);
        let c2 = p + (c - p) * (2.0 / 3.0);
        self.add_cubic(c1, c2, p)
    }

    /// Starts a new subpath at `p`; `close_previous` closes the subpath that ends here.
    pub fn add_move_to(&mut self, p: Point, close_previous: bool) -> &mut Self {
        if !self.vertices.is_empty() {
            self.subpath_starts.insert(self.vertices.len(), close_previous);
        }
        self.vertices.push(p);
        self
    }

    /// Extends the outline with the edge `p1`-`p2` when one end touches it.
    ///
    /// The free end is prepended when the touching end is the first vertex and appended
    /// when it is the last one. Returns `false` and leaves the polygon unchanged when
    /// neither end touches. An empty polygon takes both points.
    pub fn add_line(&mut self, p1: Point, p2: Point) -> bool {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            self.vertices.extend([p1, p2]);
            return true;
        };
        for (touching, free) in [(p1, p2), (p2, p1)] {
            if touching == first {
                self.prepend(free);
                return true;
            }
            if touching == last {
                self.vertices.push(free);
                return true;
            }
        }
        false
    }

    fn prepend(&mut self, p: Point) {
        self.vertices.insert(0, p);
        self.bezier_starts = self.bezier_starts.iter().map(|i| i + 1).collect();
        self.subpath_starts = self
            .subpath_starts
            .iter()
            .map(|(&i, &close)| (i + 1, close))
            .collect();
    }

    /// Continues the outline with `other`, whose first vertex is the current last one.
    ///
    /// The shared vertex is kept once; on an empty polygon every vertex of `other` is
    /// taken. `other` must be a single straight-edged subpath.
    pub fn append(&mut self, other: &Polygon) -> Result<&mut Self, PolygonError> {
        if other.has_curves() {
            return Err(PolygonError::HasCurves { operation: "append" });
        }
        if !other.subpath_starts.is_empty() {
            return Err(PolygonError::HasSubpaths { operation: "append" });
        }
        let skip = usize::from(!self.vertices.is_empty());
        self.vertices.extend(other.vertices.iter().skip(skip).copied());
        Ok(self)
    }

    /// Returns the same outline traversed backwards, keeping the closed flag.
    pub fn reverse(&self) -> Result<Polygon, PolygonError> {
        if self.has_curves() {
            return Err(PolygonError::HasCurves { operation: "reverse" });
        }
        if !self.subpath_starts.is_empty() {
            return Err(PolygonError::HasSubpaths { operation: "reverse" });
        }
        Ok(Polygon::from_points(
            self.vertices.iter().rev().copied(),
            self.closed,
        ))
    }

    /// Returns a new polygon with every vertex mapped through `transform`.
    pub fn transform(&self, transform: &Transform) -> Polygon {
        if transform.is_identity() {
            return self.clone();
        }
        Polygon {
            vertices: self
                .vertices
                .iter()
                .map(|v| transform.transform_point(*v))
                .collect(),
            bezier_starts: self.bezier_starts.clone(),
            subpath_starts: self.subpath_starts.clone(),
            closed: self.closed,
        }
    }

    /// Conservative bounding box over all vertices, control points included.
    pub fn bounds(&self) -> Option<Rect> {
        if self.vertices.is_empty() {
            return None;
        }
        Some(Rect::from_points(self.vertices.iter()))
    }

    pub fn segments(&self) -> Segments<'_> {
        Segments {
            polygon: self,
            index: 0,
            close_emitted_for: None,
            close_at_end: self.is_closed(),
        }
    }
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
            && self.bezier_starts == other.bezier_starts
            && self.subpath_starts == other.subpath_starts
            && self.is_closed() == other.is_closed()
    }
}

pub struct Segments<'a> {
    polygon: &'a Polygon,
    index: usize,
    close_emitted_for: Option<usize>,
    close_at_end: bool,
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let p = self.polygon;
        let i = self.index;
        let Some(v) = p.vertex(i) else {
            if self.close_at_end {
                self.close_at_end = false;
                return Some(Segment::Close);
            }
            return None;
        };

        if i == 0 {
            self.index += 1;
            return Some(Segment::MoveTo(v));
        }
        if let Some(&close_previous) = p.subpath_starts.get(&i) {
            if close_previous && self.close_emitted_for != Some(i) {
                self.close_emitted_for = Some(i);
                return Some(Segment::Close);
            }
            self.index += 1;
            return Some(Segment::MoveTo(v));
        }
        if p.is_bezier_start(i) {
            if let (Some(c2), Some(end)) = (p.vertex(i + 1), p.vertex(i + 2)) {
                self.index += 3;
                return Some(Segment::CubicTo(v, c2, end));
            }
        }
        self.index += 1;
        Some(Segment::LineTo(v))
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for seg in self.segments() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            match seg {
                Segment::MoveTo(p) => write!(f, "M {},{}", p.x, p.y)?,
                Segment::LineTo(p) => write!(f, "L {},{}", p.x, p.y)?,
                Segment::CubicTo(c1, c2, p) => write!(
                    f,
                    "C {},{} {},{} {},{}",
                    c1.x, c1.y, c2.x, c2.y, p.x, p.y
                )?,
                Segment::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Polygon {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse_path(s)
    }
}
