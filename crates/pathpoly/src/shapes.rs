//! Polygons for the basic SVG shapes (`<rect>`, `<circle>`, `<ellipse>`).

use crate::geom::{Point, Size, Vector, point};
use crate::polygon::Polygon;

/// Distance of a cubic control point from the corner of a quarter circle of radius 1.
pub const KAPPA: f64 = 4.0 * (std::f64::consts::SQRT_2 - 1.0) / 3.0;

pub fn rect(origin: Point, size: Size) -> Polygon {
    let (x, y) = (origin.x, origin.y);
    Polygon::from_points(
        [
            point(x, y),
            point(x + size.width, y),
            point(x + size.width, y + size.height),
            point(x, y + size.height),
        ],
        true,
    )
}

/// Rectangle with quarter-ellipse corners.
///
/// A missing radius copies the other one; radii are limited to half the side they round.
/// Without a usable radius this is [`rect`].
pub fn rounded_rect(origin: Point, size: Size, rx: Option<f64>, ry: Option<f64>) -> Polygon {
    let (rx, ry) = match (rx, ry) {
        (Some(rx), Some(ry)) => (rx, ry),
        (Some(r), None) | (None, Some(r)) => (r, r),
        (None, None) => (0.0, 0.0),
    };
    let rx = rx.abs().min(size.width / 2.0);
    let ry = ry.abs().min(size.height / 2.0);
    if rx * ry == 0.0 {
        return rect(origin, size);
    }

    let (x, y) = (origin.x, origin.y);
    let (width, height) = (size.width, size.height);
    let w = width - 2.0 * rx;
    let h = height - 2.0 * ry;
    let cx = KAPPA * rx;
    let cy = KAPPA * ry;

    let mut polygon = Polygon::new(true);
    polygon
        .add(point(x + rx + w, y))
        .add_cubic(
            point(x + rx + w + cx, y),
            point(x + width, y + ry - cy),
            point(x + width, y + ry),
        )
        .add(point(x + width, y + ry + h))
        .add_cubic(
            point(x + width, y + ry + h + cy),
            point(x + rx + w + cx, y + height),
            point(x + rx + w, y + height),
        )
        .add(point(x + rx, y + height))
        .add_cubic(
            point(x + rx - cx, y + height),
            point(x, y + ry + h + cy),
            point(x, y + ry + h),
        )
        .add(point(x, y + ry))
        .add_cubic(point(x, y + ry - cy), point(x + rx - cx, y), point(x + rx, y));
    polygon
}

/// Ellipse as four cubic quarter arcs, starting at the leftmost point.
pub fn ellipse(center: Point, radii: Vector) -> Polygon {
    let (x, y) = (center.x, center.y);
    let (rx, ry) = (radii.x.abs(), radii.y.abs());
    let cx = KAPPA * rx;
    let cy = KAPPA * ry;

    let mut polygon = Polygon::new(true);
    polygon
        .add(point(x - rx, y))
        .add_cubic(point(x - rx, y + cy), point(x - cx, y + ry), point(x, y + ry))
        .add_cubic(point(x + cx, y + ry), point(x + rx, y + cy), point(x + rx, y))
        .add_cubic(point(x + rx, y - cy), point(x + cx, y - ry), point(x, y - ry))
        .add_cubic(point(x - cx, y - ry), point(x - rx, y - cy), point(x - rx, y));
    polygon
}
