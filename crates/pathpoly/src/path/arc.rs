//! Elliptical arc approximation.
//!
//! The ellipse is mapped onto a circle (un-rotate, then squash one axis), the circle center
//! is solved in closed form, and the swept angle is cut into equal steps. Every step becomes
//! one quadratic Bezier whose control point lies on the bisecting ray at `r / cos(step / 2)`,
//! so the curve touches the circle at both of its ends. The results are mapped back through
//! the inverse transform.

use std::f64::consts::{PI, TAU};

use crate::geom::{Point, Vector, vector};
use crate::transform::Transform;

/// Whether an arc's sweep should be greater than 180 degrees, or smaller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LargeArc(pub bool);

/// Angular direction in which an arc is drawn.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Sweep {
    Negative,
    Positive,
}

impl From<bool> for Sweep {
    fn from(flag: bool) -> Self {
        if flag { Sweep::Positive } else { Sweep::Negative }
    }
}

/// Endpoint parameterization of an elliptical arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticalArc {
    pub from: Point,
    /// Radii along the ellipse's own axes; the sign is ignored.
    pub radii: Vector,
    /// Rotation of the ellipse's x axis, in degrees.
    pub x_axis_rotation: f64,
    pub large_arc: LargeArc,
    pub sweep: Sweep,
    pub to: Point,
}

/// One quadratic Bezier piece of an approximated arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadSegment {
    pub control: Point,
    pub to: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Approximation {
    /// Zero radius or an unsolvable circle: draw a straight line to the endpoint.
    LineTo(Point),
    /// Start and end coincide: the arc draws nothing.
    Omit,
    Curves(Vec<QuadSegment>),
}

/// `sqrt(value)`, treating small negative values (rounding noise) as zero.
///
/// Returns `None` when `value` is negative beyond `tolerance`.
pub fn clamped_sqrt(value: f64, tolerance: f64) -> Option<f64> {
    if value >= 0.0 {
        Some(value.sqrt())
    } else if value >= -tolerance {
        Some(0.0)
    } else {
        None
    }
}

/// Signed angle swept from `a` to `b` around the origin in the requested direction.
fn swept_angle(a: Vector, b: Vector, sweep: Sweep) -> f64 {
    let mut delta = b.y.atan2(b.x) - a.y.atan2(a.x);
    match sweep {
        Sweep::Positive if delta < 0.0 => delta += TAU,
        Sweep::Negative if delta > 0.0 => delta -= TAU,
        _ => {}
    }
    delta
}

pub const MIN_SEGMENTS_PER_TURN: u32 = 4;
/// Upper bound on the resolution; keeps the output of one arc command small.
pub const MAX_SEGMENTS_PER_TURN: u32 = 360;

/// Approximates `arc`, using `segments_per_turn` equal steps for a full circle.
pub fn approximate(arc: &EllipticalArc, segments_per_turn: u32) -> Approximation {
    let rx = arc.radii.x.abs();
    let ry = arc.radii.y.abs();
    if rx == 0.0 || ry == 0.0 {
        tracing::debug!(rx, ry, "arc with zero radius drawn as a line");
        return Approximation::LineTo(arc.to);
    }
    if arc.from == arc.to {
        tracing::debug!(from = ?arc.from, "arc with identical endpoints omitted");
        return Approximation::Omit;
    }

    let to_circle = Transform::rotate(-arc.x_axis_rotation).then(&Transform::scale(1.0, rx / ry));
    let Some(from_circle) = to_circle.inverse() else {
        return Approximation::LineTo(arc.to);
    };

    let p1 = to_circle.transform_point(arc.from);
    let p2 = to_circle.transform_point(arc.to);
    let chord = p2 - p1;
    let chord_len = chord.length();
    if !chord_len.is_finite() || chord_len == 0.0 {
        return Approximation::LineTo(arc.to);
    }

    let half = chord_len / 2.0;
    let r = rx.max(half);

    let tolerance = r * r * 1e-9;
    let Some(h) = clamped_sqrt(r * r - half * half, tolerance) else {
        tracing::debug!(r, half, "arc center has no real solution, drawn as a line");
        return Approximation::LineTo(arc.to);
    };

    let mid = p1 + chord / 2.0;
    let normal = vector(-chord.y, chord.x) / chord_len;
    let candidates = [mid + normal * h, mid - normal * h];

    let spans = candidates.map(|c| swept_angle(p1 - c, p2 - c, arc.sweep));
    let chosen = (0..2)
        .find(|&i| (spans[i].abs() > PI) == arc.large_arc.0)
        .unwrap_or(0);
    let center = candidates[chosen];
    let span = spans[chosen];

    // Fewer than four steps per turn would put control points at or beyond infinity.
    let segments_per_turn = segments_per_turn.clamp(MIN_SEGMENTS_PER_TURN, MAX_SEGMENTS_PER_TURN);
    let step_limit = TAU / f64::from(segments_per_turn);
    // The small bias keeps an exact half circle at 6 steps despite atan2 rounding.
    let steps = ((span.abs() / step_limit) - 1e-9).ceil().max(1.0) as usize;
    let step = span / steps as f64;
    let control_radius = r / (step / 2.0).cos();

    let start = (p1 - center).angle_from_x_axis().radians;
    let mut curves = Vec::with_capacity(steps);
    for i in 0..steps {
        let a0 = start + step * i as f64;
        let mid_angle = a0 + step / 2.0;
        let end_angle = a0 + step;

        let control = center + vector(mid_angle.cos(), mid_angle.sin()) * control_radius;
        let to = if i + 1 == steps {
            arc.to
        } else {
            from_circle.transform_point(center + vector(end_angle.cos(), end_angle.sin()) * r)
        };
        curves.push(QuadSegment {
            control: from_circle.transform_point(control),
            to,
        });
    }

    tracing::trace!(steps, span, r, "arc approximated");
    Approximation::Curves(curves)
}
