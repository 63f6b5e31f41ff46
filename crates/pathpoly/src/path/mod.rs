//! Path-data (`d` attribute) state machine.
//!
//! The parser walks the token stream once, keeping the cursor, the start of the current
//! subpath and the control point needed to continue a smooth curve. Every command appends
//! to a single [`Polygon`]; quadratic segments (including arc pieces) are stored as their
//! exact cubic equivalents.

pub mod arc;

use crate::ParseOptions;
use crate::error::{ParseError, Result, TokenizerError};
use crate::geom::{Point, vector};
use crate::polygon::Polygon;
use crate::tokenizer::Tokenizer;

use self::arc::{Approximation, EllipticalArc, LargeArc, Sweep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCommand {
    Move,
    Line,
    Horizontal,
    Vertical,
    Cubic,
    SmoothCubic,
    Quadratic,
    SmoothQuadratic,
    Arc,
    Close,
}

impl PathCommand {
    /// Maps a command letter to its command and whether its coordinates are relative.
    pub fn from_letter(letter: char) -> Option<(PathCommand, bool)> {
        let command = match letter.to_ascii_uppercase() {
            'M' => PathCommand::Move,
            'L' => PathCommand::Line,
            'H' => PathCommand::Horizontal,
            'V' => PathCommand::Vertical,
            'C' => PathCommand::Cubic,
            'S' => PathCommand::SmoothCubic,
            'Q' => PathCommand::Quadratic,
            'T' => PathCommand::SmoothQuadratic,
            'A' => PathCommand::Arc,
            'Z' => PathCommand::Close,
            _ => return None,
        };
        Some((command, letter.is_ascii_lowercase()))
    }

    /// Command applied to a coordinate group that omits its letter.
    ///
    /// A move continues as a line; a close takes no arguments and cannot repeat.
    fn repeated(self) -> Option<PathCommand> {
        match self {
            PathCommand::Move => Some(PathCommand::Line),
            PathCommand::Close => None,
            other => Some(other),
        }
    }
}

/// Control point carried over to a following smooth curve command.
#[derive(Debug, Clone, Copy, PartialEq)]
enum CurveState {
    Quadratic(Point),
    Cubic(Point),
}

pub struct PathParser<'input> {
    tokens: Tokenizer<'input>,
    options: ParseOptions,
    cursor: Point,
    subpath_start: Point,
    curve: Option<CurveState>,
    pending_close: bool,
    last: Option<(PathCommand, bool)>,
    polygon: Polygon,
}

impl<'input> PathParser<'input> {
    pub fn new(input: &'input str, options: ParseOptions) -> Self {
        Self {
            tokens: Tokenizer::new(input),
            options,
            cursor: Point::origin(),
            subpath_start: Point::origin(),
            curve: None,
            pending_close: false,
            last: None,
            polygon: Polygon::new(false),
        }
    }

    /// Consumes the whole input and returns the polygon it describes.
    pub fn parse(mut self) -> Result<Polygon> {
        if let Err(err) = self.run() {
            tracing::debug!(offset = err.offset(), %err, "path data rejected");
            return Err(err);
        }
        if self.pending_close {
            self.polygon.set_closed(true);
        }
        Ok(self.polygon)
    }

    fn run(&mut self) -> Result<()> {
        while !self.tokens.is_eof()? {
            let offset = self.tokens.offset();
            let (command, relative) = if self.tokens.next_is_number()? {
                self.implicit_command(offset)?
            } else {
                self.explicit_command(offset)?
            };
            tracing::trace!(?command, relative, offset, "path command");
            self.last = Some((command, relative));
            self.apply(command, relative)?;
        }
        Ok(())
    }

    fn implicit_command(&mut self, offset: usize) -> Result<(PathCommand, bool)> {
        let repeated = self
            .last
            .and_then(|(last, relative)| Some((last.repeated()?, relative)));
        if let Some(command) = repeated {
            return Ok(command);
        }
        let found = self.tokens.peek()?.to_string();
        Err(TokenizerError::Expected {
            expected: "a command".to_string(),
            found,
            offset,
        }
        .into())
    }

    /// Reads a letter run. Close letters may be glued to the command that follows them.
    fn explicit_command(&mut self, offset: usize) -> Result<(PathCommand, bool)> {
        let run = self.tokens.read_command()?;
        let parsed: Option<Vec<_>> = run.chars().map(PathCommand::from_letter).collect();
        let Some((&(command, relative), closes)) = parsed.as_deref().and_then(<[_]>::split_last)
        else {
            return Err(ParseError::UnsupportedCommand {
                command: run,
                offset,
            });
        };
        if closes.iter().any(|(c, _)| *c != PathCommand::Close) {
            return Err(ParseError::UnsupportedCommand {
                command: run,
                offset,
            });
        }
        for _ in closes {
            self.close();
        }
        Ok((command, relative))
    }

    fn apply(&mut self, command: PathCommand, relative: bool) -> Result<()> {
        match command {
            PathCommand::Move => {
                let p = self.read_point(relative)?;
                self.polygon.add_move_to(p, self.pending_close);
                self.pending_close = false;
                self.subpath_start = p;
                self.cursor = p;
                self.curve = None;
            }
            PathCommand::Line => {
                let p = self.read_point(relative)?;
                self.line_to(p);
            }
            PathCommand::Horizontal => {
                let mut x = self.tokens.read_float()?;
                if relative {
                    x += self.cursor.x;
                }
                self.line_to(Point::new(x, self.cursor.y));
            }
            PathCommand::Vertical => {
                let mut y = self.tokens.read_float()?;
                if relative {
                    y += self.cursor.y;
                }
                self.line_to(Point::new(self.cursor.x, y));
            }
            PathCommand::Cubic => {
                let c1 = self.read_point(relative)?;
                let c2 = self.read_point(relative)?;
                let p = self.read_point(relative)?;
                self.cubic_to(c1, c2, p);
            }
            PathCommand::SmoothCubic => {
                let c1 = match self.curve {
                    Some(CurveState::Cubic(prev)) => self.reflect(prev),
                    _ => self.cursor,
                };
                let c2 = self.read_point(relative)?;
                let p = self.read_point(relative)?;
                self.cubic_to(c1, c2, p);
            }
            PathCommand::Quadratic => {
                let c = self.read_point(relative)?;
                let p = self.read_point(relative)?;
                self.quadratic_to(c, p);
            }
            PathCommand::SmoothQuadratic => {
                let c = match self.curve {
                    Some(CurveState::Quadratic(prev)) => self.reflect(prev),
                    _ => self.cursor,
                };
                let p = self.read_point(relative)?;
                self.quadratic_to(c, p);
            }
            PathCommand::Arc => {
                let rx = self.tokens.read_float()?;
                let ry = self.tokens.read_float()?;
                let x_axis_rotation = self.tokens.read_float()?;
                let large_arc = LargeArc(self.tokens.read_float()? != 0.0);
                let sweep = Sweep::from(self.tokens.read_float()? != 0.0);
                let to = self.read_point(relative)?;
                self.arc_to(EllipticalArc {
                    from: self.cursor,
                    radii: vector(rx, ry),
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    to,
                });
            }
            PathCommand::Close => self.close(),
        }
        Ok(())
    }

    fn read_point(&mut self, relative: bool) -> Result<Point> {
        let x = self.tokens.read_float()?;
        let y = self.tokens.read_float()?;
        if relative {
            Ok(self.cursor + vector(x, y))
        } else {
            Ok(Point::new(x, y))
        }
    }

    /// Mirrors `p` about the cursor.
    fn reflect(&self, p: Point) -> Point {
        self.cursor + (self.cursor - p)
    }

    /// Drawing after a close starts a new subpath where the closed one began.
    fn begin_segment(&mut self) {
        if self.pending_close {
            self.pending_close = false;
            self.polygon.add_move_to(self.subpath_start, true);
        }
    }

    fn line_to(&mut self, p: Point) {
        self.begin_segment();
        self.polygon.add(p);
        self.cursor = p;
        self.curve = None;
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.begin_segment();
        self.polygon.add_cubic(c1, c2, p);
        self.cursor = p;
        self.curve = Some(CurveState::Cubic(c2));
    }

    fn quadratic_to(&mut self, c: Point, p: Point) {
        self.begin_segment();
        self.polygon.add_quadratic(c, p);
        self.cursor = p;
        self.curve = Some(CurveState::Quadratic(c));
    }

    fn arc_to(&mut self, arc: EllipticalArc) {
        self.curve = None;
        match arc::approximate(&arc, self.options.arc_segments_per_turn) {
            Approximation::Omit => {}
            Approximation::LineTo(p) => self.line_to(p),
            Approximation::Curves(curves) => {
                self.begin_segment();
                for piece in curves {
                    self.polygon.add_quadratic(piece.control, piece.to);
                }
                self.cursor = arc.to;
            }
        }
    }

    fn close(&mut self) {
        self.pending_close = true;
        self.cursor = self.subpath_start;
        self.curve = None;
    }
}
