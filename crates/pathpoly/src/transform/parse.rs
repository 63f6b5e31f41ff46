use super::Transform;
use crate::error::{ParseError, Result};
use crate::geom::point;
use crate::tokenizer::Tokenizer;

/// Parses an SVG `transform` attribute such as `rotate(45, 100, 100) translate(10,10)`.
///
/// The functions compose like nested groups: the rightmost one is applied first.
pub fn parse(text: &str) -> Result<Transform> {
    let mut tokens = Tokenizer::new(text);
    let mut total = Transform::identity();

    while !tokens.is_eof()? {
        let offset = tokens.offset();
        let name = tokens.read_command()?;
        tokens.expect('(')?;
        let t = match name.as_str() {
            "matrix" => {
                let mut m = [0.0; 6];
                for v in &mut m {
                    *v = tokens.read_float()?;
                }
                Transform::matrix(m[0], m[1], m[2], m[3], m[4], m[5])
            }
            "translate" => {
                let x = tokens.read_float()?;
                let y = optional_float(&mut tokens)?.unwrap_or(0.0);
                Transform::translate(x, y)
            }
            "scale" => {
                let x = tokens.read_float()?;
                let y = optional_float(&mut tokens)?.unwrap_or(x);
                Transform::scale(x, y)
            }
            "rotate" => {
                let angle = tokens.read_float()?;
                match optional_float(&mut tokens)? {
                    Some(cx) => {
                        let cy = tokens.read_float()?;
                        Transform::rotate_around(angle, point(cx, cy))
                    }
                    None => Transform::rotate(angle),
                }
            }
            "skewX" => Transform::skew_x(tokens.read_float()?),
            "skewY" => Transform::skew_y(tokens.read_float()?),
            _ => return Err(ParseError::UnknownTransform { name, offset }),
        };
        tokens.expect(')')?;
        total = t.then(&total);
    }

    tracing::trace!(?total, "parsed transform list");
    Ok(total)
}

fn optional_float(tokens: &mut Tokenizer<'_>) -> Result<Option<f64>> {
    if tokens.next_is_number()? {
        return Ok(Some(tokens.read_float()?));
    }
    Ok(None)
}
