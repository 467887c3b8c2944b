//! Console move input.

use std::io::{self, BufRead, Write};
use strictly_grid::{Board, GridError, GridErrorKind, Point};
use tracing::{debug, instrument, warn};

/// Answer that accepts the suggested move.
pub const ACCEPT_DEFAULT: &str = "-ret";

/// Parses `x:y` against the board's axes.
///
/// # Errors
///
/// Returns `MalformedPoint` when the separator is missing, or the axis
/// error when a label does not belong to its axis. Both are out-of-range
/// class, so callers re-prompt.
pub fn parse_point(board: &Board, text: &str) -> Result<Point, GridError> {
    let Some((x, y)) = text.trim().split_once(':') else {
        return Err(GridError::new(GridErrorKind::MalformedPoint(text.trim().to_string())));
    };
    let point = Point {
        x: board.axis_x().parse_label(x.trim())?,
        y: board.axis_y().parse_label(y.trim())?,
    };
    board.validate(&point)?;
    Ok(point)
}

/// Asks for a move until a valid free point is given.
///
/// An empty answer or `-ret` takes `default`. Returns `None` at end of
/// input.
#[instrument(skip_all)]
pub fn prompt_point<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    board: &Board,
    default: Option<&Point>,
) -> io::Result<Option<Point>> {
    loop {
        match default {
            Some(point) => write!(output, "Next move [{}]: ", point)?,
            None => write!(output, "Next move: ")?,
        }
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            debug!("Input closed");
            return Ok(None);
        }
        let answer = line.trim();
        if answer.is_empty() || answer == ACCEPT_DEFAULT {
            if let Some(point) = default {
                return Ok(Some(point.clone()));
            }
            writeln!(output, "No suggestion available, enter x:y")?;
            continue;
        }

        match parse_point(board, answer).and_then(|point| Ok((board.get(&point)?.cloned(), point))) {
            Ok((None, point)) => return Ok(Some(point)),
            Ok((Some(item), point)) => {
                warn!(point = %point, "Cell already taken");
                writeln!(output, "{} is taken by {}", point, item.kind().token())?;
            }
            Err(err) => {
                warn!(answer, error = %err.kind, "Rejected move input");
                writeln!(output, "{}", err.kind)?;
            }
        }
    }
}
