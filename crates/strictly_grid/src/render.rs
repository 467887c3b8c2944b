//! Console and HTML views of a board.

use crate::board::Board;
use crate::item::Occupant;
use std::fmt::Write;
use tracing::instrument;

/// Produces a textual view of a board without mutating it.
pub trait Renderer {
    /// Renders the whole board.
    fn render(&self, board: &Board) -> String;
}

/// Plain text grid: a header row of x labels, then one line per y label.
#[derive(Debug, Clone)]
pub struct ConsoleRenderer {
    corner: String,
    placeholder: String,
}

impl ConsoleRenderer {
    /// Renderer with custom corner and empty-cell tokens.
    pub fn new(corner: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            corner: corner.into(),
            placeholder: placeholder.into(),
        }
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new(" ", "#")
    }
}

impl Renderer for ConsoleRenderer {
    #[instrument(skip_all, fields(board = %board.id()))]
    fn render(&self, board: &Board) -> String {
        let mut out = self.corner.clone();
        for x in board.axis_x().labels() {
            out.push_str(&x.to_string());
        }
        out.push('\n');
        for (oy, y) in board.axis_y().labels().enumerate() {
            out.push_str(&y.to_string());
            for ox in 0..board.axis_x().size() {
                match board.get_at(ox, oy) {
                    Some(item) => out.push_str(item.token()),
                    None => out.push_str(&self.placeholder),
                }
            }
            out.push('\n');
        }
        out
    }
}

/// HTML table with `data-x`/`data-y` attributes on every cell.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    border: u32,
}

impl HtmlRenderer {
    /// Renderer with a custom table border width.
    pub fn with_border(border: u32) -> Self {
        Self { border }
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::with_border(1)
    }
}

const NBSP: &str = "&nbsp;";

impl Renderer for HtmlRenderer {
    #[instrument(skip_all, fields(board = %board.id()))]
    fn render(&self, board: &Board) -> String {
        let mut out = String::new();
        let _ = write!(out, "<table border=\"{}\">", self.border);
        out.push_str("<tr><th>");
        out.push_str(NBSP);
        out.push_str("</th>");
        for x in board.axis_x().labels() {
            let _ = write!(out, "<th>{}</th>", escape(&x.to_string()));
        }
        out.push_str("</tr>");
        let xs: Vec<String> = board.axis_x().labels().map(|x| escape(&x.to_string())).collect();
        for (oy, y) in board.axis_y().labels().enumerate() {
            let y = escape(&y.to_string());
            let _ = write!(out, "<tr><th>{y}</th>");
            for (ox, x) in xs.iter().enumerate() {
                let content = board
                    .get_at(ox, oy)
                    .map_or_else(|| NBSP.to_string(), |item| escape(item.token()));
                let _ = write!(out, "<td data-x=\"{x}\" data-y=\"{y}\">{content}</td>");
            }
            out.push_str("</tr>");
        }
        out.push_str("</table>");
        out
    }
}

/// Escapes the five HTML-significant characters.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;
    use crate::item::ItemKind;
    use crate::types::{Mark, Point};

    fn board() -> Board {
        Board::new(Axis::letters(5).unwrap(), Axis::one_based(3).unwrap())
    }

    #[test]
    fn test_console_marker() {
        let mut board = board();
        board.set(Point::new("c", 2), ItemKind::marker()).unwrap();
        assert_eq!(
            ConsoleRenderer::default().render(&board),
            " abcde\n1#####\n2##?##\n3#####\n"
        );
    }

    #[test]
    fn test_console_pieces() {
        let mut board = Board::new(Axis::int(2).unwrap(), Axis::int(1).unwrap());
        board.place(Point::new(1, 0), ItemKind::piece(Mark::O)).unwrap();
        assert_eq!(ConsoleRenderer::default().render(&board), " 01\n0#O\n");
    }

    #[test]
    fn test_html_cells() {
        let mut board = Board::new(Axis::letters(2).unwrap(), Axis::one_based(1).unwrap());
        board.place(Point::new("b", 1), ItemKind::piece(Mark::X)).unwrap();
        let html = HtmlRenderer::default().render(&board);
        assert_eq!(
            html,
            "<table border=\"1\"><tr><th>&nbsp;</th><th>a</th><th>b</th></tr>\
             <tr><th>1</th><td data-x=\"a\" data-y=\"1\">&nbsp;</td>\
             <td data-x=\"b\" data-y=\"1\">X</td></tr></table>"
        );
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a & 'b'>"), "&lt;a &amp; &#x27;b&#x27;&gt;");
    }
}
