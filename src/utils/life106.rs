//! Life 1.06 text format: a `#Life 1.06` header followed by one `x y` pair
//! of live cell coordinates per line.

use crate::{Cell, CellSet, ParseError};
use std::io::{self, BufRead, Write};
use std::path::Path;

pub const HEADER: &str = "#Life 1.06";

/// Line-by-line parser state.
#[derive(Default)]
struct Parser {
    cells: CellSet,
    header_found: bool,
    line_no: usize,
}

impl Parser {
    fn feed(&mut self, line: &str) -> Result<(), ParseError> {
        self.line_no += 1;
        let line = line.trim_end_matches([' ', '\t', '\r', '\n']);
        if line.is_empty() {
            return Ok(());
        }
        if !self.header_found {
            if line != HEADER {
                return Err(ParseError::InvalidHeader { line: line.to_string() });
            }
            self.header_found = true;
            return Ok(());
        }

        let malformed = || ParseError::MalformedLine {
            line_no: self.line_no,
            line: line.to_string(),
        };
        let (x, rest) = leading_i64(skip_blanks(line)).ok_or_else(malformed)?;
        let after_x = skip_blanks(rest);
        if after_x.len() == rest.len() {
            return Err(malformed());
        }
        let (y, rest) = leading_i64(after_x).ok_or_else(malformed)?;
        if !skip_blanks(rest).is_empty() {
            return Err(ParseError::UnexpectedContent {
                line_no: self.line_no,
                line: line.to_string(),
            });
        }
        self.cells.insert(Cell::new(x, y));
        Ok(())
    }

    fn finish(self) -> Result<CellSet, ParseError> {
        if self.header_found {
            Ok(self.cells)
        } else {
            Err(ParseError::MissingHeader)
        }
    }
}

fn skip_blanks(s: &str) -> &str {
    s.trim_start_matches([' ', '\t'])
}

/// Parses an optional minus sign and decimal digits from the start of `s`.
/// `None` if there are no digits or the value does not fit in `i64`.
fn leading_i64(s: &str) -> Option<(i64, &str)> {
    let sign = usize::from(s.starts_with('-'));
    let digits = s[sign..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let (number, rest) = s.split_at(sign + digits);
    Some((number.parse().ok()?, rest))
}

/// Parses Life 1.06 text. Duplicate coordinates collapse into one cell.
pub fn parse_str(text: &str) -> Result<CellSet, ParseError> {
    let mut parser = Parser::default();
    for line in text.lines() {
        parser.feed(line)?;
    }
    parser.finish()
}

/// Same as [`parse_str`], reading line by line.
pub fn parse_reader(input: impl BufRead) -> crate::Result<CellSet> {
    let mut parser = Parser::default();
    for line in input.lines() {
        parser.feed(&line?)?;
    }
    Ok(parser.finish()?)
}

/// Writes the header and one `x y` line per cell, in (x, y) order if `sorted`.
pub fn write_cells(out: &mut impl Write, cells: &CellSet, sorted: bool) -> io::Result<()> {
    let mut out = io::BufWriter::new(out);
    writeln!(out, "{HEADER}")?;
    if sorted {
        let mut v: Vec<Cell> = cells.iter().copied().collect();
        v.sort_unstable();
        for c in v {
            writeln!(out, "{} {}", c.x, c.y)?;
        }
    } else {
        for c in cells {
            writeln!(out, "{} {}", c.x, c.y)?;
        }
    }
    out.flush()
}

/// Sorted text of `cells`.
pub fn format_cells(cells: &CellSet) -> String {
    let mut buf = Vec::with_capacity(HEADER.len() + 1 + cells.len() * 12);
    write_cells(&mut buf, cells, true).expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}

/// Whether the path ends in `.life` or `.lif`.
pub fn has_valid_life_extension(path: impl AsRef<Path>) -> bool {
    matches!(
        path.as_ref().extension().and_then(|e| e.to_str()),
        Some("life" | "lif")
    )
}
