//! Two-dimensional parsing: rows of a repeated element.
//!
//! [`Parser::grid`] is a compound combinator for fixed-width character
//! grids: the element parser runs until it fails (ending a row), a separator
//! introduces the next row, and every row must come out the same width. The
//! result is a minimal row-major [`Grid`] container; numeric matrix types
//! are deliberately out of scope.

use crate::parser::{Parse, Parser};
use crate::span::{PartialParsed, Span};

/// A rectangular, row-major collection of parsed elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Vec<T>,
    width: usize,
}

impl<T> Grid<T> {
    fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * rows.len());
        for row in rows {
            debug_assert_eq!(row.len(), width);
            cells.extend(row);
        }
        Grid { cells, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.cells.len() / self.width
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The element at `(row, col)`, if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if col >= self.width {
            return None;
        }
        self.cells.get(row * self.width + col)
    }

    /// One row as a slice. Panics when `row` is out of bounds.
    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width.max(1))
    }

    /// All elements in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }
}

struct GridNode<T: 'static, S: 'static> {
    element: Parser<T>,
    separator: Parser<S>,
}

/// Runs the element parser until it fails or stalls, collecting one row.
fn parse_row<'a, T: 'static>(element: &Parser<T>, mut input: Span<'a>) -> (Vec<T>, Span<'a>) {
    let mut row = Vec::new();
    while let Some(parsed) = element.parse_partial(input) {
        let stalled = parsed.remaining.len() == input.len();
        input = parsed.remaining;
        row.push(parsed.value);
        if stalled {
            break;
        }
    }
    (row, input)
}

impl<T: 'static, S: 'static> Parse for GridNode<T, S> {
    type Output = Grid<T>;

    fn parse_partial<'a>(&self, input: Span<'a>) -> Option<PartialParsed<'a, Grid<T>>> {
        let (first, mut rest) = parse_row(&self.element, input);
        if first.is_empty() {
            return Some(PartialParsed::new(Grid::from_rows(Vec::new()), input));
        }
        let width = first.len();
        let mut rows = vec![first];
        while let Some(separator) = self.separator.parse_partial(rest) {
            let (row, after) = parse_row(&self.element, separator.remaining);
            if row.is_empty() {
                // Leave the separator unconsumed; it belongs to whatever
                // follows the grid.
                break;
            }
            if row.len() != width {
                return None;
            }
            let stalled = after.len() == rest.len();
            rows.push(row);
            rest = after;
            if stalled {
                break;
            }
        }
        Some(PartialParsed::new(Grid::from_rows(rows), rest))
    }
}

impl<T: 'static> Parser<T> {
    /// Parses a rectangular grid of this element, rows separated by
    /// `separator`. Fails when any row differs in width from the first.
    pub fn grid<S: 'static>(&self, separator: &Parser<S>) -> Parser<Grid<T>> {
        Parser::from_node(GridNode {
            element: self.clone(),
            separator: separator.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::terminal::{letter, newline, single_digit};

    #[test]
    fn parses_a_rectangular_digit_grid() {
        let grid = single_digit().grid(&newline()).parse("12\n34");
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.row(0), &[1, 2]);
        assert_eq!(grid.row(1), &[3, 4]);
    }

    #[test]
    fn rejects_an_uneven_row() {
        let parser = single_digit().grid(&newline());
        assert!(parser.try_parse("12\n34\n5").is_err());
    }

    #[test]
    fn leaves_a_trailing_separator_unconsumed() {
        let parser = single_digit().grid(&newline());
        let parsed = parser.parse_partial(Span::new("12\n34\nrest")).unwrap();
        assert_eq!(parsed.value.height(), 2);
        assert_eq!(parsed.remaining.as_str(), "\nrest");
    }

    #[test]
    fn empty_input_yields_an_empty_grid() {
        let parsed = single_digit()
            .grid(&newline())
            .parse_partial(Span::new(""))
            .unwrap();
        assert!(parsed.value.is_empty());
        assert_eq!(parsed.value.height(), 0);
    }

    #[test]
    fn character_grids_parse_too() {
        let grid = letter().grid(&newline()).parse("ab\ncd\nef");
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(2, 1), Some(&'f'));
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn iterates_in_row_major_order() {
        let grid = single_digit().grid(&newline()).parse("12\n34");
        let values: Vec<u32> = grid.iter().copied().collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }
}
