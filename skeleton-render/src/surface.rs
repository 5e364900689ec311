// SkeletonView: Cell surfaces
//
// Views render into a fixed-size grid of cells. A cell carries one symbol and
// a colour whose alpha is the cell's coverage; masks scale that alpha and the
// compositor blends it over the background.

use skeleton_utils::Rgba;
use unicode_width::UnicodeWidthChar;

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub symbol: char,
    pub color: Rgba,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        symbol: ' ',
        color: Rgba::CLEAR,
    };

    /// Trailing half of a double-width symbol; never printed on its own
    pub const CONTINUATION: char = '\0';

    pub fn new(symbol: char, color: Rgba) -> Self {
        Self { symbol, color }
    }

    pub fn is_blank(&self) -> bool {
        self.symbol == ' '
    }

    pub fn is_continuation(&self) -> bool {
        self.symbol == Self::CONTINUATION
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Surface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get_mut(y * self.width + x)
    }

    /// Write `text` starting at `(x, y)`, clipped to the surface.
    ///
    /// Double-width symbols take two cells, the second one marked as a
    /// continuation. Zero-width symbols are dropped. Returns the number of
    /// columns written.
    pub fn put_str(&mut self, x: usize, y: usize, text: &str, color: Rgba) -> usize {
        let mut col = x;
        for symbol in text.chars() {
            let width = symbol.width().unwrap_or(0);
            if width == 0 {
                continue;
            }
            if col + width > self.width {
                break;
            }
            if let Some(cell) = self.get_mut(col, y) {
                *cell = Cell::new(symbol, color);
            }
            for extra in 1..width {
                if let Some(cell) = self.get_mut(col + extra, y) {
                    *cell = Cell::new(Cell::CONTINUATION, color);
                }
            }
            col += width;
        }
        col - x
    }

    /// Copy `other` onto this surface with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, other: &Surface, x: usize, y: usize) {
        for (row, line) in other.rows().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                if let Some(target) = self.get_mut(x + col, y + row) {
                    *target = *cell;
                }
            }
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks(0) panics, and a zero-width surface has no cells anyway
        self.cells.chunks(self.width.max(1))
    }

    /// Visit every cell with its coordinates.
    pub fn for_each_cell_mut(&mut self, mut f: impl FnMut(usize, usize, &mut Cell)) {
        let width = self.width.max(1);
        for (index, cell) in self.cells.iter_mut().enumerate() {
            f(index % width, index / width, cell);
        }
    }

    /// Symbols only, one line per row
    pub fn to_plain_string(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .filter(|cell| !cell.is_continuation())
                    .map(|cell| cell.symbol)
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_str_clips() {
        let mut surface = Surface::new(4, 1);
        let written = surface.put_str(1, 0, "Hello", Rgba::WHITE);
        assert_eq!(written, 3);
        assert_eq!(surface.to_plain_string(), " Hel");
    }

    #[test]
    fn test_wide_symbols_take_two_cells() {
        let mut surface = Surface::new(5, 1);
        let written = surface.put_str(0, 0, "日本", Rgba::WHITE);
        assert_eq!(written, 4);
        assert!(surface.get(1, 0).unwrap().is_continuation());
        assert_eq!(surface.to_plain_string(), "日本 ");
    }

    #[test]
    fn test_blit_offsets() {
        let mut small = Surface::new(2, 1);
        small.put_str(0, 0, "ab", Rgba::WHITE);

        let mut big = Surface::new(4, 2);
        big.blit(&small, 1, 1);
        assert_eq!(big.to_plain_string(), "    \n ab ");
    }

    #[test]
    fn test_blit_clips_to_bounds() {
        let mut small = Surface::new(3, 1);
        small.put_str(0, 0, "xyz", Rgba::WHITE);

        let mut big = Surface::new(2, 1);
        big.blit(&small, 1, 0);
        assert_eq!(big.to_plain_string(), " x");
    }

    #[test]
    fn test_out_of_bounds_access() {
        let surface = Surface::new(2, 2);
        assert!(surface.get(2, 0).is_none());
        assert!(surface.get(0, 2).is_none());
        assert!(Surface::new(0, 0).is_empty());
    }
}
