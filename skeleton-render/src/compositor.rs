// SkeletonView: Terminal compositor
//
// Flattens a surface into ANSI text. Each cell's colour is blended over the
// background by its coverage, then painted as a 24-bit foreground colour.

use ansi_term::{ANSIString, ANSIStrings, Colour};
use skeleton_utils::Rgba;

use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compositor {
    background: Rgba,
}

impl Compositor {
    pub fn new(background: Rgba) -> Self {
        Self { background }
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    /// Colour a cell ends up with on screen
    pub fn resolve(&self, color: Rgba) -> Rgba {
        color.over(self.background)
    }

    /// One line per surface row, rows separated by `\n`.
    pub fn compose(&self, surface: &Surface) -> String {
        surface
            .rows()
            .map(|row| {
                let painted: Vec<ANSIString<'static>> = row
                    .iter()
                    .filter(|cell| !cell.is_continuation())
                    .map(|cell| {
                        if cell.is_blank() {
                            return ANSIString::from(" ");
                        }
                        let c = self.resolve(cell.color);
                        Colour::RGB(c.r, c.g, c.b).paint(cell.symbol.to_string())
                    })
                    .collect();
                ANSIStrings(&painted).to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(Rgba::BLACK)
    }
}
