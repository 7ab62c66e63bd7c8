//! Presentation values derived from [CellStatus]. The search never reads these.
use crate::pathing_grid::CellStatus;

pub type Rgb = (u8, u8, u8);

pub const WHITE: Rgb = (255, 255, 255);
pub const GREEN: Rgb = (0, 255, 0);
pub const RED: Rgb = (255, 0, 0);
pub const BLACK: Rgb = (0, 0, 0);
pub const ORANGE: Rgb = (255, 165, 0);
pub const TURQUOISE: Rgb = (64, 224, 208);
pub const PURPLE: Rgb = (128, 0, 128);

/// Single character used by the text renderer and [Display](core::fmt::Display).
pub fn glyph(status: CellStatus) -> char {
    match status {
        CellStatus::Empty => '.',
        CellStatus::Open => 'o',
        CellStatus::Closed => 'x',
        CellStatus::Barrier => '#',
        CellStatus::Start => 'S',
        CellStatus::End => 'E',
        CellStatus::Path => '*',
    }
}

pub fn color(status: CellStatus) -> Rgb {
    match status {
        CellStatus::Empty => WHITE,
        CellStatus::Open => GREEN,
        CellStatus::Closed => RED,
        CellStatus::Barrier => BLACK,
        CellStatus::Start => ORANGE,
        CellStatus::End => TURQUOISE,
        CellStatus::Path => PURPLE,
    }
}
