// ┌──────────────────────────────────────────────────────────────────────────┐
// │                         board/ at a glance                               │
// ├───────────────────┬──────────────────────────────────────────────────────┤
// │ mod.rs            │ CellPos + Direction shared vocabulary                │
// │ grid.rs           │ Cell states, wall placement, resize                  │
// │ movement.rs       │ Slide resolution: scan until wall or edge            │
// │ animation.rs      │ Idle / Moving state machine + elastic easing         │
// └───────────────────┴──────────────────────────────────────────────────────┘
// Nothing under board/ touches the browser, so all of it is unit tested natively.
pub mod animation;
pub mod grid;
pub mod movement;

pub use animation::{ease_out_elastic, BlockAnimation, Motion};
pub use grid::{Cell, Grid};
pub use movement::{resolve, Slide};

/// Integer address of a grid square, (0, 0) is the top left cell
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct CellPos {
    pub column: usize,
    pub row: usize,
}

impl CellPos {
    pub const fn new(column: usize, row: usize) -> Self {
        CellPos { column, row }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Polling order for held keys
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}
