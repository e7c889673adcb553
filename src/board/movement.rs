use super::{CellPos, Direction, Grid};

/// Result of resolving one move against the grid
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Slide {
    pub from: CellPos,
    pub target: CellPos,
    pub direction: Direction,
}

impl Slide {
    /// Signed number of cells travelled along the movement axis
    pub fn cells_travelled(&self) -> i64 {
        if self.direction.is_horizontal() {
            self.target.column as i64 - self.from.column as i64
        } else {
            self.target.row as i64 - self.from.row as i64
        }
    }

    /// Pixel coordinate of the target cell on the movement axis
    pub fn target_position(&self, cell_size: f64) -> f64 {
        let index = if self.direction.is_horizontal() {
            self.target.column
        } else {
            self.target.row
        };
        index as f64 * cell_size
    }

    pub fn is_blocked(&self) -> bool {
        self.from == self.target
    }
}

/// Walk from `from` in `direction` while the next cell is empty
/// - stops on the last empty cell before a wall or the grid edge
/// - an immediately blocked move resolves to `from` (zero distance)
/// - the starting cell itself is never inspected, the block may sit on a wall
pub fn resolve(grid: &Grid, from: CellPos, direction: Direction) -> Slide {
    let mut target = from;
    while let Some(next) = grid.neighbour(target, direction) {
        if grid.is_wall(next) {
            break;
        }
        target = next;
    }
    Slide {
        from,
        target,
        direction,
    }
}
