use super::{CellPos, Direction};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
}

/// Row-major grid of cells
/// - owns the spatial truth the movement resolver scans
/// - (0, 0) starts as a wall, it doubles as the start marker under the block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub const START: CellPos = CellPos::new(0, 0);

    /// Both dimensions are clamped to at least 1 so the block always has a cell
    pub fn new(columns: usize, rows: usize) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        let mut grid = Grid {
            columns,
            rows,
            cells: vec![Cell::Empty; columns * rows],
        };
        grid.place_wall(Self::START);
        grid
    }

    /// Number of whole cells of `cell_size` that fit in `canvas_width` x `canvas_height`
    pub fn dimensions_for(canvas_width: f64, canvas_height: f64, cell_size: f64) -> (usize, usize) {
        if cell_size <= 0.0 {
            return (1, 1);
        }
        let columns = (canvas_width / cell_size).floor().max(1.0) as usize;
        let rows = (canvas_height / cell_size).floor().max(1.0) as usize;
        (columns, rows)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        pos.column < self.columns && pos.row < self.rows
    }

    pub fn cell(&self, pos: CellPos) -> Option<Cell> {
        if self.contains(pos) {
            self.cells.get(self.index(pos)).copied()
        } else {
            None
        }
    }

    pub fn is_wall(&self, pos: CellPos) -> bool {
        self.cell(pos) == Some(Cell::Wall)
    }

    /// Marks `pos` as a wall, returns false if it already was one or is out of bounds
    pub fn place_wall(&mut self, pos: CellPos) -> bool {
        if !self.contains(pos) {
            return false;
        }
        let index = self.index(pos);
        match self.cells[index] {
            Cell::Wall => false,
            Cell::Empty => {
                self.cells[index] = Cell::Wall;
                true
            }
        }
    }

    /// The cell one step away in `direction`, None past the grid edge
    pub fn neighbour(&self, pos: CellPos, direction: Direction) -> Option<CellPos> {
        let next = match direction {
            Direction::Up => CellPos::new(pos.column, pos.row.checked_sub(1)?),
            Direction::Down => CellPos::new(pos.column, pos.row + 1),
            Direction::Left => CellPos::new(pos.column.checked_sub(1)?, pos.row),
            Direction::Right => CellPos::new(pos.column + 1, pos.row),
        };
        self.contains(next).then_some(next)
    }

    /// Closest in-bounds cell to `pos`
    pub fn clamp(&self, pos: CellPos) -> CellPos {
        CellPos::new(pos.column.min(self.columns - 1), pos.row.min(self.rows - 1))
    }

    /// Reallocate to new dimensions, walls in the overlapping region survive
    pub fn resize(&mut self, columns: usize, rows: usize) {
        let columns = columns.max(1);
        let rows = rows.max(1);
        if columns == self.columns && rows == self.rows {
            return;
        }
        let mut cells = vec![Cell::Empty; columns * rows];
        for row in 0..rows.min(self.rows) {
            for column in 0..columns.min(self.columns) {
                cells[row * columns + column] = self.cells[self.index(CellPos::new(column, row))];
            }
        }
        self.columns = columns;
        self.rows = rows;
        self.cells = cells;
    }

    pub fn walls(&self) -> impl Iterator<Item = CellPos> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Wall)
            .map(move |(index, _)| CellPos::new(index % self.columns, index / self.columns))
    }

    fn index(&self, pos: CellPos) -> usize {
        pos.row * self.columns + pos.column
    }
}
