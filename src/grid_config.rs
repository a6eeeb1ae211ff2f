use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::path::Path;

use smallvec::{smallvec, SmallVec};

use crate::errors::{CrosswordError, Result};
use crate::MAX_SLOT_LENGTH;

/// Zero-indexed (row, column) coords for a cell in the grid, where row = 0 is the top row.
pub type GridCoord = (usize, usize);

/// An identifier for a given variable, based on its index in the Crossword's `variables` field.
pub type VariableId = usize;

/// Direction that a variable is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

/// A single word slot in the grid: a maximal run of at least two fillable cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    pub start_cell: GridCoord,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    /// Generate the coords for each cell of this variable.
    pub fn cell_coords(&self) -> impl Iterator<Item = GridCoord> {
        let Variable { start_cell: (row, column), direction, length } = *self;
        (0..length).map(move |cell_idx| match direction {
            Direction::Across => (row, column + cell_idx),
            Direction::Down => (row + cell_idx, column),
        })
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let direction = match self.direction {
            Direction::Across => "across",
            Direction::Down => "down",
        };
        write!(f, "({}, {}) {} {}", self.start_cell.0, self.start_cell.1, direction, self.length)
    }
}

/// The cell shared by two crossing variables, as an index into each one's word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub x_cell: usize,
    pub y_cell: usize,
}

impl Overlap {
    fn flipped(self) -> Overlap {
        Overlap { x_cell: self.y_cell, y_cell: self.x_cell }
    }
}

/// The fillable/blocked layout of a rectangular grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    pub height: usize,
    pub width: usize,
    cells: Vec<Vec<bool>>,
}

impl Structure {
    /// Build a structure from rows of cells, where `true` means fillable.
    pub fn new(cells: Vec<Vec<bool>>) -> Result<Structure> {
        let width = cells.first().map(|row| row.len()).ok_or(CrosswordError::EmptyStructure)?;

        if let Some((row, found)) =
            cells.iter().map(|row| row.len()).enumerate().find(|&(_, len)| len != width)
        {
            return Err(CrosswordError::RaggedStructure { row, expected: width, found });
        }

        Ok(Structure { height: cells.len(), width, cells })
    }

    /// Parse a structure from a string template, with `_` or `.` representing fillable cells and
    /// `#` representing blocks. Surrounding whitespace and blank lines are ignored.
    pub fn parse(template: &str) -> Result<Structure> {
        let rows = template
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(column, cell)| match cell {
                        '_' | '.' => Ok(true),
                        '#' => Ok(false),
                        found => Err(CrosswordError::InvalidCell { row, column, found }),
                    })
                    .collect::<Result<Vec<bool>>>()
            })
            .collect::<Result<Vec<Vec<bool>>>>()?;

        Structure::new(rows)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Structure> {
        let path = path.as_ref();
        let template = std::fs::read_to_string(path)
            .map_err(|source| CrosswordError::Io { path: path.to_path_buf(), source })?;

        Structure::parse(&template)
    }

    pub fn is_fillable(&self, (row, column): GridCoord) -> bool {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(column))
            .copied()
            .unwrap_or(false)
    }
}

/// Find the (start, length) of every run of two or more fillable cells in a line of the grid.
fn fillable_runs<I: IntoIterator<Item = bool>>(line: I) -> Vec<(usize, usize)> {
    let mut result = vec![];
    let mut run_start: Option<usize> = None;
    let mut line_length = 0;

    for (idx, fillable) in line.into_iter().enumerate() {
        line_length = idx + 1;
        match (fillable, run_start) {
            (true, None) => run_start = Some(idx),
            (false, Some(start)) => {
                if idx - start > 1 {
                    result.push((start, idx - start));
                }
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start {
        if line_length - start > 1 {
            result.push((start, line_length - start));
        }
    }

    result
}

/// The immutable description of a puzzle: its structure, the variables derived from it, and the
/// overlaps between crossing variables.
#[derive(Debug, Clone)]
pub struct Crossword {
    pub structure: Structure,
    pub variables: Vec<Variable>,

    /// Keyed by (lower id, higher id); the overlap is stored relative to that order.
    overlaps: HashMap<(VariableId, VariableId), Overlap>,

    neighbors: Vec<SmallVec<[VariableId; MAX_SLOT_LENGTH]>>,
}

impl Crossword {
    pub fn new(structure: Structure) -> Crossword {
        let mut variables: Vec<Variable> = vec![];

        for row in 0..structure.height {
            let cells = (0..structure.width).map(|column| structure.is_fillable((row, column)));
            for (column, length) in fillable_runs(cells) {
                variables.push(Variable { start_cell: (row, column), direction: Direction::Across, length });
            }
        }

        for column in 0..structure.width {
            let cells = (0..structure.height).map(|row| structure.is_fillable((row, column)));
            for (row, length) in fillable_runs(cells) {
                variables.push(Variable { start_cell: (row, column), direction: Direction::Down, length });
            }
        }

        // Build a map from cell location to the variables passing through it, which we can then
        // use to calculate overlaps.
        let mut entries_by_loc: HashMap<GridCoord, SmallVec<[(VariableId, usize); 2]>> = HashMap::new();
        for (variable_id, variable) in variables.iter().enumerate() {
            for (cell_idx, loc) in variable.cell_coords().enumerate() {
                entries_by_loc.entry(loc).or_insert_with(|| smallvec![]).push((variable_id, cell_idx));
            }
        }

        let mut overlaps: HashMap<(VariableId, VariableId), Overlap> = HashMap::new();
        let mut neighbors: Vec<SmallVec<[VariableId; MAX_SLOT_LENGTH]>> =
            variables.iter().map(|_| smallvec![]).collect();

        for entries in entries_by_loc.values() {
            // An across and a down run share at most one cell, and two runs in the same direction
            // never share any, so a cell holds at most one crossing.
            if let &[(a, a_cell), (b, b_cell)] = entries.as_slice() {
                let overlap = Overlap { x_cell: a_cell, y_cell: b_cell };
                let (key, overlap) = if a < b { ((a, b), overlap) } else { ((b, a), overlap.flipped()) };
                overlaps.insert(key, overlap);
                neighbors[a].push(b);
                neighbors[b].push(a);
            }
        }

        for variable_neighbors in &mut neighbors {
            variable_neighbors.sort_unstable();
        }

        Crossword { structure, variables, overlaps, neighbors }
    }

    /// Build a crossword from a string template; see `Structure::parse`.
    pub fn from_template(template: &str) -> Result<Crossword> {
        Ok(Crossword::new(Structure::parse(template)?))
    }

    pub fn height(&self) -> usize {
        self.structure.height
    }

    pub fn width(&self) -> usize {
        self.structure.width
    }

    pub fn variable(&self, variable_id: VariableId) -> &Variable {
        &self.variables[variable_id]
    }

    /// The overlap between `x` and `y`, with `x_cell` indexing into `x`'s word. Returns `None` for
    /// pairs that share no cell, including `x == y`.
    pub fn overlap(&self, x: VariableId, y: VariableId) -> Option<Overlap> {
        if x < y {
            self.overlaps.get(&(x, y)).copied()
        } else {
            self.overlaps.get(&(y, x)).map(|overlap| overlap.flipped())
        }
    }

    /// All variables sharing a cell with `variable_id`, in id order.
    pub fn neighbors(&self, variable_id: VariableId) -> &[VariableId] {
        &self.neighbors[variable_id]
    }

    /// Every constrained ordered pair, one entry per direction.
    pub fn arcs(&self) -> Vec<(VariableId, VariableId)> {
        self.neighbors
            .iter()
            .enumerate()
            .flat_map(|(x, ys)| ys.iter().map(move |&y| (x, y)))
            .collect()
    }
}
