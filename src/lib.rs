pub mod arc_consistency;
pub mod backtracking_search;
pub mod domains;
pub mod errors;
pub mod grid_config;
pub mod log;
pub mod render;
pub mod solver;
pub mod word_list;

pub use backtracking_search::{Assignment, Choice};
pub use errors::CrosswordError;
pub use grid_config::{Crossword, Direction, Overlap, Structure, Variable, VariableId};
pub use render::{draw_grid, letter_grid, render_grid, save_image};
pub use solver::{find_fill, FillFailure, FillSuccess, Solver, SolverOptions, Statistics, ValueOrdering};
pub use word_list::{Vocabulary, Word, WordId};

/// The expected maximum length for a single variable, used to size inline storage. Longer words
/// still work; they just spill to the heap.
pub const MAX_SLOT_LENGTH: usize = 21;
