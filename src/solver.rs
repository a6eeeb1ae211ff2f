use instant::{Duration, Instant};

use crate::backtracking_search::Assignment;
use crate::domains::Domains;
use crate::grid_config::{Crossword, VariableId};
use crate::word_list::Vocabulary;

/// How `order_domain_values` should order each variable's candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueOrdering {
    /// Try the words that rule out the fewest candidates of unassigned neighbors first.
    #[default]
    LeastConstraining,
    /// Try the words in domain (`WordId`) order.
    DomainOrder,
}

/// Tunable heuristics. None of these change which grids are solvable, only how quickly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverOptions {
    pub value_ordering: ValueOrdering,

    /// Break minimum-remaining-values ties by preferring the variable with the most unassigned
    /// neighbors.
    pub degree_tie_break: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions { value_ordering: ValueOrdering::default(), degree_tie_break: true }
    }
}

/// A struct tracking statistics about the filling process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub states: u64,
    pub backtracks: u64,
    pub revisions: u64,
    pub duration: Duration,
}

/// A struct representing the results of a fill operation.
#[derive(Debug)]
pub struct FillSuccess {
    pub statistics: Statistics,
    pub assignment: Assignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillFailure {
    /// Node or arc consistency left this variable without any candidates.
    EmptyDomain(VariableId),
    /// Search tried every candidate without completing the grid.
    Exhausted,
}

/// The live state of one solve: the puzzle, the vocabulary, and the domains being pruned.
#[derive(Debug)]
pub struct Solver<'a> {
    pub crossword: &'a Crossword,
    pub vocabulary: &'a Vocabulary,
    pub domains: Domains,
    pub options: SolverOptions,
    pub statistics: Statistics,
}

impl<'a> Solver<'a> {
    pub fn new(crossword: &'a Crossword, vocabulary: &'a Vocabulary) -> Solver<'a> {
        Solver::with_options(crossword, vocabulary, SolverOptions::default())
    }

    pub fn with_options(
        crossword: &'a Crossword,
        vocabulary: &'a Vocabulary,
        options: SolverOptions,
    ) -> Solver<'a> {
        Solver {
            crossword,
            vocabulary,
            domains: Domains::initialize(crossword.variables.len(), vocabulary),
            options,
            statistics: Statistics::default(),
        }
    }

    /// Enforce node and arc consistency, and then search for a complete assignment.
    pub fn solve(&mut self) -> Result<FillSuccess, FillFailure> {
        let start = Instant::now();

        self.enforce_node_consistency();

        // A failed propagation pass leaves an empty domain behind, which search notices on its
        // first step, so the result only matters for logging.
        if !self.ac3(None) {
            log::debug!("arc consistency emptied a domain; search will confirm there is no fill");
        }

        let result = self.backtrack(Assignment::new());
        self.statistics.duration = start.elapsed();

        log::info!(
            "search finished after {} states, {} backtracks, {} revisions in {:?}",
            self.statistics.states,
            self.statistics.backtracks,
            self.statistics.revisions,
            self.statistics.duration,
        );

        match result {
            Some(assignment) => Ok(FillSuccess { statistics: self.statistics.clone(), assignment }),
            None => Err(match self.domains.first_empty() {
                Some(variable_id) => FillFailure::EmptyDomain(variable_id),
                None => FillFailure::Exhausted,
            }),
        }
    }
}

/// Search for a valid fill for the given grid and vocabulary.
pub fn find_fill(
    crossword: &Crossword,
    vocabulary: &Vocabulary,
    options: SolverOptions,
) -> Result<FillSuccess, FillFailure> {
    Solver::with_options(crossword, vocabulary, options).solve()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_fill_for_small_structure() {
        let crossword = Crossword::from_template(
            "
            #___#
            #_##_
            #_##_
            #_##_
            #____
            ",
        ).unwrap();
        let vocabulary = Vocabulary::new([
            "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE", "TEN",
        ]);

        let result = find_fill(&crossword, &vocabulary, SolverOptions::default())
            .expect("Failed to find a fill");

        let words: Vec<&str> = (0..crossword.variables.len())
            .map(|variable_id| result.assignment.word(&vocabulary, variable_id).unwrap())
            .collect();
        assert_eq!(words, vec!["SIX", "NINE", "SEVEN", "FIVE"]);
        assert!(result.statistics.states >= 4);
    }

    #[test]
    fn test_every_option_combination_finds_the_same_unique_fill() {
        let crossword = Crossword::from_template("#___#\n#_##_\n#_##_\n#_##_\n#____").unwrap();
        let vocabulary = Vocabulary::new([
            "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE", "TEN",
        ]);

        for value_ordering in [ValueOrdering::LeastConstraining, ValueOrdering::DomainOrder] {
            for degree_tie_break in [true, false] {
                let options = SolverOptions { value_ordering, degree_tie_break };
                let result = find_fill(&crossword, &vocabulary, options).expect("Failed to find a fill");
                assert_eq!(result.assignment.word(&vocabulary, 0), Some("SIX"), "{:?}", options);
                assert_eq!(result.assignment.word(&vocabulary, 3), Some("FIVE"), "{:?}", options);
            }
        }
    }

    #[test]
    fn test_fill_reports_empty_domain() {
        let crossword = Crossword::from_template("____").unwrap();
        let vocabulary = Vocabulary::new(["CAT", "HORSE"]);

        assert_eq!(
            find_fill(&crossword, &vocabulary, SolverOptions::default()).unwrap_err(),
            FillFailure::EmptyDomain(0)
        );
    }

    #[test]
    fn test_fill_reports_exhaustion() {
        // Unconnected slots are never revised against each other, so a one-word vocabulary
        // survives propagation and only fails the distinctness check in search.
        let vocabulary = Vocabulary::new(["AA"]);
        let crossword = Crossword::from_template("_\n_").unwrap();
        assert!(find_fill(&crossword, &vocabulary, SolverOptions::default()).is_ok());

        let crossword = Crossword::from_template("__\n##\n__").unwrap();
        assert_eq!(
            find_fill(&crossword, &vocabulary, SolverOptions::default()).unwrap_err(),
            FillFailure::Exhausted
        );
    }

    #[test]
    fn test_grid_without_variables_is_trivially_filled() {
        let crossword = Crossword::from_template("#_#").unwrap();
        let vocabulary = Vocabulary::default();

        let result = find_fill(&crossword, &vocabulary, SolverOptions::default())
            .expect("Failed to find a fill");
        assert!(result.assignment.is_empty());
    }
}
