use std::collections::{HashMap, HashSet, VecDeque};

use crate::grid_config::VariableId;
use crate::solver::Solver;
use crate::word_list::WordId;

type Arc = (VariableId, VariableId);

/// Worklist of arcs still to be revised. An arc that's already waiting in the queue isn't added a
/// second time, since it will see the latest domains when it's popped anyway.
#[derive(Debug)]
struct ArcQueue {
    queue: VecDeque<Arc>,
    pending: HashSet<Arc>,
}

impl ArcQueue {
    fn with_initial_queue<Arcs>(arcs: Arcs) -> ArcQueue
    where
        Arcs: IntoIterator<Item = Arc>,
    {
        let mut queue = ArcQueue { queue: VecDeque::new(), pending: HashSet::new() };
        for arc in arcs {
            queue.enqueue(arc);
        }
        queue
    }

    fn pop_front(&mut self) -> Option<Arc> {
        let arc = self.queue.pop_front()?;
        self.pending.remove(&arc);
        Some(arc)
    }

    fn enqueue(&mut self, arc: Arc) {
        if self.pending.insert(arc) {
            self.queue.push_back(arc);
        }
    }
}

impl Solver<'_> {
    /// The letter `word_id` would place in cell `cell_idx`, if it's long enough to reach it.
    pub(crate) fn letter_at(&self, word_id: WordId, cell_idx: usize) -> Option<char> {
        self.vocabulary.word(word_id).chars.get(cell_idx).copied()
    }

    /// How many words in the variable's domain place each letter in cell `cell_idx`?
    pub(crate) fn letter_counts(&self, variable_id: VariableId, cell_idx: usize) -> HashMap<char, usize> {
        let mut letter_counts: HashMap<char, usize> = HashMap::new();
        for word_id in self.domains.get(variable_id).iter() {
            if let Some(letter) = self.letter_at(word_id, cell_idx) {
                *letter_counts.entry(letter).or_insert(0) += 1;
            }
        }
        letter_counts
    }

    /// How many words in `y`'s domain, other than `word_id` itself, place `letter` in `y_cell`?
    /// `letter_counts` must come from `letter_counts(y, y_cell)`.
    pub(crate) fn partner_count(
        &self,
        letter_counts: &HashMap<char, usize>,
        y: VariableId,
        y_cell: usize,
        word_id: WordId,
        letter: char,
    ) -> usize {
        let count = letter_counts.get(&letter).copied().unwrap_or(0);
        if self.domains.contains(y, word_id) && self.letter_at(word_id, y_cell) == Some(letter) {
            count - 1
        } else {
            count
        }
    }

    /// Remove every word from each variable's domain whose length doesn't match the variable.
    pub fn enforce_node_consistency(&mut self) {
        let crossword = self.crossword;
        let vocabulary = self.vocabulary;

        for (variable_id, variable) in crossword.variables.iter().enumerate() {
            let mismatched: Vec<WordId> = self.domains.get(variable_id).iter()
                .filter(|&word_id| vocabulary.word(word_id).len() != variable.length)
                .collect();

            self.domains.remove_all(variable_id, mismatched);

            if self.domains.len(variable_id) == 0 {
                log::warn!("no words of length {} for {}", variable.length, variable);
            }
        }
    }

    /// Make variable `x` arc consistent with variable `y`, removing each word in `x`'s domain that
    /// has no partner in `y`'s domain placing the same letter in their shared cell. A word can't
    /// be its own partner, since no word may fill two variables. Returns whether anything was
    /// removed; pairs that don't overlap are left alone.
    pub fn revise(&mut self, x: VariableId, y: VariableId) -> bool {
        let Some(overlap) = self.crossword.overlap(x, y) else {
            return false;
        };
        self.statistics.revisions += 1;

        let letter_counts = self.letter_counts(y, overlap.y_cell);
        let unsupported: Vec<WordId> = self.domains.get(x).iter().filter(|&word_id| {
            match self.letter_at(word_id, overlap.x_cell) {
                Some(letter) => self.partner_count(&letter_counts, y, overlap.y_cell, word_id, letter) == 0,
                None => true,
            }
        }).collect();

        if unsupported.is_empty() {
            return false;
        }

        log::trace!(
            "revising {} against {} removed {} words",
            self.crossword.variable(x),
            self.crossword.variable(y),
            unsupported.len(),
        );
        self.domains.remove_all(x, unsupported);

        true
    }

    /// Make every variable arc consistent, starting from `arcs` or, if that's `None`, from every
    /// constrained pair in both directions. Returns false as soon as any domain is emptied.
    pub fn ac3(&mut self, arcs: Option<Vec<(VariableId, VariableId)>>) -> bool {
        let crossword = self.crossword;
        let mut queue = ArcQueue::with_initial_queue(arcs.unwrap_or_else(|| crossword.arcs()));
        let revisions_before = self.statistics.revisions;

        while let Some((x, y)) = queue.pop_front() {
            if !self.revise(x, y) {
                continue;
            }

            if self.domains.len(x) == 0 {
                log::warn!("arc consistency left no words for {}", crossword.variable(x));
                return false;
            }

            // Shrinking `x` can leave its other neighbors without partners.
            for &neighbor in crossword.neighbors(x) {
                if neighbor != y {
                    queue.enqueue((neighbor, x));
                }
            }
        }

        log::debug!(
            "arc consistency reached a fixed point after {} revisions",
            self.statistics.revisions - revisions_before,
        );

        true
    }
}

#[cfg(test)]
mod tests {
    use crate::grid_config::Crossword;
    use crate::solver::Solver;
    use crate::word_list::Vocabulary;

    fn domain_strings<'a>(solver: &Solver<'a>, variable_id: usize) -> Vec<&'a str> {
        let vocabulary = solver.vocabulary;
        solver.domains.get(variable_id).iter()
            .map(|word_id| vocabulary.word(word_id).string.as_str())
            .collect()
    }

    /// Every word left in `x` has a distinct partner in `y` for every constrained pair.
    fn assert_arc_consistent(solver: &Solver) {
        for (x, y) in solver.crossword.arcs() {
            let overlap = solver.crossword.overlap(x, y).unwrap();
            for word_id in solver.domains.get(x).iter() {
                let letter = solver.vocabulary.word(word_id).chars[overlap.x_cell];
                assert!(
                    solver.domains.get(y).iter().any(|other| {
                        other != word_id && solver.vocabulary.word(other).chars[overlap.y_cell] == letter
                    }),
                    "{} has no partner in {} for {}",
                    solver.crossword.variable(x),
                    solver.crossword.variable(y),
                    solver.vocabulary.word(word_id).string,
                );
            }
        }
    }

    /// ___
    /// _##
    /// _##
    fn corner() -> Crossword {
        Crossword::from_template("___\n_##\n_##").unwrap()
    }

    #[test]
    fn test_node_consistency_filters_by_length() {
        let crossword = Crossword::from_template("___\n#__").unwrap();
        let vocabulary = Vocabulary::new(["AT", "CAT", "DOG", "HORSE", "OX"]);
        let mut solver = Solver::new(&crossword, &vocabulary);

        solver.enforce_node_consistency();

        assert_eq!(domain_strings(&solver, 0), vec!["CAT", "DOG"]);
        assert_eq!(domain_strings(&solver, 1), vec!["AT", "OX"]);

        let before = solver.domains.clone();
        solver.enforce_node_consistency();
        assert_eq!(solver.domains, before);
    }

    #[test]
    fn test_revise_removes_words_without_partners() {
        let crossword = corner();
        let vocabulary = Vocabulary::new(["CAT", "COW", "OWL"]);
        let mut solver = Solver::new(&crossword, &vocabulary);
        solver.enforce_node_consistency();

        assert!(solver.revise(0, 1));
        assert_eq!(domain_strings(&solver, 0), vec!["CAT", "COW"]);
        assert_eq!(domain_strings(&solver, 1), vec!["CAT", "COW", "OWL"]);
        assert!(!solver.revise(0, 1));
    }

    #[test]
    fn test_revise_does_not_let_a_word_partner_itself() {
        let crossword = corner();
        let vocabulary = Vocabulary::new(["CAT", "DOG"]);
        let mut solver = Solver::new(&crossword, &vocabulary);
        solver.enforce_node_consistency();

        assert!(solver.revise(0, 1));
        assert!(domain_strings(&solver, 0).is_empty());
    }

    #[test]
    fn test_revise_without_overlap_is_a_no_op() {
        let crossword = Crossword::from_template("___\n###\n___").unwrap();
        let vocabulary = Vocabulary::new(["CAT", "DOG"]);
        let mut solver = Solver::new(&crossword, &vocabulary);
        solver.enforce_node_consistency();

        assert!(!solver.revise(0, 1));
        assert!(!solver.revise(0, 0));
        assert_eq!(solver.statistics.revisions, 0);
    }

    #[test]
    fn test_ac3_fails_when_a_domain_empties() {
        let crossword = corner();
        let vocabulary = Vocabulary::new(["CAT", "DOG"]);
        let mut solver = Solver::new(&crossword, &vocabulary);
        solver.enforce_node_consistency();

        assert!(!solver.ac3(None));
        assert!(solver.domains.first_empty().is_some());
    }

    #[test]
    fn test_ac3_without_constraints_leaves_domains_alone() {
        let crossword = Crossword::from_template("___\n###\n__#").unwrap();
        let vocabulary = Vocabulary::new(["AT", "CAT", "DOG", "OX"]);
        let mut solver = Solver::new(&crossword, &vocabulary);
        solver.enforce_node_consistency();
        let before = solver.domains.clone();

        assert!(solver.ac3(None));
        assert_eq!(solver.domains, before);
    }

    /// ___
    /// _##
    /// ___
    #[test]
    fn test_ac3_propagates_through_shared_neighbors() {
        let crossword = Crossword::from_template("___\n_##\n___").unwrap();
        let vocabulary = Vocabulary::new(["ART", "CAT", "COD", "DOT", "TOP", "ZZZ"]);
        let mut solver = Solver::new(&crossword, &vocabulary);
        solver.enforce_node_consistency();

        assert!(solver.ac3(None));
        assert_arc_consistent(&solver);
        for variable_id in 0..crossword.variables.len() {
            assert!(!domain_strings(&solver, variable_id).contains(&"ZZZ"));
        }

        let before = solver.domains.clone();
        assert!(solver.ac3(None));
        assert_eq!(solver.domains, before, "a second pass finds nothing to prune");
    }

    #[test]
    fn test_ac3_with_explicit_arcs_only_revises_those() {
        let crossword = corner();
        let vocabulary = Vocabulary::new(["CAT", "COW", "OWL"]);
        let mut solver = Solver::new(&crossword, &vocabulary);
        solver.enforce_node_consistency();

        assert!(solver.ac3(Some(vec![(1, 0)])));
        assert_eq!(domain_strings(&solver, 1), vec!["CAT", "COW"]);
        assert_eq!(domain_strings(&solver, 0), vec!["CAT", "COW", "OWL"]);
    }
}
