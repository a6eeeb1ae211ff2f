use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::grid_config::VariableId;
use crate::solver::{Solver, ValueOrdering};
use crate::word_list::{Vocabulary, WordId};

/// A struct recording a variable assignment made during the filling process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub variable_id: VariableId,
    pub word_id: WordId,
}

/// A partial or complete mapping from variables to the words chosen for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    words: BTreeMap<VariableId, WordId>,
}

impl Assignment {
    pub fn new() -> Assignment {
        Assignment::default()
    }

    pub fn insert(&mut self, variable_id: VariableId, word_id: WordId) -> Option<WordId> {
        self.words.insert(variable_id, word_id)
    }

    pub fn remove(&mut self, variable_id: VariableId) -> Option<WordId> {
        self.words.remove(&variable_id)
    }

    pub fn get(&self, variable_id: VariableId) -> Option<WordId> {
        self.words.get(&variable_id).copied()
    }

    pub fn contains(&self, variable_id: VariableId) -> bool {
        self.words.contains_key(&variable_id)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The choices in variable id order.
    pub fn iter(&self) -> impl Iterator<Item = Choice> + '_ {
        self.words.iter().map(|(&variable_id, &word_id)| Choice { variable_id, word_id })
    }

    /// The word assigned to a variable, as a string.
    pub fn word<'v>(&self, vocabulary: &'v Vocabulary, variable_id: VariableId) -> Option<&'v str> {
        self.get(variable_id).map(|word_id| vocabulary.word(word_id).string.as_str())
    }
}

impl FromIterator<Choice> for Assignment {
    fn from_iter<I: IntoIterator<Item = Choice>>(choices: I) -> Assignment {
        Assignment {
            words: choices.into_iter().map(|choice| (choice.variable_id, choice.word_id)).collect(),
        }
    }
}

/// A decision point on the search stack: the variable being filled, its candidates in the order
/// they'll be tried, and the index of the next one to try.
#[derive(Debug)]
struct Frame {
    variable_id: VariableId,
    candidates: Vec<WordId>,
    next: usize,
}

impl Solver<'_> {
    /// Does `assignment` give a word to every variable?
    pub fn assignment_complete(&self, assignment: &Assignment) -> bool {
        assignment.len() == self.crossword.variables.len()
    }

    /// Return true if every assigned word fits its variable's length, no word is used twice, and
    /// every pair of crossing variables agrees on their shared letter.
    pub fn consistent(&self, assignment: &Assignment) -> bool {
        let choices: Vec<Choice> = assignment.iter().collect();

        for (idx, choice) in choices.iter().enumerate() {
            if self.vocabulary.word(choice.word_id).len() != self.crossword.variable(choice.variable_id).length {
                return false;
            }

            for other in &choices[idx + 1..] {
                // Vocabulary words are distinct, so equal ids mean equal words.
                if choice.word_id == other.word_id {
                    return false;
                }

                if let Some(overlap) = self.crossword.overlap(choice.variable_id, other.variable_id) {
                    let letter = self.letter_at(choice.word_id, overlap.x_cell);
                    if letter != self.letter_at(other.word_id, overlap.y_cell) {
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Choose the unassigned variable with the fewest words left in its domain. Ties go to the
    /// variable crossing the most unassigned variables when `degree_tie_break` is set, and then to
    /// the lowest id. Returns `None` once every variable is assigned.
    pub fn select_unassigned_variable(&self, assignment: &Assignment) -> Option<VariableId> {
        (0..self.crossword.variables.len())
            .filter(|&variable_id| !assignment.contains(variable_id))
            .min_by_key(|&variable_id| {
                let degree = if self.options.degree_tie_break {
                    self.crossword.neighbors(variable_id).iter()
                        .filter(|&&neighbor| !assignment.contains(neighbor))
                        .count()
                } else {
                    0
                };

                (self.domains.len(variable_id), Reverse(degree))
            })
    }

    /// Return the words in the variable's domain, ordered by how many candidates each one would
    /// rule out among the unassigned neighbors, fewest first. This only reorders; every word in
    /// the domain is returned.
    pub fn order_domain_values(&self, variable_id: VariableId, assignment: &Assignment) -> Vec<WordId> {
        let mut candidates: Vec<WordId> = self.domains.get(variable_id).iter().collect();

        if self.options.value_ordering == ValueOrdering::DomainOrder {
            return candidates;
        }

        let crossings: Vec<_> = self.crossword.neighbors(variable_id).iter()
            .filter(|&&neighbor| !assignment.contains(neighbor))
            .filter_map(|&neighbor| {
                let overlap = self.crossword.overlap(variable_id, neighbor)?;
                let letter_counts = self.letter_counts(neighbor, overlap.y_cell);
                Some((neighbor, overlap, letter_counts))
            })
            .collect();

        // A neighbor's word is ruled out if it puts a different letter in the shared cell or is
        // the candidate itself.
        candidates.sort_by_cached_key(|&word_id| {
            crossings.iter().map(|(neighbor, overlap, letter_counts)| {
                let partners = self.letter_at(word_id, overlap.x_cell)
                    .map(|letter| {
                        self.partner_count(letter_counts, *neighbor, overlap.y_cell, word_id, letter)
                    })
                    .unwrap_or(0);

                self.domains.len(*neighbor) - partners
            }).sum::<usize>()
        });

        candidates
    }

    /// Using backtracking search, extend `assignment` to a complete, consistent assignment if
    /// possible. Returns `None` if no such assignment exists within the current domains.
    ///
    /// The search keeps its own stack of decision points rather than recursing. The assignment is
    /// updated in place, and each frame retracts its own choice before trying its next candidate,
    /// so a frame that gets popped leaves the assignment as it found it.
    pub fn backtrack(&mut self, mut assignment: Assignment) -> Option<Assignment> {
        let mut stack: Vec<Frame> = vec![];

        loop {
            if self.assignment_complete(&assignment) {
                return Some(assignment);
            }

            if let Some(variable_id) = self.select_unassigned_variable(&assignment) {
                self.statistics.states += 1;
                let candidates = self.order_domain_values(variable_id, &assignment);

                log::trace!(
                    "filling {} with {} candidates",
                    self.crossword.variable(variable_id),
                    candidates.len(),
                );

                stack.push(Frame { variable_id, candidates, next: 0 });
            }

            // Move the innermost frame on to its next consistent candidate, popping frames that
            // run out. An empty stack means every branch has failed.
            'advance: loop {
                let frame = stack.last_mut()?;
                assignment.remove(frame.variable_id);

                while let Some(&word_id) = frame.candidates.get(frame.next) {
                    frame.next += 1;
                    assignment.insert(frame.variable_id, word_id);

                    if self.consistent(&assignment) {
                        break 'advance;
                    }

                    assignment.remove(frame.variable_id);
                }

                stack.pop();
                self.statistics.backtracks += 1;
            }
        }
    }
}
