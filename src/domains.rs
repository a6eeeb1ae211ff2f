use bit_set::BitSet;

use crate::grid_config::VariableId;
use crate::word_list::{Vocabulary, WordId};

/// The current candidate words for each variable, as sets of `WordId`s. Domains only ever shrink.
#[derive(Debug, Clone, PartialEq)]
pub struct Domains {
    by_variable: Vec<BitSet>,
}

impl Domains {
    /// Give each of `variable_count` variables its own copy of the whole vocabulary.
    pub fn initialize(variable_count: usize, vocabulary: &Vocabulary) -> Domains {
        let all_words: BitSet = (0..vocabulary.len()).collect();

        Domains { by_variable: vec![all_words; variable_count] }
    }

    pub fn get(&self, variable_id: VariableId) -> &BitSet {
        &self.by_variable[variable_id]
    }

    pub fn len(&self, variable_id: VariableId) -> usize {
        self.by_variable[variable_id].len()
    }

    pub fn contains(&self, variable_id: VariableId, word_id: WordId) -> bool {
        self.by_variable[variable_id].contains(word_id)
    }

    /// Remove every listed word from the variable's domain, returning how many were present.
    pub fn remove_all<I>(&mut self, variable_id: VariableId, word_ids: I) -> usize
    where
        I: IntoIterator<Item = WordId>,
    {
        let domain = &mut self.by_variable[variable_id];
        word_ids.into_iter().filter(|&word_id| domain.remove(word_id)).count()
    }

    /// The first variable whose domain is empty, if any.
    pub fn first_empty(&self) -> Option<VariableId> {
        self.by_variable.iter().position(BitSet::is_empty)
    }
}
