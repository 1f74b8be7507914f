use std::collections::HashSet;

use super::{grammar::Symbol, Grammar};

impl Grammar {
    /// Compute FOLLOW for every tracked nonterminal. The start symbol is
    /// seeded with the end marker, then full passes run until no set grows.
    /// For each occurrence of a nonterminal B inside a production of LHS,
    /// the next element after B (skipping action tags) decides the
    /// contribution: its non-epsilon FIRST, plus FOLLOW(LHS) when it is
    /// nullable or absent. Every occurrence of B is processed independently.
    ///
    /// FIRST sets must already be computed.
    pub fn calculate_follow(&mut self) {
        let epsilon = self.epsilon_index();
        let end = self.end_index();

        if let Some(start_idx) = self.start_symbol {
            self.symbols[start_idx]
                .mut_non_terminal()
                .unwrap()
                .follow
                .insert(end);
        }

        let mut changed = true;
        while changed {
            changed = false;
            for left in 0..self.symbols.len() {
                let (productions, left_follow) = match &self.symbols[left] {
                    Symbol::NonTerminal(nt) => (nt.productions.clone(), nt.follow.clone()),
                    _ => continue,
                };

                for production in &productions {
                    for (pos, &b) in production.iter().enumerate() {
                        match self.symbols[b].non_terminal() {
                            Some(nt) if nt.follow_tracked() => {}
                            _ => continue,
                        }

                        let next = production[pos + 1..]
                            .iter()
                            .find(|&&s| !self.symbols[s].is_action())
                            .cloned();

                        let addition: HashSet<usize> = match next {
                            None => left_follow.clone(),
                            Some(s) => {
                                let next_first = self.first_of_symbol(s);
                                let mut addition: HashSet<usize> = next_first
                                    .iter()
                                    .cloned()
                                    .filter(|&f| f != epsilon)
                                    .collect();
                                if next_first.contains(&epsilon) {
                                    addition.extend(left_follow.iter().cloned());
                                }
                                addition
                            }
                        };

                        let nt = self.symbols[b].mut_non_terminal().unwrap();
                        let before = nt.follow.len();
                        nt.follow.extend(addition);
                        changed |= nt.follow.len() != before;
                    }
                }
            }
        }
    }
}
