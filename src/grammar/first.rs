use std::collections::HashSet;

use super::{grammar::Symbol, Grammar};

impl Grammar {
    /// Compute FIRST for every nonterminal by repeated full passes until no
    /// set grows. Each pass reads the working sets as they stand, never
    /// recursing into another symbol's derivation, so any recursion shape in
    /// the grammar terminates: the sets grow monotonically and are bounded by
    /// the terminal alphabet plus epsilon.
    pub fn calculate_first(&mut self) {
        let mut changed = true;
        while changed {
            changed = false;
            for i in 0..self.symbols.len() {
                let first: HashSet<usize> = match &self.symbols[i] {
                    Symbol::NonTerminal(nt) => {
                        let mut first = nt.first.clone();
                        for production in &nt.productions {
                            self.first_of_production_into(production, &mut first);
                        }
                        first
                    }
                    _ => continue,
                };

                let nt = self.symbols[i].mut_non_terminal().unwrap();
                if nt.first.len() != first.len() {
                    changed = true;
                    nt.first = first;
                }
            }
        }
    }

    /// One left-to-right scan of a production, accumulating into `first`.
    /// Action tags are transparent; a terminal or the epsilon marker ends the
    /// scan; a nonterminal contributes its non-epsilon FIRST and ends the
    /// scan unless it is nullable. A scan that falls off the end contributes
    /// epsilon.
    fn first_of_production_into(&self, production: &[usize], first: &mut HashSet<usize>) {
        let epsilon = self.epsilon_index();
        let mut add_epsilon = true;
        for &idx in production {
            match &self.symbols[idx] {
                Symbol::ActionTag(_) => continue,
                Symbol::Epsilon => {
                    first.insert(epsilon);
                    break;
                }
                Symbol::Terminal(_) | Symbol::EndMarker => {
                    first.insert(idx);
                    add_epsilon = false;
                    break;
                }
                Symbol::NonTerminal(nt) => {
                    first.extend(nt.first.iter().filter(|&&f| f != epsilon));
                    if !nt.first.contains(&epsilon) {
                        add_epsilon = false;
                        break;
                    }
                }
            }
        }
        if add_epsilon {
            first.insert(epsilon);
        }
    }

    /// Total FIRST lookup for a single symbol: a terminal (or the end marker)
    /// yields itself, the epsilon marker and action tags yield epsilon, a
    /// nonterminal yields its computed set.
    pub fn first_of_symbol(&self, index: usize) -> HashSet<usize> {
        match &self.symbols[index] {
            Symbol::NonTerminal(nt) => nt.first.clone(),
            Symbol::Terminal(_) | Symbol::EndMarker => HashSet::from([index]),
            Symbol::Epsilon | Symbol::ActionTag(_) => HashSet::from([self.epsilon_index()]),
        }
    }
}
