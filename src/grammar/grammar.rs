use std::collections::{HashMap, HashSet};

use super::{END_MARK, EPSILON};

#[derive(Debug, Clone)]
pub struct NonTerminal {
    pub index: usize,
    pub name: String,
    pub first: HashSet<usize>,
    pub follow: HashSet<usize>,
    pub node_marker: bool,
    pub productions: Vec<Vec<usize>>,
}

impl NonTerminal {
    pub fn new(index: usize, name: String) -> Self {
        let node_marker = name.contains("node");
        Self {
            index,
            name,
            first: HashSet::new(),
            follow: HashSet::new(),
            node_marker,
            productions: Vec::new(),
        }
    }

    /// Node-tagged pseudo-symbols expand like nonterminals but hold no
    /// FOLLOW set.
    pub fn follow_tracked(&self) -> bool {
        !self.node_marker
    }
}

#[derive(Debug, Clone)]
pub enum Symbol {
    NonTerminal(NonTerminal),
    Terminal(String),
    ActionTag(String),
    Epsilon,
    EndMarker,
}

impl Symbol {
    pub fn non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            Symbol::NonTerminal(e) => Some(e),
            _ => None,
        }
    }

    pub fn mut_non_terminal(&mut self) -> Option<&mut NonTerminal> {
        match self {
            Symbol::NonTerminal(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_action(&self) -> bool {
        matches!(self, Symbol::ActionTag(_))
    }
}

/// Mirrors `str.islower`: at least one cased character, none of them
/// upper-case.
fn is_lower_name(name: &str) -> bool {
    name.chars().any(|c| c.is_lowercase()) && !name.chars().any(|c| c.is_uppercase())
}

#[derive(Debug, Clone)]
pub struct Grammar {
    pub symbols: Vec<Symbol>,
    pub symbol_table: HashMap<String, usize>,
    pub start_symbol: Option<usize>,
}

impl Grammar {
    pub fn new() -> Self {
        let mut g = Self {
            symbols: Vec::new(),
            symbol_table: HashMap::new(),
            start_symbol: None,
        };

        // markers are pre-registered so classification never sees them again
        g.symbols.push(Symbol::Epsilon);
        g.symbol_table.insert(EPSILON.to_string(), 0);
        g.symbols.push(Symbol::EndMarker);
        g.symbol_table.insert(END_MARK.to_string(), 1);

        g
    }

    pub fn epsilon_index(&self) -> usize {
        self.symbol_table[EPSILON]
    }

    pub fn end_index(&self) -> usize {
        self.symbol_table[END_MARK]
    }

    pub fn terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.symbols.iter().filter_map(|s| {
            if let Symbol::Terminal(name) = s {
                Some(name)
            } else {
                None
            }
        })
    }

    pub fn terminal_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.symbols
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_terminal())
            .map(|(i, _)| i)
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &NonTerminal> {
        self.symbols.iter().filter_map(|s| s.non_terminal())
    }

    pub fn non_terminal_iter_mut(&mut self) -> impl Iterator<Item = &mut NonTerminal> {
        self.symbols.iter_mut().filter_map(|s| s.mut_non_terminal())
    }

    pub fn get_symbol_index(&self, name: &str) -> Option<usize> {
        self.symbol_table.get(name).cloned()
    }

    pub fn add_non_terminal(&mut self, name: &str) -> usize {
        let idx = self.symbols.len();
        self.symbols
            .push(Symbol::NonTerminal(NonTerminal::new(idx, name.to_string())));
        self.symbol_table.insert(name.to_string(), idx);
        idx
    }

    pub fn add_terminal(&mut self, name: String) -> usize {
        let idx = self.symbols.len();
        self.symbols.push(Symbol::Terminal(name.clone()));
        self.symbol_table.insert(name, idx);
        idx
    }

    pub fn add_action_tag(&mut self, name: String) -> usize {
        let idx = self.symbols.len();
        self.symbols.push(Symbol::ActionTag(name.clone()));
        self.symbol_table.insert(name, idx);
        idx
    }

    /// Classify and register a right-hand-side symbol the first time it is
    /// seen; later sightings resolve through the symbol table. The "action"
    /// substring test runs before the lower-case test.
    pub fn intern_symbol(&mut self, name: &str) -> usize {
        if let Some(idx) = self.get_symbol_index(name) {
            idx
        } else if name.contains("action") {
            self.add_action_tag(name.to_string())
        } else if is_lower_name(name) {
            self.add_terminal(name.to_string())
        } else {
            self.add_non_terminal(name)
        }
    }

    pub fn add_production(&mut self, left: usize, right: Vec<usize>) {
        self.symbols[left]
            .mut_non_terminal()
            .unwrap()
            .productions
            .push(right);
    }

    pub fn get_symbol_name(&self, index: usize) -> &str {
        match &self.symbols[index] {
            Symbol::NonTerminal(e) => e.name.as_str(),
            Symbol::Terminal(e) => e.as_str(),
            Symbol::ActionTag(e) => e.as_str(),
            Symbol::Epsilon => EPSILON,
            Symbol::EndMarker => END_MARK,
        }
    }

    /// The terminal alphabet in first-seen order, end marker last.
    pub fn token_row(&self) -> Vec<&str> {
        self.terminal_iter()
            .map(|t| t.as_str())
            .chain(std::iter::once(END_MARK))
            .collect()
    }
}
