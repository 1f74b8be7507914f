use crate::Grammar;

use super::START_SYMBOL;

impl Grammar {
    /// Load a grammar from flat rule text, one production per line:
    /// `LHS -> sym sym ...`. The second token is the arrow and is not
    /// interpreted; a rule with an empty right-hand side derives epsilon.
    pub fn parse(grammar: &str) -> Result<Self, String> {
        let mut g = Self::new();

        for (i, line) in grammar.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 2 {
                return Err(format!(
                    "Line {}: expected \"LHS -> symbols...\", got {:?}",
                    i + 1,
                    line.trim()
                ));
            }

            let left = match g.get_symbol_index(tokens[0]) {
                Some(idx) => idx,
                None => g.add_non_terminal(tokens[0]),
            };
            if g.symbols[left].non_terminal().is_none() {
                return Err(format!(
                    "Line {}: left side {:?} is not a nonterminal",
                    i + 1,
                    tokens[0]
                ));
            }

            let right: Vec<usize> = tokens[2..].iter().map(|s| g.intern_symbol(s)).collect();
            g.add_production(left, right);
        }

        g.start_symbol = g.get_symbol_index(START_SYMBOL);

        Ok(g)
    }
}
