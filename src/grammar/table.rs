use std::collections::HashMap;

use super::{grammar::Symbol, Grammar};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEntry {
    Empty,
    /// Right-hand side to push, as symbol indices. Terminal rows hold the
    /// one-symbol match production on their diagonal; nullable rows hold a
    /// one-symbol epsilon production in otherwise untaken cells.
    Production(Vec<usize>),
    /// Discard input tokens until the row's terminal shows up.
    ErrorScan,
    /// Discard the nonterminal from the parse stack and continue.
    ErrorPop,
}

/// The predictive parsing table: one row per terminal and nonterminal, one
/// column per terminal plus the end marker. `conflicts` counts cells where a
/// later production overwrote a different earlier one (last-write-wins is
/// the resolution policy, not an error).
#[derive(Debug, Clone)]
pub struct ParseTable {
    pub rows: Vec<usize>,
    pub columns: Vec<usize>,
    pub cells: Vec<Vec<TableEntry>>,
    pub conflicts: usize,
}

impl ParseTable {
    pub fn get(&self, row_symbol: usize, column_symbol: usize) -> Option<&TableEntry> {
        let r = self.rows.iter().position(|&s| s == row_symbol)?;
        let c = self.columns.iter().position(|&s| s == column_symbol)?;
        Some(&self.cells[r][c])
    }
}

fn write_cell(cell: &mut TableEntry, production: &Vec<usize>, conflicts: &mut usize) {
    if let TableEntry::Production(existing) = cell {
        if existing != production {
            *conflicts += 1;
        }
    }
    *cell = TableEntry::Production(production.clone());
}

impl Grammar {
    /// Build the LL(1) table from the computed FIRST and FOLLOW sets.
    pub fn build_table(&self) -> ParseTable {
        let epsilon = self.epsilon_index();
        let end = self.end_index();

        let columns: Vec<usize> = self
            .terminal_indices()
            .chain(std::iter::once(end))
            .collect();
        let column_of: HashMap<usize, usize> = columns
            .iter()
            .enumerate()
            .map(|(c, &s)| (s, c))
            .collect();
        let rows: Vec<usize> = self
            .symbols
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Symbol::Terminal(_) | Symbol::NonTerminal(_)))
            .map(|(i, _)| i)
            .collect();

        let mut cells = vec![vec![TableEntry::Empty; columns.len()]; rows.len()];
        let mut conflicts = 0;

        for (r, &row_symbol) in rows.iter().enumerate() {
            match &self.symbols[row_symbol] {
                Symbol::Terminal(_) => {
                    // diagonal self-match; the rest of the row stays empty
                    cells[r][column_of[&row_symbol]] = TableEntry::Production(vec![row_symbol]);
                }
                Symbol::NonTerminal(nt) => {
                    for production in &nt.productions {
                        let mut nullable = true;
                        for &s in production {
                            match &self.symbols[s] {
                                Symbol::ActionTag(_) => continue,
                                Symbol::Epsilon => break,
                                Symbol::Terminal(_) | Symbol::EndMarker => {
                                    write_cell(
                                        &mut cells[r][column_of[&s]],
                                        production,
                                        &mut conflicts,
                                    );
                                    nullable = false;
                                    break;
                                }
                                Symbol::NonTerminal(y) => {
                                    for &f in y.first.iter().filter(|&&f| f != epsilon) {
                                        write_cell(
                                            &mut cells[r][column_of[&f]],
                                            production,
                                            &mut conflicts,
                                        );
                                    }
                                    if !y.first.contains(&epsilon) {
                                        nullable = false;
                                        break;
                                    }
                                }
                            }
                        }
                        if nullable {
                            for f in &nt.follow {
                                write_cell(&mut cells[r][column_of[f]], production, &mut conflicts);
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        // epsilon fill: an untaken cell in a nullable row derives nothing
        // rather than staying absent
        let epsilon_production = vec![epsilon];
        for (r, &row_symbol) in rows.iter().enumerate() {
            let nullable_row = self.symbols[row_symbol]
                .non_terminal()
                .map_or(false, |nt| nt.first.contains(&epsilon));
            if !nullable_row {
                continue;
            }
            for cell in &mut cells[r] {
                if *cell == TableEntry::Empty {
                    *cell = TableEntry::Production(epsilon_production.clone());
                }
            }
        }

        ParseTable {
            rows,
            columns,
            cells,
            conflicts,
        }
    }

    /// Label every cell still empty after table construction with a
    /// panic-mode recovery directive.
    pub fn fill_errors(&self, table: &mut ParseTable) {
        for (r, &row_symbol) in table.rows.iter().enumerate() {
            let directive = if self.symbols[row_symbol].is_terminal() {
                TableEntry::ErrorScan
            } else {
                TableEntry::ErrorPop
            };
            for cell in &mut table.cells[r] {
                if *cell == TableEntry::Empty {
                    *cell = directive.clone();
                }
            }
        }
    }
}
