use crowbook_text_processing::escape;
use serde::Serialize;

use super::{
    grammar::Symbol,
    table::{ParseTable, TableEntry},
    Grammar, EPSILON,
};

/// One symbol together with its FIRST or FOLLOW set, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolSetOutput<'a> {
    pub name: &'a str,
    pub set: Vec<&'a str>,
}

impl SymbolSetOutput<'_> {
    fn to_plaintext(&self, left_width: usize) -> String {
        format!(
            "{:>width$} | {}",
            self.name,
            self.set.join(", "),
            width = left_width
        )
    }

    fn to_latex(&self) -> String {
        let set = self
            .set
            .iter()
            .map(|s| escape::tex(*s))
            .collect::<Vec<_>>()
            .join(r"\ ")
            .replace(EPSILON, r"$\epsilon$");
        format!("{} & {}", escape::tex(self.name), set)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolSetOutputVec<'a> {
    pub data: Vec<SymbolSetOutput<'a>>,
}

impl SymbolSetOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_width = self.data.iter().map(|s| s.name.len()).max().unwrap_or(0);
        self.data
            .iter()
            .map(|s| s.to_plaintext(left_width))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self, set_title: &str) -> String {
        let content = self
            .data
            .iter()
            .map(|e| e.to_latex())
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{c|c}\n".to_string()
            + &format!("Symbol & {}\\\\\\hline\n", set_title)
            + &content
            + "\\\\\n\\end{tabular}"
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

/// The parsing table with every index resolved back to symbol names. An
/// empty cell renders as a single empty string, error directives as their
/// names.
#[derive(Debug, Clone, Serialize)]
pub struct ParseTableOutput<'a> {
    pub token_row: Vec<&'a str>,
    pub conflicts: usize,
    pub rows: Vec<ParseTableRowOutput<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseTableRowOutput<'a> {
    pub symbol: &'a str,
    pub entries: Vec<Vec<&'a str>>,
}

impl ParseTableOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        let mut header: Vec<String> = vec![String::new()];
        header.extend(self.token_row.iter().map(|t| t.to_string()));
        let mut output: Vec<Vec<String>> = vec![header];
        for row in &self.rows {
            let mut line: Vec<String> = vec![row.symbol.to_string()];
            line.extend(row.entries.iter().map(|entry| entry.join(" ")));
            output.push(line);
        }

        let mut width = vec![0; self.token_row.len() + 1];
        for j in 0..output[0].len() {
            width[j] = output.iter().map(|line| line[j].len()).max().unwrap();
        }
        output
            .iter()
            .map(|line| {
                line.iter()
                    .enumerate()
                    .map(|(i, s)| format!("{:>width$}", s, width = width[i]))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        let mut header: Vec<String> = vec![String::new()];
        header.extend(
            self.token_row
                .iter()
                .map(|t| format!("\\text{{{}}}", escape::tex(*t))),
        );
        let header = header.join(" & ");

        let content = self
            .rows
            .iter()
            .map(|row| {
                std::iter::once(escape::tex(row.symbol).to_string())
                    .chain(row.entries.iter().map(|entry| {
                        entry
                            .iter()
                            .map(|s| escape::tex(*s))
                            .collect::<Vec<_>>()
                            .join(" \\ ")
                            .replace(EPSILON, "\\epsilon")
                    }))
                    .collect::<Vec<_>>()
                    .join(" & ")
            })
            .collect::<Vec<_>>()
            .join("\\\\\n");

        format!(
            "\\[\\begin{{array}}{{c{}}}\n{}\\\\\\hline\n{}\n\\end{{array}}\\]",
            "|l".repeat(self.token_row.len()),
            header,
            content
        )
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

impl Grammar {
    /// FIRST rows for every terminal and nonterminal, in first-seen order.
    pub fn to_first_output(&self) -> SymbolSetOutputVec {
        let mut data = Vec::new();
        for (idx, symbol) in self.symbols.iter().enumerate() {
            let mut set: Vec<&str> = match symbol {
                Symbol::NonTerminal(nt) => {
                    nt.first.iter().map(|&f| self.get_symbol_name(f)).collect()
                }
                Symbol::Terminal(name) => vec![name.as_str()],
                _ => continue,
            };
            set.sort();
            data.push(SymbolSetOutput {
                name: self.get_symbol_name(idx),
                set,
            });
        }
        SymbolSetOutputVec { data }
    }

    /// FOLLOW rows for every tracked nonterminal, in first-seen order.
    pub fn to_follow_output(&self) -> SymbolSetOutputVec {
        let mut data = Vec::new();
        for nt in self.non_terminal_iter() {
            if !nt.follow_tracked() {
                continue;
            }
            let mut set: Vec<&str> = nt.follow.iter().map(|&f| self.get_symbol_name(f)).collect();
            set.sort();
            data.push(SymbolSetOutput {
                name: nt.name.as_str(),
                set,
            });
        }
        SymbolSetOutputVec { data }
    }

    pub fn to_table_output<'a>(&'a self, table: &'a ParseTable) -> ParseTableOutput<'a> {
        let rows = table
            .rows
            .iter()
            .zip(table.cells.iter())
            .map(|(&row_symbol, cells)| ParseTableRowOutput {
                symbol: self.get_symbol_name(row_symbol),
                entries: cells
                    .iter()
                    .map(|cell| match cell {
                        TableEntry::Empty => vec![""],
                        TableEntry::Production(p) => {
                            p.iter().map(|&s| self.get_symbol_name(s)).collect()
                        }
                        TableEntry::ErrorScan => vec!["ERROR_SCAN"],
                        TableEntry::ErrorPop => vec!["ERROR_POP"],
                    })
                    .collect(),
            })
            .collect();

        ParseTableOutput {
            token_row: self.token_row(),
            conflicts: table.conflicts,
            rows,
        }
    }
}
