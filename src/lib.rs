extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

mod grammar;
pub use grammar::table::{ParseTable, TableEntry};
pub use grammar::Grammar;

#[wasm_bindgen]
pub fn first_set_to_json(grammar: &str) -> String {
    match Grammar::parse(grammar) {
        Ok(mut g) => {
            g.calculate_first();
            g.to_first_output().to_json()
        }
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}

#[wasm_bindgen]
pub fn follow_set_to_json(grammar: &str) -> String {
    match Grammar::parse(grammar) {
        Ok(mut g) => {
            g.calculate_first();
            g.calculate_follow();
            g.to_follow_output().to_json()
        }
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}

#[wasm_bindgen]
pub fn parsing_table_to_json(grammar: &str, with_errors: bool) -> String {
    match Grammar::parse(grammar) {
        Ok(mut g) => {
            g.calculate_first();
            g.calculate_follow();
            let mut table = g.build_table();
            if with_errors {
                g.fill_errors(&mut table);
            }
            g.to_table_output(&table).to_json()
        }
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}

#[cfg(test)]
fn set_names(g: &Grammar, set: &std::collections::HashSet<usize>) -> Vec<String> {
    let mut names: Vec<String> = set.iter().map(|&i| g.get_symbol_name(i).to_string()).collect();
    names.sort();
    names
}

#[cfg(test)]
mod parse_tests {
    use crate::grammar::{grammar::Symbol, END_MARK, EPSILON};

    #[test]
    fn simple_parse() {
        let g = crate::Grammar::parse("INIT -> A b\nA -> a").unwrap();

        let init = g.get_symbol_index("INIT").unwrap();
        let a_nt = g.get_symbol_index("A").unwrap();
        let b = g.get_symbol_index("b").unwrap();
        let a = g.get_symbol_index("a").unwrap();

        assert!(matches!(g.symbols[init], Symbol::NonTerminal(_)));
        assert!(g.symbols[b].is_terminal());
        assert!(g.symbols[a].is_terminal());
        assert_eq!(g.start_symbol, Some(init));

        assert_eq!(
            g.symbols[init].non_terminal().unwrap().productions[0],
            vec![a_nt, b]
        );
        assert_eq!(g.symbols[a_nt].non_terminal().unwrap().productions[0], vec![a]);
    }

    #[test]
    fn markers_are_preregistered() {
        let g = crate::Grammar::parse("INIT -> a END\nA -> EPSILON").unwrap();

        assert_eq!(g.get_symbol_index(EPSILON), Some(g.epsilon_index()));
        assert_eq!(g.get_symbol_index(END_MARK), Some(g.end_index()));
        assert!(matches!(g.symbols[g.epsilon_index()], Symbol::Epsilon));
        assert!(matches!(g.symbols[g.end_index()], Symbol::EndMarker));

        let a_nt = g.get_symbol_index("A").unwrap();
        assert_eq!(
            g.symbols[a_nt].non_terminal().unwrap().productions[0],
            vec![g.epsilon_index()]
        );
    }

    #[test]
    fn action_tags_and_node_markers() {
        let g = crate::Grammar::parse("INIT -> action_1 A Expr_node a").unwrap();

        let action = g.get_symbol_index("action_1").unwrap();
        assert!(g.symbols[action].is_action());

        let node = g.get_symbol_index("Expr_node").unwrap();
        let node_nt = g.symbols[node].non_terminal().unwrap();
        assert!(!node_nt.follow_tracked());

        let a_nt = g.get_symbol_index("A").unwrap();
        assert!(g.symbols[a_nt].non_terminal().unwrap().follow_tracked());
    }

    #[test]
    fn terminals_registered_in_seen_order() {
        let g = crate::Grammar::parse("INIT -> b A\nA -> a c").unwrap();
        assert_eq!(g.token_row(), vec!["b", "a", "c", "END"]);
    }

    #[test]
    fn blank_lines_skipped() {
        let g = crate::Grammar::parse("\nINIT -> a\n   \n").unwrap();
        assert_eq!(g.non_terminal_iter().count(), 1);
    }

    #[test]
    fn missing_start_symbol_is_allowed() {
        let g = crate::Grammar::parse("S -> a").unwrap();
        assert_eq!(g.start_symbol, None);
    }

    #[test]
    #[should_panic]
    fn short_line_parse() {
        let _g = crate::Grammar::parse("INIT -> a\nA").unwrap();
    }

    #[test]
    #[should_panic]
    fn terminal_left_side_parse() {
        let _g = crate::Grammar::parse("INIT -> a\na -> b").unwrap();
    }
}


#[cfg(test)]
mod follow_tests {
    use crate::grammar::END_MARK;
    use crate::set_names;

    fn analyzed(input: &str) -> crate::Grammar {
        let mut g = crate::Grammar::parse(input).unwrap();
        g.calculate_first();
        g.calculate_follow();
        g
    }

    fn follow_names(g: &crate::Grammar, name: &str) -> Vec<String> {
        let idx = g.get_symbol_index(name).unwrap();
        set_names(g, &g.symbols[idx].non_terminal().unwrap().follow)
    }

    #[test]
    fn start_symbol_follow_contains_end() {
        let g = analyzed("INIT -> A b\nA -> a\nA -> EPSILON");
        assert_eq!(follow_names(&g, "INIT"), vec![END_MARK.to_string()]);
        assert_eq!(follow_names(&g, "A"), vec!["b".to_string()]);
    }

    #[test]
    fn trailing_nonterminal_inherits_lhs_follow() {
        let g = analyzed("INIT -> a A\nA -> b");
        assert_eq!(follow_names(&g, "A"), vec![END_MARK.to_string()]);
    }

    #[test]
    fn nullable_next_element_adds_lhs_follow() {
        let g = analyzed("INIT -> A B\nA -> a\nB -> b\nB -> EPSILON");
        assert_eq!(
            follow_names(&g, "A"),
            vec![END_MARK.to_string(), "b".to_string()]
        );
    }

    #[test]
    fn action_tags_after_occurrence_are_skipped() {
        let g = analyzed("INIT -> A action_1 b\nA -> a");
        assert_eq!(follow_names(&g, "A"), vec!["b".to_string()]);
    }

    #[test]
    fn only_action_tags_to_the_end_inherits_lhs_follow() {
        let g = analyzed("INIT -> A action_1 action_2\nA -> a");
        assert_eq!(follow_names(&g, "A"), vec![END_MARK.to_string()]);
    }

    #[test]
    fn every_occurrence_is_processed() {
        let g = analyzed("INIT -> A b A c\nA -> a");
        assert_eq!(
            follow_names(&g, "A"),
            vec!["b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn node_marked_symbols_hold_no_follow() {
        let g = analyzed("INIT -> Expr_node b\nExpr_node -> a");
        let output = g.to_follow_output();
        assert!(output.data.iter().all(|row| row.name != "Expr_node"));
        assert!(output.data.iter().any(|row| row.name == "INIT"));
    }
}


#[cfg(test)]
mod output_tests {
    use crate::grammar::EPSILON;

    #[test]
    fn first_output_rows_cover_terminals_and_nonterminals() {
        let mut g = crate::Grammar::parse("INIT -> A b\nA -> a\nA -> EPSILON").unwrap();
        g.calculate_first();

        let output = g.to_first_output();
        let names: Vec<&str> = output.data.iter().map(|row| row.name).collect();
        assert_eq!(names, vec!["INIT", "A", "b", "a"]);

        let a_row = output.data.iter().find(|row| row.name == "A").unwrap();
        assert_eq!(a_row.set, vec![EPSILON, "a"]);
        let b_row = output.data.iter().find(|row| row.name == "b").unwrap();
        assert_eq!(b_row.set, vec!["b"]);
    }

    #[test]
    fn table_json_round_trips_through_serde() {
        let json = crate::parsing_table_to_json("INIT -> A b\nA -> a\nA -> EPSILON", true);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["token_row"][0], "b");
        assert_eq!(value["conflicts"], 0);
        let rows = value["rows"].as_array().unwrap();
        assert!(rows.iter().any(|row| row["symbol"] == "INIT"));
    }

    #[test]
    fn parse_error_surfaces_as_json_error() {
        let json = crate::first_set_to_json("INIT");
        assert!(json.starts_with("{\"error\":"));
    }

    #[test]
    fn plaintext_table_has_header_and_rows() {
        let mut g = crate::Grammar::parse("INIT -> a").unwrap();
        g.calculate_first();
        g.calculate_follow();
        let table = g.build_table();
        let text = g.to_table_output(&table).to_plaintext();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3); // header, INIT, a
        assert!(lines[0].contains("END"));
        assert!(lines[1].contains("INIT"));
    }
}
