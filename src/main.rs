pub mod grammar;
use std::{fs, io::BufRead};

pub use grammar::Grammar;

fn print_help() {
    println!("Usage: ll1-table-gen outputs [options] [grammar file]");
    println!("outputs:");
    println!("  first: FIRST set of every terminal and nonterminal");
    println!("  follow: FOLLOW set of every nonterminal");
    println!("  table: LL(1) predictive parsing table");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -e: Fill unreachable table cells with recovery directives");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
    println!("The grammar is read from the given file, or from stdin.");
}

fn main() {
    let mut outputs: Vec<&str> = Vec::new();
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let mut i: usize = 0;
    while i < args.len() && ["first", "follow", "table"].contains(&args[i].as_str()) {
        outputs.push(args[i].as_str());
        i += 1;
    }

    enum OutputFormat {
        Plain,
        LaTeX,
        JSON,
    }
    let mut output_format = OutputFormat::Plain;
    let mut with_errors = false;

    while i < args.len() && ["-h", "--help", "-e", "-l", "-j"].contains(&args[i].as_str()) {
        if args[i] == "-h" || args[i] == "--help" {
            print_help();
            return;
        } else if args[i] == "-e" {
            with_errors = true;
        } else if args[i] == "-l" {
            output_format = OutputFormat::LaTeX;
        } else if args[i] == "-j" {
            output_format = OutputFormat::JSON;
        }
        i += 1;
    }

    if i + 1 < args.len() || outputs.len() < 1 {
        print_help();
        return;
    }

    let input: String = if i == args.len() {
        std::io::stdin()
            .lock()
            .lines()
            .map(|l| l.unwrap())
            .collect::<Vec<String>>()
            .join("\n")
    } else {
        fs::read_to_string(args[i].as_str()).expect("Failed to read file")
    };

    let mut g = Grammar::parse(&input).unwrap();
    g.calculate_first();
    g.calculate_follow();

    for output in outputs {
        if output == "first" {
            let t = g.to_first_output();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex("First"),
                    OutputFormat::JSON => t.to_json(),
                }
            );
        }
        if output == "follow" {
            let t = g.to_follow_output();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex("Follow"),
                    OutputFormat::JSON => t.to_json(),
                }
            );
        }
        if output == "table" {
            let mut table = g.build_table();
            if with_errors {
                g.fill_errors(&mut table);
            }
            let t = g.to_table_output(&table);
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json(),
                }
            );
        }
    }
}
