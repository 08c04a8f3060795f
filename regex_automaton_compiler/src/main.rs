use regex_automaton_compiler::{compile, Automaton};

use std::env;
use std::process;

const USAGE: &str = "usage: regex_automaton_compiler [--dfa] [--dot] [--quiet] <pattern> [input ...]

Compiles <pattern> (symbols, '|', '*', parentheses) to an NFA, or to a
DFA with --dfa, and tests each remaining argument against it. --dot
prints the automaton in Graphviz format. Set RUST_LOG=debug for a phase
trace.";

fn main() {
    env_logger::init();

    let mut determinize = false;
    let mut emit_dot = false;
    let mut quiet = false;
    let mut rest: Vec<String> = Vec::new();

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--dfa" => determinize = true,
            "--dot" => emit_dot = true,
            "--quiet" => quiet = true,
            "--help" | "-h" => {
                println!("{}", USAGE);
                return;
            }
            _ => rest.push(arg),
        }
    }

    let (pattern, inputs) = match rest.split_first() {
        Some((pattern, inputs)) => (pattern.clone(), inputs.to_vec()),
        None => {
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    let automaton = match compile(&pattern, determinize) {
        Ok(automaton) => automaton,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    if !quiet {
        print_summary(&pattern, &automaton);
    }

    if emit_dot {
        println!("{}", automaton.to_dot());
    }

    let mut all_accepted = true;
    for input in &inputs {
        let accepted = automaton.simulate(input);
        all_accepted &= accepted;
        println!("{:?}: {}", input, if accepted { "accept" } else { "reject" });
    }

    if !all_accepted {
        process::exit(1);
    }
}

fn print_summary(pattern: &str, automaton: &Automaton) {
    let stats = automaton.stats();
    let kind = match automaton {
        Automaton::Nfa(_) => "NFA",
        Automaton::Dfa(_) => "DFA",
    };

    println!(
        "compiled {:?} to a {} with {} states and {} transitions ({} ε)",
        pattern, kind, stats.states, stats.transitions, stats.epsilon_transitions
    );

    let alphabet: Vec<String> = automaton.alphabet().iter().map(|c| c.to_string()).collect();
    println!("alphabet: {{{}}}", alphabet.join(", "));
}
