use std::env;
use std::error::Error;

use lazy_static::lazy_static;

use fsa_toolkit::{generate, FiniteAutomaton, Transition};

lazy_static! {
    static ref VARIANT_DELTA: Vec<Transition> = vec![
        Transition::new("q0", "a", "q1"),
        Transition::new("q1", "b", "q1"),
        Transition::new("q1", "b", "q2"),
        Transition::new("q2", "a", "q2"),
        Transition::new("q2", "b", "q3"),
        Transition::new("q0", "b", "q0"),
    ];
}

const VARIANT_PATTERN: &str = "(S|T)(u|v)w*y+";
const VARIANT_SAMPLES: usize = 5;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let pattern = args.next().unwrap_or_else(|| VARIANT_PATTERN.to_string());
    let samples = match args.next() {
        Some(n) => n.parse()?,
        None => VARIANT_SAMPLES,
    };

    let automaton: FiniteAutomaton = FiniteAutomaton::new(
        ["q0", "q1", "q2", "q3"],
        ["a", "b"],
        VARIANT_DELTA.iter().cloned(),
        "q0",
        ["q3"],
    )?;

    if automaton.is_deterministic() {
        println!("The finite automaton is deterministic.");
    } else {
        println!("The finite automaton is non-deterministic.");
    }

    println!("Conversion to grammar:");
    print!("{}", automaton.to_regular_grammar());

    let dfa = automaton.to_deterministic_finite_automaton();
    if dfa.is_deterministic() {
        println!("The converted DFA is deterministic.");
    } else {
        println!("The converted DFA is non-deterministic.");
    }

    println!("States and transitions of the DFA:");
    for transition in dfa.transitions() {
        println!("{}", transition);
    }
    for state in dfa.final_states() {
        println!("{} -- final state", state);
    }

    println!("Strings generated from {}:", pattern);
    for _ in 0..samples {
        println!("{}", generate(&pattern)?);
    }

    Ok(())
}
