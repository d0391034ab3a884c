mod config;

use clap::{App, Arg};
use config::Config;
use satnet::oracle::TreeSizeOracle;
use satnet::solvers::{Interrupt, InterruptibleSolver};
use satnet::tree::formula_to_tree;
use satnet::{
    BranchingStrategy, Combination, EmbeddingGuided, FirstVariable, Formula, HeuristicKind,
    MostCommonLiteral, RandomClauseLiteral, RandomVariable, SATSolution, SatisfactionSolver,
};
use std::error::Error;
use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::PathBuf;
use std::process::exit;
use std::time::Duration;

fn make_config() -> Result<Config, Box<dyn Error>> {
    let matches = App::new("satnet")
        .version("0.1")
        .author("Alex&Korbi&Radek inc.")
        .about("DPLL search with pluggable branching heuristics")
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .help("Input file in DIMACS format"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("File name for output in DIMACS format"),
        )
        .arg(
            Arg::with_name("heuristic")
                .long("heuristic")
                .value_name("HEURISTIC")
                .help("Branching heuristic")
                .takes_value(true)
                .possible_values(&HeuristicKind::NAMES)
                .default_value("first"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .takes_value(true)
                .help("Seed for the random heuristics"),
        )
        .arg(
            Arg::with_name("combination")
                .long("combination")
                .help("How operands are folded into syntax trees")
                .takes_value(true)
                .possible_values(&["sequential", "balanced"])
                .default_value("sequential"),
        )
        .arg(
            Arg::with_name("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .takes_value(true)
                .help("Give up after this many seconds"),
        )
        .arg(
            Arg::with_name("max_runs")
                .long("max-runs")
                .value_name("N")
                .takes_value(true)
                .help("Give up after this many recursive calls"),
        )
        .arg(
            Arg::with_name("tree")
                .long("tree")
                .takes_value(false)
                .help("Print the syntax tree of the formula instead of solving it"),
        )
        .arg(
            Arg::with_name("return_code")
                .long("return-code")
                .short("r")
                .help("Will return 1 if satisfiable and 0 if not (useful for scripting)")
                .takes_value(false),
        )
        .get_matches();

    let seed = matches.value_of("seed").map(str::parse::<u64>).transpose()?;
    let combination: Combination = matches.value_of("combination").unwrap_or("sequential").parse()?;
    let heuristic: HeuristicKind = matches.value_of("heuristic").unwrap_or("first").parse()?;

    let branching: Box<dyn BranchingStrategy> = match heuristic {
        HeuristicKind::FirstVariable => Box::new(FirstVariable),
        HeuristicKind::RandomVariable => match seed {
            Some(seed) => Box::new(RandomVariable::seeded(seed)),
            None => Box::new(RandomVariable::new()),
        },
        HeuristicKind::RandomClauseLiteral => match seed {
            Some(seed) => Box::new(RandomClauseLiteral::seeded(seed)),
            None => Box::new(RandomClauseLiteral::new()),
        },
        HeuristicKind::MostCommonLiteral => Box::new(MostCommonLiteral),
        HeuristicKind::EmbeddingGuided => Box::new(EmbeddingGuided::with_combination(TreeSizeOracle, combination)),
    };

    Ok(Config {
        input: matches.value_of("input").map(PathBuf::from),
        output: matches.value_of("output").map(PathBuf::from),
        return_code: matches.is_present("return_code"),
        tree: matches.is_present("tree"),
        combination,
        timeout: matches.value_of("timeout").map(parse_timeout).transpose()?,
        max_runs: matches.value_of("max_runs").map(str::parse::<usize>).transpose()?,
        branching,
    })
}

/// Seconds as a non-negative, finite decimal number
fn parse_timeout(seconds: &str) -> Result<Duration, Box<dyn Error>> {
    Ok(Duration::try_from_secs_f64(seconds.parse::<f64>()?)?)
}

fn get_input(handle: &mut impl Read) -> io::Result<String> {
    let mut buffer = String::new();
    handle.read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let config = make_config()?;

    let input = match &config.input {
        None => {
            eprintln!("No input file specified. Reading from standard input...");
            get_input(&mut io::stdin())
        }
        Some(file) => get_input(&mut File::open(file)?),
    }?;

    let formula = Formula::from_dimacs(&input)?;
    log::info!("Read formula with {} variables and {} clauses", formula.num_vars(), formula.len());

    if config.tree {
        println!("{}", formula_to_tree(formula.clauses(), config.combination)?);
        return Ok(());
    }

    let mut interrupt = Interrupt::never();
    if let Some(timeout) = config.timeout {
        interrupt = interrupt.with_timeout(timeout);
    }
    if let Some(max_runs) = config.max_runs {
        interrupt = interrupt.with_max_runs(max_runs);
    }

    let mut solver = SatisfactionSolver::new(config.branching);
    let solution = solver.solve_interruptible(&formula, &interrupt)?;
    log::info!("Finished after {} runs", solver.runs());

    match config.output {
        Some(path) => std::fs::write(path, solution.to_dimacs())?,
        None => println!("{}", solution.to_dimacs()),
    }

    if config.return_code {
        if let SATSolution::Satisfiable(_) = solution {
            exit(1)
        }
    } else if let SATSolution::Unknown = solution {
        exit(2)
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_seconds() {
        assert_eq!(parse_timeout("1.5").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_timeout("0").unwrap(), Duration::from_secs(0));
    }

    #[test]
    fn timeout_rejects_negative_and_non_finite() {
        for input in &["-1", "NaN", "inf", "soon"] {
            assert!(parse_timeout(input).is_err(), "{}", input);
        }
    }
}
