use std::path::PathBuf;

use polysat::{
    all_relevant_relations, classify_all, siggers_operation, Encoder, Encoding,
    PolymorphismChecker, Relation, Satisfiability,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Where `minizinc` models are written, one file per relation
const MINIZINC_OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Varisat,
    #[cfg(feature = "cadical")]
    Cadical,
    MiniZinc,
}

#[derive(Debug)]
struct Config {
    arity: usize,
    domain_size: usize,
    encoding: Encoding,
    backend: Backend,
}

impl Config {
    fn from_args(args: &[String]) -> Result<Config, String> {
        if args.len() < 3 || args.len() > 5 {
            return Err("wrong number of arguments".to_string());
        }
        let arity = parse_size("arity", &args[1])?;
        let domain_size = parse_size("domain size", &args[2])?;
        let encoding = match args.get(3) {
            Some(name) => name.parse::<Encoding>().map_err(|e| e.to_string())?,
            None => Encoding::Direct,
        };
        let backend = match args.get(4).map(String::as_str) {
            None | Some("varisat") => Backend::Varisat,
            #[cfg(feature = "cadical")]
            Some("cadical") => Backend::Cadical,
            #[cfg(not(feature = "cadical"))]
            Some("cadical") => return Err("built without the `cadical` feature".to_string()),
            Some("minizinc") => Backend::MiniZinc,
            Some(other) => return Err(format!("unknown solver '{}'", other)),
        };
        Ok(Config {
            arity,
            domain_size,
            encoding,
            backend,
        })
    }
}

fn parse_size(what: &str, arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n >= 2 => Ok(n),
        Ok(n) => Err(format!("{} must be at least 2, got {}", what, n)),
        Err(e) => Err(format!("invalid {} '{}': {}", what, arg, e)),
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <arity> <domain_size> [encoding] [solver]", program);
    eprintln!();
    eprintln!("Checks every relation of the given arity and domain size (built from");
    eprintln!("non-constant tuples) for a Siggers polymorphism.");
    eprintln!();
    eprintln!("Encodings:");
    for encoding in Encoding::ALL {
        eprintln!("  {}", encoding);
    }
    eprintln!();
    eprintln!("Solvers:");
    eprintln!("  varisat   Built-in SAT solver, relations checked in parallel (default)");
    eprintln!("  cadical   CaDiCaL (requires the `cadical` feature)");
    eprintln!("  minizinc  Export to {}/ and run `minizinc --solver Gecode`", MINIZINC_OUTPUT_DIR);
    eprintln!();
    eprintln!("Example:");
    eprintln!("  {} 2 3 support", program);
}

fn classify(config: &Config, relations: &[Relation]) -> polysat::Result<Vec<Satisfiability>> {
    let checker = PolymorphismChecker::new(siggers_operation(), config.encoding);
    match config.backend {
        Backend::Varisat => classify_all(&checker, relations),
        #[cfg(feature = "cadical")]
        Backend::Cadical => relations
            .iter()
            .map(|r| checker.check_with(r, &mut polysat::CaDiCaLSolver::new()))
            .collect(),
        Backend::MiniZinc => relations
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let path = PathBuf::from(MINIZINC_OUTPUT_DIR).join(format!("relation_{}.mzn", i));
                checker.check_minizinc(r, &path)
            })
            .collect(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("polysat");

    let config = match Config::from_args(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage(program);
            std::process::exit(1);
        }
    };

    let relations = match all_relevant_relations(config.arity, config.domain_size) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error generating relations: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        relations = relations.len(),
        encoding = config.encoding.name(),
        backend = ?config.backend,
        "starting"
    );

    let results = match classify(&config, &relations) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    for (relation, result) in relations.iter().zip(&results) {
        match result {
            Satisfiability::Satisfiable => println!("P\t| {}", relation),
            Satisfiability::Unsatisfiable => println!("NP-hard\t| {}", relation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_args(&args(&["polysat", "2", "3"])).unwrap();
        assert_eq!(config.arity, 2);
        assert_eq!(config.domain_size, 3);
        assert_eq!(config.encoding, Encoding::Direct);
        assert_eq!(config.backend, Backend::Varisat);
    }

    #[test]
    fn test_config_encoding_and_solver() {
        let config =
            Config::from_args(&args(&["polysat", "3", "2", "label-cover", "minizinc"])).unwrap();
        assert_eq!(config.encoding, Encoding::LabelCover);
        assert_eq!(config.backend, Backend::MiniZinc);
    }

    #[test]
    fn test_config_rejects_bad_input() {
        assert!(Config::from_args(&args(&["polysat", "2"])).is_err());
        assert!(Config::from_args(&args(&["polysat", "1", "3"])).is_err());
        assert!(Config::from_args(&args(&["polysat", "2", "x"])).is_err());
        assert!(Config::from_args(&args(&["polysat", "2", "3", "order"])).is_err());
        assert!(Config::from_args(&args(&["polysat", "2", "3", "direct", "kissat"])).is_err());
    }
}
