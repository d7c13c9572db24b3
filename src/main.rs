#![warn(clippy::all)]

use anyhow::{anyhow, bail, Context, Result};
use sparse_life::{utils::life106, EngineKind, Life, NiceInt};
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: sparse_life [OPTIONS]

Reads a Life 1.06 pattern, advances it and prints the result in Life 1.06.

Options:
  -f, --file FILE       input file (.life or .lif); stdin if omitted
  -n, --iterations N    number of generations, N >= 0 (default: 10)
      --engine NAME     hashtable, sorted or hashlife (default: hashtable)
      --sorted          print cells sorted by (x, y)
      --stats           print counts and timings to stderr
  -h, --help            print this help";

#[derive(Debug, PartialEq)]
struct Args {
    file: Option<PathBuf>,
    iterations: u64,
    engine: EngineKind,
    sorted: bool,
    stats: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            file: None,
            iterations: 10,
            engine: EngineKind::default(),
            sorted: false,
            stats: false,
        }
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(Args),
    Help,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command> {
    let mut result = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| anyhow!("{flag} requires a value"));
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-f" | "--file" => {
                let path = PathBuf::from(value(&arg)?);
                if !life106::has_valid_life_extension(&path) {
                    bail!("input file must have a .life or .lif extension: {}", path.display());
                }
                result.file = Some(path);
            }
            "-n" | "--iterations" => {
                let v = value(&arg)?;
                let n: i128 = v
                    .parse()
                    .with_context(|| format!("{arg} requires an integer, got '{v}'"))?;
                if n < 0 {
                    bail!("number of iterations must be non-negative, got {n}");
                }
                result.iterations = u64::try_from(n).with_context(|| format!("{arg} is too large: {n}"))?;
            }
            "--engine" => result.engine = value(&arg)?.parse()?,
            "--sorted" => result.sorted = true,
            "--stats" => result.stats = true,
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(Command::Run(result))
}

fn millis(d: Duration) -> String {
    format!("{:.3} ms", d.as_secs_f64() * 1e3)
}

fn run(args: Args) -> Result<()> {
    let start = Instant::now();
    let mut life = match &args.file {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("cannot open input file {}", path.display()))?;
            Life::from_reader(BufReader::new(file), args.engine)
        }
        None => Life::from_reader(io::stdin().lock(), args.engine),
    }
    .context("failed to read the pattern")?;
    let parsed = Instant::now();
    let initial = life.count();

    life.run(args.iterations);
    let simulated = Instant::now();

    life.write(&mut io::stdout().lock(), args.sorted)
        .context("failed to write the result")?;
    let written = Instant::now();

    if args.stats {
        let fin = life.count();
        let change = fin as i128 - initial as i128;
        eprintln!("Engine: {}", life.engine_kind());
        eprintln!("Generations: {}", NiceInt::from(args.iterations));
        eprintln!("Input cells: {}", NiceInt::from_usize(initial));
        eprintln!("Output cells: {}", NiceInt::from_usize(fin));
        eprintln!("Change: {}{}", if change > 0 { "+" } else { "" }, NiceInt::from(change));
        eprintln!("Parse: {}", millis(parsed - start));
        eprintln!("Simulate: {}", millis(simulated - parsed));
        eprintln!("Write: {}", millis(written - simulated));
        eprintln!("Total: {}", millis(written - start));
        let engine_stats = life.engine_statistics();
        if !engine_stats.is_empty() {
            eprint!("{engine_stats}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let result = parse_args(std::env::args().skip(1)).and_then(|command| match command {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Run(args) => run(args),
    });
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(Args::default()));
    }

    #[test]
    fn test_all_flags() {
        let cmd = parse(&["-f", "p.lif", "--iterations", "0", "--engine", "HashLife", "--sorted", "--stats"]).unwrap();
        assert_eq!(
            cmd,
            Command::Run(Args {
                file: Some(PathBuf::from("p.lif")),
                iterations: 0,
                engine: EngineKind::HashLife,
                sorted: true,
                stats: true,
            })
        );
        assert_eq!(parse(&["--sorted", "-h", "--bogus"]).unwrap(), Command::Help);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse(&["-n", "-1"]).unwrap_err().to_string().contains("non-negative"));
        assert!(parse(&["-n", "ten"]).is_err());
        assert!(parse(&["-n"]).unwrap_err().to_string().contains("requires a value"));
        assert!(parse(&["--engine", "quick"]).unwrap_err().to_string().contains("unknown engine"));
        assert!(parse(&["--file", "pattern.rle"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
    }
}
