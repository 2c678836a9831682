//! Pagesim - demand-paging simulator
//!
//! Usage: pagesim [OPTIONS] <ALGORITHM> <CLOCK_FREQ>
//!
//! Reads a trace (a `<num_pages> <num_frames>` header followed by `<page> <r|w>` lines) from
//! standard input or `--trace`, replays it against the chosen replacement policy and prints
//! the total number of page faults.
mod cli;

use std::io::{self, BufRead, Write};
use std::process;

use env_logger::Env;
use log::error;
use pagesim_error::errinput;
use pagesim_error::Error;
use pagesim_vmm::{PolicyKind, SimConfig, SimReport, Simulator, TraceReader};

use crate::cli::Args;

type Result<T> = std::result::Result<T, Error>;

fn main() {
    let args = Args::from_matches(&cli::command().get_matches());
    init_logging(args.verbose);

    let report = match run(&args) {
        Ok(report) => report,
        Err(e) => fail(&e),
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", report.faults) {
        fail(&e.into());
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();
}

fn fail(e: &Error) -> ! {
    error!("{}", e);
    process::exit(1);
}

/// Resolves the policy, opens the trace and runs the simulation. Command-line arguments are
/// validated before the trace is opened, so a bad invocation never waits on standard input.
fn run(args: &Args) -> Result<SimReport> {
    let policy: PolicyKind = args.algorithm.parse()?;
    if args.clock_frequency == 0 {
        return errinput!("clock frequency must be at least 1");
    }
    match &args.trace {
        Some(path) => simulate(TraceReader::from_path(path)?, policy, args),
        None => simulate(TraceReader::new(io::stdin().lock())?, policy, args),
    }
}

fn simulate<R: BufRead>(
    trace: TraceReader<R>,
    policy: PolicyKind,
    args: &Args,
) -> Result<SimReport> {
    let header = trace.header();
    let config = SimConfig::new(
        policy,
        args.clock_frequency,
        header.num_pages,
        header.num_frames,
    )?
    .with_seed(args.seed);

    let mut simulator = Simulator::new(config);
    simulator.run(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::path::PathBuf;

    fn args(algorithm: &str, clock_frequency: usize) -> Args {
        Args {
            algorithm: algorithm.to_string(),
            clock_frequency,
            trace: None,
            seed: Some(3),
            verbose: false,
        }
    }

    fn simulate_str(algorithm: &str, clock_frequency: usize, input: &str) -> Result<SimReport> {
        let args = args(algorithm, clock_frequency);
        let policy = args.algorithm.parse()?;
        simulate(TraceReader::new(input.as_bytes())?, policy, &args)
    }

    #[test]
    fn test_fifo_trace() {
        let report = simulate_str("fifo", 100, "3 2\n0 r\n1 r\n2 r\n0 r\n").unwrap();
        assert_eq!(4, report.faults);
        assert_eq!(4, report.accesses);
    }

    #[test]
    fn test_policies_on_same_trace() {
        let input = "4 3\n0 r\n1 r\n2 r\n3 r\n1 r\n0 r\n1 r\n";
        assert_eq!(6, simulate_str("fifo", 1000, input).unwrap().faults);
        assert_eq!(5, simulate_str("second_chance", 1000, input).unwrap().faults);
    }

    #[test]
    fn test_malformed_tail_is_ignored() {
        let report = simulate_str("nru", 2, "4 2\n0 w\n1 r\nend\n2 r\n").unwrap();
        assert_eq!(2, report.accesses);
        assert_eq!(2, report.faults);
    }

    #[test]
    fn test_configuration_errors() {
        assert_eq!(
            Err(Error::UnknownPolicy("lru".to_string())),
            simulate_str("lru", 10, "4 2\n0 r\n")
        );
        assert!(matches!(
            simulate_str("fifo", 0, "4 2\n0 r\n"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            simulate_str("fifo", 10, "4 0\n0 r\n"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            simulate_str("fifo", 10, "four two\n"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_out_of_range_access_is_fatal() {
        assert_eq!(
            Err(Error::PageOutOfRange {
                page: 4,
                num_pages: 4
            }),
            simulate_str("aging", 10, "4 2\n0 r\n4 r\n1 r\n")
        );
        assert_eq!(
            Err(Error::PageOutOfRange {
                page: -2,
                num_pages: 4
            }),
            simulate_str("aging", 10, "4 2\n-2 r\n")
        );
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let mut input = String::from("16 4\n");
        for i in 0..300 {
            let access = if i % 5 == 0 { 'w' } else { 'r' };
            input.push_str(&format!("{} {}\n", (i * 7 + i / 3) % 16, access));
        }
        let first = simulate_str("random", 8, &input).unwrap();
        let second = simulate_str("random", 8, &input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    #[serial]
    fn test_run_from_trace_file() {
        let path: PathBuf = std::env::temp_dir().join("pagesim_cli_trace.txt");
        std::fs::write(&path, "3 2\n0 r\n1 w\n0 r\n2 r\n1 r\n").unwrap();

        let mut args = args("fifo", 100);
        args.trace = Some(path.clone());
        let report = run(&args).unwrap();
        // Page 0 is displaced by page 2; page 1 stays resident for its second access.
        assert_eq!(3, report.faults);
        assert_eq!(2, report.hits);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(run(&args), Err(Error::IO(_))));
    }

    #[test]
    fn test_arguments_checked_before_trace_is_opened() {
        let mut args = args("fifo", 0);
        args.trace = Some(std::env::temp_dir().join("pagesim_cli_trace_never_created.txt"));
        assert!(matches!(run(&args), Err(Error::InvalidInput(_))));

        args.algorithm = "lru".to_string();
        args.clock_frequency = 10;
        assert_eq!(Err(Error::UnknownPolicy("lru".to_string())), run(&args));
    }
}
