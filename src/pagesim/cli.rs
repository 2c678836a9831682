use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use pagesim_vmm::POLICIES;

/// Command-line options of the `pagesim` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Args {
    pub(crate) algorithm: String,
    pub(crate) clock_frequency: usize,
    pub(crate) trace: Option<PathBuf>,
    pub(crate) seed: Option<u64>,
    pub(crate) verbose: bool,
}

pub(crate) fn command() -> Command {
    let algorithms = POLICIES
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ");

    Command::new("pagesim")
        .about("Replays a page access trace and prints the number of page faults")
        .after_help(
            "The trace starts with a '<num_pages> <num_frames>' line followed by one \
             '<page> <r|w>' line per access.",
        )
        .arg(
            Arg::new("algorithm")
                .value_name("ALGORITHM")
                .required(true)
                .help(format!("Page replacement policy: one of {}", algorithms)),
        )
        .arg(
            Arg::new("clock_freq")
                .value_name("CLOCK_FREQ")
                .required(true)
                .value_parser(value_parser!(usize))
                .help("Number of accesses between clock ticks"),
        )
        .arg(
            Arg::new("trace")
                .short('t')
                .long("trace")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Read the trace from FILE instead of standard input"),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .value_name("SEED")
                .value_parser(value_parser!(u64))
                .help("Seed for the random policy"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log every fault and eviction"),
        )
}

impl Args {
    pub(crate) fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            algorithm: matches
                .get_one::<String>("algorithm")
                .cloned()
                .unwrap_or_default(),
            clock_frequency: matches.get_one::<usize>("clock_freq").copied().unwrap_or(0),
            trace: matches.get_one::<PathBuf>("trace").cloned(),
            seed: matches.get_one::<u64>("seed").copied(),
            verbose: matches.get_flag("verbose"),
        }
    }
}
