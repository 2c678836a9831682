//! Page replacement policies and the static registry that resolves them by name.
pub(crate) mod aging_replacer;
pub(crate) mod fifo_replacer;
pub(crate) mod nru_replacer;
pub(crate) mod random_replacer;
pub mod replacer;
pub(crate) mod second_chance_replacer;

use std::fmt;
use std::str::FromStr;

use pagesim_error::Error;

use self::aging_replacer::AgingReplacer;
use self::fifo_replacer::FifoReplacer;
use self::nru_replacer::NruReplacer;
use self::random_replacer::RandomReplacer;
use self::replacer::EvictionPolicy;
use self::second_chance_replacer::SecondChanceReplacer;

/// The replacement policies known to the simulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Fifo,
    SecondChance,
    Nru,
    Aging,
    Random,
}

/// Name -> policy table, resolved once at startup.
pub const POLICIES: [(&str, PolicyKind); 5] = [
    ("fifo", PolicyKind::Fifo),
    ("second_chance", PolicyKind::SecondChance),
    ("nru", PolicyKind::Nru),
    ("aging", PolicyKind::Aging),
    ("random", PolicyKind::Random),
];

impl PolicyKind {
    /// Returns the registry name of this policy.
    pub fn name(&self) -> &'static str {
        POLICIES
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }

    /// Instantiates the policy. `seed` is only used by [`PolicyKind::Random`].
    pub fn build(&self, seed: Option<u64>) -> Box<dyn EvictionPolicy> {
        match self {
            PolicyKind::Fifo => Box::new(FifoReplacer::new()),
            PolicyKind::SecondChance => Box::new(SecondChanceReplacer::new()),
            PolicyKind::Nru => Box::new(NruReplacer::new()),
            PolicyKind::Aging => Box::new(AgingReplacer::new()),
            PolicyKind::Random => Box::new(RandomReplacer::new(seed)),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        POLICIES
            .iter()
            .find(|(registered, _)| *registered == name)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| Error::UnknownPolicy(name.to_string()))
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
