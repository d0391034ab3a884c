use std::path::PathBuf;
use std::time::Duration;

use satnet::{BranchingStrategy, Combination};

pub struct Config {
    pub input:       Option<PathBuf>,
    pub output:      Option<PathBuf>,
    pub return_code: bool,
    pub tree:        bool,
    pub combination: Combination,
    pub timeout:     Option<Duration>,
    pub max_runs:    Option<usize>,
    pub branching:   Box<dyn BranchingStrategy>,
}
