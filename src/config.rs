//! Run configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::algs::verify::{FailurePolicy, SharedEdgePolicy, VerifyOptions};

/// Diagnostic verbosity, mapped onto a `log` level filter by the binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Verbosity {
    /// Nothing beyond the final error line.
    Quiet,
    /// Warnings, e.g. each missing connection in collect-all mode.
    #[default]
    Normal,
    /// Stage summaries.
    Verbose,
    /// Remapped connections, node span, index statistics.
    Debug,
    /// Per-triangle and per-connection progress.
    Trace,
}

impl Verbosity {
    /// `-q` wins over any number of `-v`.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Verbosity::Quiet;
        }
        match verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            2 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Normal => log::LevelFilter::Warn,
            Verbosity::Verbose => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Everything one verification run needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// AVS file of intersection `line` elements, intersection-local numbering.
    pub intersections: PathBuf,
    /// Intersection-local → global node id map.
    pub id_map: PathBuf,
    /// AVS file of the meshed fracture's `tri` elements, global numbering.
    pub mesh: PathBuf,
    /// Flag file to write.
    pub output: PathBuf,
    #[serde(default)]
    pub failure: FailurePolicy,
    #[serde(default)]
    pub shared_edges: SharedEdgePolicy,
    #[serde(default)]
    pub verbosity: Verbosity,
}

impl RunConfig {
    pub fn new(
        intersections: impl Into<PathBuf>,
        id_map: impl Into<PathBuf>,
        mesh: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        RunConfig {
            intersections: intersections.into(),
            id_map: id_map.into(),
            mesh: mesh.into(),
            output: output.into(),
            failure: FailurePolicy::default(),
            shared_edges: SharedEdgePolicy::default(),
            verbosity: Verbosity::default(),
        }
    }

    pub fn with_failure_policy(mut self, failure: FailurePolicy) -> Self {
        self.failure = failure;
        self
    }

    pub fn with_shared_edges(mut self, shared_edges: SharedEdgePolicy) -> Self {
        self.shared_edges = shared_edges;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn verify_options(&self) -> VerifyOptions {
        VerifyOptions {
            failure: self.failure,
            shared_edges: self.shared_edges,
        }
    }
}
