use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use fracture_intersect::algs::verify::{FailurePolicy, SharedEdgePolicy};
use fracture_intersect::config::{RunConfig, Verbosity};
use fracture_intersect::pipeline;

/// Verify that fracture-intersection edges survive meshing and flag the
/// triangles lying on the intersection.
///
/// Exit status: 0 when every required connection is present, 1 when
/// connections are missing, 2 on unreadable or inconsistent input, 3 when the
/// flag file cannot be written.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Fracture intersection AVS file (`line` elements, intersection numbering).
    intersections: PathBuf,

    /// Intersection node to global node number map.
    id_map: PathBuf,

    /// Meshed fracture AVS file (`tri` elements, global numbering).
    mesh: PathBuf,

    /// Output flag file, one 0/1 line per triangle.
    output: PathBuf,

    /// Check every connection and report all missing ones instead of
    /// stopping at the first.
    #[arg(long, env = "FRACTURE_INTERSECT_COLLECT_ALL")]
    collect_all: bool,

    /// Require every intersection edge to be shared by two triangles.
    #[arg(long, env = "FRACTURE_INTERSECT_REQUIRE_SHARED")]
    require_shared: bool,

    /// More diagnostics (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print the final error line.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn into_config(self) -> RunConfig {
        let failure = if self.collect_all {
            FailurePolicy::CollectAll
        } else {
            FailurePolicy::FailFast
        };
        let shared_edges = if self.require_shared {
            SharedEdgePolicy::RequireShared
        } else {
            SharedEdgePolicy::AllowBoundary
        };
        RunConfig::new(self.intersections, self.id_map, self.mesh, self.output)
            .with_failure_policy(failure)
            .with_shared_edges(shared_edges)
            .with_verbosity(Verbosity::from_flags(self.verbose, self.quiet))
    }
}

fn main() -> ExitCode {
    let config = Args::parse().into_config();

    env_logger::Builder::new()
        .filter_level(config.verbosity.level_filter())
        .parse_default_env()
        .init();

    match pipeline::run(&config) {
        Ok(summary) => {
            log::info!(
                "intersection connectivity verified: {} connections, {} of {} triangles flagged",
                summary.connections,
                summary.report.triangles_flagged,
                summary.triangles
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATHS: [&str; 5] = ["fracture-intersect", "inter.inp", "map.txt", "mesh.inp", "flags"];

    fn parse(extra: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(PATHS.iter().chain(extra))
    }

    #[test]
    fn flags_select_policies_and_verbosity() {
        let config = parse(&[]).unwrap().into_config();
        assert_eq!(config.failure, FailurePolicy::FailFast);
        assert_eq!(config.shared_edges, SharedEdgePolicy::AllowBoundary);
        assert_eq!(config.verbosity, Verbosity::Normal);
        assert_eq!(config.output, PathBuf::from("flags"));

        let config = parse(&["--collect-all", "--require-shared", "-vv"])
            .unwrap()
            .into_config();
        assert_eq!(config.failure, FailurePolicy::CollectAll);
        assert_eq!(config.shared_edges, SharedEdgePolicy::RequireShared);
        assert_eq!(config.verbosity, Verbosity::Debug);

        // SAFETY: the only test in this binary that touches the environment.
        unsafe {
            std::env::set_var("FRACTURE_INTERSECT_COLLECT_ALL", "true");
            std::env::set_var("FRACTURE_INTERSECT_REQUIRE_SHARED", "true");
        }
        let from_env = parse(&[]).map(Args::into_config);
        unsafe {
            std::env::remove_var("FRACTURE_INTERSECT_COLLECT_ALL");
            std::env::remove_var("FRACTURE_INTERSECT_REQUIRE_SHARED");
        }
        let config = from_env.unwrap();
        assert_eq!(config.failure, FailurePolicy::CollectAll);
        assert_eq!(config.shared_edges, SharedEdgePolicy::RequireShared);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let err = parse(&["-q", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        let config = parse(&["--quiet"]).unwrap().into_config();
        assert_eq!(config.verbosity, Verbosity::Quiet);
        assert_eq!(config.verbosity.level_filter(), log::LevelFilter::Off);
    }

    #[test]
    fn all_four_paths_are_required() {
        let err = Args::try_parse_from(&PATHS[..4]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
