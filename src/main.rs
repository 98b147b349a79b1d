//! Tieset - tie-set/cut-set DC circuit solver
//!
//! Reads a netlist from a file or stdin and prints the incidence, tie-set
//! and cut-set matrices together with every loop and branch quantity.
//!
//! # Usage
//!
//! ```bash
//! tieset circuit.net
//! tieset --tolerance 1e-12 -vv < circuit.net
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use log::{info, LevelFilter};
use tieset_core::{
    error::{Result, TiesetError},
    netlist::NetlistReader,
    report::{branch_order_hint, input_instructions, render_report, DEFAULT_PRECISION},
    Analyzer, SolverConfig, Tolerance,
};

/// Tie-set/cut-set DC circuit solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist file (reads stdin when omitted)
    #[arg(value_name = "NETLIST")]
    netlist: Option<PathBuf>,

    /// Treat determinants with magnitude at or below this value as zero
    #[arg(short, long, value_name = "EPS")]
    tolerance: Option<f64>,

    /// Decimal places in the report
    #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
    precision: usize,

    /// Do not print input prompts
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|e| TiesetError::FileReadError {
                path: path.display().to_string(),
                source: e,
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Prompts only make sense when a person is typing the netlist
    let interactive = args.netlist.is_none() && !args.quiet && io::stdin().is_terminal();
    if interactive {
        eprintln!("{}", input_instructions());
    }

    let mut reader = NetlistReader::new(open_input(args.netlist.as_ref())?);
    let graph = reader.read_topology()?;
    info!(
        "read {} nodes and {} branches",
        graph.node_count(),
        graph.branch_count()
    );

    let mut config = SolverConfig::new();
    if let Some(eps) = args.tolerance {
        config = config.with_singular_tolerance(Tolerance::Absolute(eps));
    }
    let analyzer = Analyzer::with_config(graph, config)?;

    if interactive {
        eprintln!("{}", branch_order_hint(analyzer.ordering()));
    }

    let values = reader.read_values(analyzer.graph().branch_count())?;
    reader.finish()?;

    let analysis = analyzer.solve(&values)?;
    print!("{}", render_report(&analysis, args.precision));

    Ok(())
}
