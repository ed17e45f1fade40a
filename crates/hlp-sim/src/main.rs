use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use hlp_core::rng::derive_substream_seed;
use hlp_core::{ErrorKind, HlpError};
use hlp_engine::{Backend, DeviceOptions, LabelPropagation, PerfReport};
use hlp_graph::{
    canonical_hash, generate_fixed, generate_hsbm, generate_planted_partition,
    generate_random_labels, generate_uniform, load_graph, save_graph, Hypergraph,
};
use rand::Rng;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "hlp-sim", version, about = "Hypergraph label propagation driver")]
struct Cli {
    /// Number of vertices for the generated hypergraph.
    #[arg(long, default_value_t = 1000)]
    vertices: usize,
    /// Number of hyperedges for the generated hypergraph.
    #[arg(long, default_value_t = 5000)]
    edges: usize,
    /// Maximum number of propagation iterations.
    #[arg(long, default_value_t = 100)]
    iterations: usize,
    /// Convergence tolerance on the per-iteration change ratio.
    #[arg(long, default_value_t = 1e-6)]
    tolerance: f64,
    /// Host worker count; 0 auto-detects.
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Graph generator to use.
    #[arg(long, value_enum)]
    generator: Option<GeneratorKind>,
    /// Shortcut for --generator uniform.
    #[arg(long)]
    uniform: bool,
    /// Shortcut for --generator fixed.
    #[arg(long)]
    fixed: bool,
    /// Shortcut for --generator planted.
    #[arg(long)]
    planted: bool,
    /// Shortcut for --generator hsbm.
    #[arg(long)]
    hsbm: bool,

    /// Minimum edge size (uniform/planted/hsbm generators).
    #[arg(long, default_value_t = 2)]
    min_edge_size: usize,
    /// Maximum edge size (uniform/planted/hsbm generators).
    #[arg(long, default_value_t = 5)]
    max_edge_size: usize,
    /// Edge size for the fixed generator.
    #[arg(long, default_value_t = 3)]
    edge_size: usize,
    /// Number of communities (planted/hsbm generators).
    #[arg(long, default_value_t = 4)]
    communities: usize,
    /// Intra-community edge probability.
    #[arg(long, default_value_t = 0.8)]
    p_intra: f64,
    /// Inter-community edge probability (hsbm generator).
    #[arg(long, default_value_t = 0.2)]
    p_inter: f64,
    /// Generator seed; 0 draws one from entropy.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Assign random initial labels in [0, label-classes); 0 keeps defaults.
    #[arg(long, default_value_t = 0)]
    label_classes: usize,
    /// Label assignment seed; 0 derives one from --seed (or entropy).
    #[arg(long, default_value_t = 0)]
    label_seed: u64,

    /// Load the hypergraph from this file instead of generating one.
    #[arg(long)]
    load: Option<PathBuf>,
    /// Save the (generated or loaded) hypergraph to this file before the run.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Per-team worker count for the work-group kernel.
    #[arg(long, default_value_t = 256)]
    workgroup_size: usize,
    /// Upper bound on label values; defaults to label-classes, minimum 10.
    #[arg(long)]
    max_labels: Option<usize>,
    /// Execution backend.
    #[arg(long, value_enum, default_value_t = BackendArg::Multicore)]
    backend: BackendArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GeneratorKind {
    Uniform,
    Fixed,
    Planted,
    Hsbm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendArg {
    Serial,
    Multicore,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: Cli) -> Result<(), HlpError> {
    let mut graph = build_graph(&cli)?;

    if cli.label_classes > 0 {
        let label_seed = resolve_label_seed(&cli);
        let labels = generate_random_labels(graph.num_vertices(), cli.label_classes, label_seed)?;
        graph.set_labels(&labels)?;
    }

    if let Some(path) = &cli.save {
        save_graph(&graph, path)?;
        info!(path = %path.display(), "hypergraph saved");
    }

    graph.freeze();
    println!("Hypergraph statistics:");
    println!("  Vertices: {}", graph.num_vertices());
    println!("  Hyperedges: {}", graph.num_edges());

    let backend = match cli.backend {
        BackendArg::Serial => Backend::Serial,
        BackendArg::Multicore => Backend::MultiCore,
    };
    let driver = LabelPropagation::new(backend, device_options(&cli))?;
    let report = driver.run(&mut graph, cli.iterations, cli.tolerance)?;

    print_results(&cli, &graph, &report);
    Ok(())
}

fn build_graph(cli: &Cli) -> Result<Hypergraph, HlpError> {
    if let Some(path) = &cli.load {
        warn!(path = %path.display(), "--load set; generator parameters are ignored");
        return load_graph(path);
    }

    let generator = resolve_generator(cli)?;
    let seed = resolve_seed(cli.seed, "generator");
    match generator {
        GeneratorKind::Uniform => generate_uniform(
            cli.vertices,
            cli.edges,
            cli.min_edge_size,
            cli.max_edge_size,
            seed,
        ),
        GeneratorKind::Fixed => generate_fixed(cli.vertices, cli.edges, cli.edge_size, seed),
        GeneratorKind::Planted => generate_planted_partition(
            cli.vertices,
            cli.edges,
            cli.communities,
            cli.p_intra,
            cli.min_edge_size,
            cli.max_edge_size,
            seed,
        ),
        GeneratorKind::Hsbm => generate_hsbm(
            cli.vertices,
            cli.edges,
            cli.communities,
            cli.p_intra,
            cli.p_inter,
            cli.min_edge_size,
            cli.max_edge_size,
            seed,
        ),
    }
}

fn resolve_generator(cli: &Cli) -> Result<GeneratorKind, HlpError> {
    let shortcuts = [
        (cli.uniform, GeneratorKind::Uniform),
        (cli.fixed, GeneratorKind::Fixed),
        (cli.planted, GeneratorKind::Planted),
        (cli.hsbm, GeneratorKind::Hsbm),
    ];
    let selected: Vec<GeneratorKind> = shortcuts
        .iter()
        .filter(|(flag, _)| *flag)
        .map(|(_, kind)| *kind)
        .collect();

    match (selected.as_slice(), cli.generator) {
        ([], None) => Ok(GeneratorKind::Uniform),
        ([], Some(kind)) => Ok(kind),
        ([kind], None) => Ok(*kind),
        ([kind], Some(explicit)) if *kind == explicit => Ok(explicit),
        _ => Err(HlpError::config(
            "generator-conflict",
            "conflicting generator selections",
        )),
    }
}

fn resolve_seed(seed: u64, what: &str) -> u64 {
    if seed != 0 {
        return seed;
    }
    let drawn: u64 = rand::thread_rng().gen();
    info!(seed = drawn, "drew entropy seed for {what}");
    drawn
}

fn resolve_label_seed(cli: &Cli) -> u64 {
    if cli.label_seed != 0 {
        cli.label_seed
    } else if cli.seed != 0 {
        derive_substream_seed(cli.seed, 1)
    } else {
        resolve_seed(0, "labels")
    }
}

fn device_options(cli: &Cli) -> DeviceOptions {
    DeviceOptions {
        threads: cli.threads,
        workgroup_size: cli.workgroup_size,
        max_labels: cli.max_labels.unwrap_or_else(|| cli.label_classes.max(10)),
    }
}

fn print_results(cli: &Cli, graph: &Hypergraph, report: &PerfReport) {
    println!();
    println!("Results:");
    println!("  Iterations: {}", report.iterations);
    println!(
        "  Total runtime: {:.3} ms",
        report.total_time.as_secs_f64() * 1e3
    );
    if !report.moments.is_empty() {
        println!("  Breakdown:");
        for moment in &report.moments {
            println!(
                "    {}: {:.3} ms",
                moment.label,
                moment.duration.as_secs_f64() * 1e3
            );
        }
    }
    let backend = match cli.backend {
        BackendArg::Serial => "serial",
        BackendArg::Multicore => "multicore",
    };
    println!("  Implementation: {backend}");
    println!("  Graph hash: {}", canonical_hash(graph));
}

fn exit_code(err: &HlpError) -> u8 {
    match err.kind() {
        ErrorKind::Graph | ErrorKind::Config | ErrorKind::Format => 2,
        ErrorKind::Io | ErrorKind::Kernel => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hlp-sim").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_the_contract() {
        let cli = parse(&[]);
        assert_eq!(cli.vertices, 1000);
        assert_eq!(cli.edges, 5000);
        assert_eq!(cli.iterations, 100);
        assert_eq!(cli.tolerance, 1e-6);
        assert_eq!(cli.min_edge_size, 2);
        assert_eq!(cli.max_edge_size, 5);
        assert_eq!(cli.communities, 4);
        assert_eq!(resolve_generator(&cli).unwrap(), GeneratorKind::Uniform);
    }

    #[test]
    fn shortcut_flags_select_the_generator() {
        let cli = parse(&["--planted"]);
        assert_eq!(resolve_generator(&cli).unwrap(), GeneratorKind::Planted);

        let cli = parse(&["--generator", "hsbm"]);
        assert_eq!(resolve_generator(&cli).unwrap(), GeneratorKind::Hsbm);

        let cli = parse(&["--generator", "fixed", "--fixed"]);
        assert_eq!(resolve_generator(&cli).unwrap(), GeneratorKind::Fixed);
    }

    #[test]
    fn conflicting_generators_are_rejected() {
        let cli = parse(&["--uniform", "--planted"]);
        let err = resolve_generator(&cli).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(err.code(), "generator-conflict");

        let cli = parse(&["--generator", "uniform", "--hsbm"]);
        assert!(resolve_generator(&cli).is_err());
    }

    #[test]
    fn unknown_generator_is_a_parse_error() {
        let result =
            Cli::try_parse_from(["hlp-sim", "--generator", "starlike"]);
        assert!(result.is_err());
    }

    #[test]
    fn max_labels_defaults_follow_label_classes() {
        let cli = parse(&["--label-classes", "16"]);
        assert_eq!(device_options(&cli).max_labels, 16);

        let cli = parse(&["--label-classes", "4"]);
        assert_eq!(device_options(&cli).max_labels, 10);

        let cli = parse(&["--label-classes", "16", "--max-labels", "20"]);
        assert_eq!(device_options(&cli).max_labels, 20);
    }

    #[test]
    fn exit_codes_follow_the_error_taxonomy() {
        assert_eq!(exit_code(&HlpError::graph("empty-hyperedge", "x")), 2);
        assert_eq!(exit_code(&HlpError::config("max-labels-zero", "x")), 2);
        assert_eq!(exit_code(&HlpError::format("bad-magic-or-version", "x")), 2);
        assert_eq!(exit_code(&HlpError::io("file-read", "x")), 1);
        assert_eq!(exit_code(&HlpError::kernel("thread-pool", "x")), 1);
    }

    #[test]
    fn label_seed_derives_from_the_master_seed() {
        let cli = parse(&["--seed", "7"]);
        assert_eq!(resolve_label_seed(&cli), derive_substream_seed(7, 1));

        let cli = parse(&["--seed", "7", "--label-seed", "9"]);
        assert_eq!(resolve_label_seed(&cli), 9);
    }
}
