use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;

use scrollstage::{
    AnimatorConfig, RevealDimensions, RevealFrame, ScrollProgress, ScrollReveal, ScrollScript,
    SpringConfig, Stage, Timestamp, Transform, ViewportSize, VisualState, entropy_seed,
};

#[derive(Parser, Debug)]
#[command(name = "scrollstage", version)]
struct Cli {
    /// Log more to stderr (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stage for a scroll progress value.
    Classify(ClassifyArgs),
    /// Generate stage-1 transforms and print every item's stage targets as JSON.
    Targets(TargetsArgs),
    /// Replay a scroll script headlessly and write the report as JSON.
    Simulate(SimulateArgs),
    /// Print the effective default configuration as JSON.
    Config(ConfigArgs),
    /// Print the scroll-reveal section's placement as JSON.
    Reveal(RevealArgs),
}

#[derive(Parser, Debug)]
struct ClassifyArgs {
    /// Scroll progress; clamped to [0, 1].
    #[arg(long, allow_negative_numbers = true)]
    progress: f64,

    /// Use the mobile thresholds.
    #[arg(long)]
    mobile: bool,
}

#[derive(Parser, Debug)]
struct TargetsArgs {
    /// Number of gallery items.
    #[arg(long)]
    items: usize,

    /// Seed for the stage-1 transforms (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Only print this stage (1-4).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    stage: Option<u8>,

    /// JSON config overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Scroll script JSON.
    #[arg(long)]
    script: PathBuf,

    /// JSON config overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start from the mobile preset (ignored with --config).
    #[arg(long)]
    mobile: bool,

    /// Report path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Print the mobile preset.
    #[arg(long)]
    mobile: bool,
}

#[derive(Parser, Debug)]
struct RevealArgs {
    /// Scroll progress; clamped to [0, 1].
    #[arg(long, allow_negative_numbers = true)]
    progress: f64,

    /// Progress the section was resting at before jumping to --progress.
    #[arg(long, allow_negative_numbers = true)]
    from: Option<f64>,

    /// Milliseconds of spring motion to sample after the jump.
    #[arg(long, default_value_t = 0)]
    after_ms: u64,

    /// Viewport width in CSS pixels.
    #[arg(long, default_value_t = 1200.0)]
    width: f64,

    /// Viewport height in CSS pixels.
    #[arg(long, default_value_t = 800.0)]
    height: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Classify(args) => cmd_classify(args),
        Command::Targets(args) => cmd_targets(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Config(args) => cmd_config(args),
        Command::Reveal(args) => cmd_reveal(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn preset(mobile: bool) -> AnimatorConfig {
    if mobile {
        AnimatorConfig::mobile()
    } else {
        AnimatorConfig::desktop()
    }
}

fn load_config(path: Option<&Path>, mobile: bool) -> anyhow::Result<AnimatorConfig> {
    match path {
        Some(path) => AnimatorConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(preset(mobile)),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize JSON")?;
    println!("{s}");
    Ok(())
}

fn cmd_classify(args: ClassifyArgs) -> anyhow::Result<()> {
    let progress = ScrollProgress::new(args.progress);
    let stage = preset(args.mobile).thresholds.classify(progress);
    println!("{}", stage.number());
    Ok(())
}

#[derive(Serialize)]
struct ItemTargets {
    index: usize,
    transform: Transform,
    targets: Vec<StageTarget>,
}

#[derive(Serialize)]
struct StageTarget {
    stage: Stage,
    state: VisualState,
    /// Rotation then translation, as `[a, b, c, d, e, f]`.
    affine: [f64; 6],
}

#[derive(Serialize)]
struct TargetsOutput {
    seed: u64,
    items: Vec<ItemTargets>,
}

fn cmd_targets(args: TargetsArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref(), false)?;
    let stages = match args.stage {
        Some(n) => vec![Stage::try_from(n)?],
        None => Stage::ALL.to_vec(),
    };
    let seed = args.seed.unwrap_or_else(entropy_seed);
    tracing::debug!(seed, items = args.items, "generating transforms");

    let items = cfg
        .limits
        .generate_seeded(args.items, seed)
        .into_iter()
        .enumerate()
        .map(|(index, transform)| ItemTargets {
            index,
            transform,
            targets: stages
                .iter()
                .map(|&stage| {
                    let state = cfg.targets.resolve(stage, index, transform);
                    StageTarget {
                        stage,
                        state,
                        affine: state.transform().to_affine().as_coeffs(),
                    }
                })
                .collect(),
        })
        .collect();

    print_json(&TargetsOutput { seed, items })
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let script = ScrollScript::load(&args.script)
        .with_context(|| format!("load script '{}'", args.script.display()))?;
    let cfg = load_config(args.config.as_deref(), args.mobile)?;
    let report = scrollstage::simulate(&script, cfg).context("run simulation")?;
    let json = report.to_json_pretty()?;

    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, json)
                .with_context(|| format!("write report '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    println!("{}", preset(args.mobile).to_json_pretty()?);
    Ok(())
}

#[derive(Serialize)]
struct RevealOutput {
    dimensions: RevealDimensions,
    settled: bool,
    target: RevealFrame,
    frame: RevealFrame,
}

fn cmd_reveal(args: RevealArgs) -> anyhow::Result<()> {
    let dims = RevealDimensions::for_viewport(ViewportSize::new(args.width, args.height));
    let to = ScrollProgress::new(args.progress);
    let from = args.from.map_or(to, ScrollProgress::new);

    let mut reveal = ScrollReveal::mount(dims, SpringConfig::default(), from)
        .context("mount scroll reveal")?;
    reveal.on_progress(Timestamp::ZERO, to);
    let at = Timestamp(args.after_ms);

    print_json(&RevealOutput {
        dimensions: dims,
        settled: reveal.is_settled(at),
        target: reveal.target(),
        frame: reveal.sample(at),
    })
}
