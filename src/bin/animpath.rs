use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use animpath::{Channel, PathModel, PathsConfig};

#[derive(Parser, Debug)]
#[command(name = "animpath", version)]
struct Cli {
    /// Log progress to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a path document and list its roles.
    Check(InArgs),
    /// Evaluate one role at one time.
    Sample(SampleArgs),
    /// Rewrite a path document in canonical form.
    Fmt(FmtArgs),
    /// Print the debug trajectory of a vector role.
    Trace(TraceArgs),
}

#[derive(Parser, Debug)]
struct InArgs {
    /// Input path document.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input path document.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Role name.
    #[arg(long)]
    role: String,

    /// Time in seconds.
    #[arg(long)]
    time: f64,
}

#[derive(Parser, Debug)]
struct FmtArgs {
    /// Input path document.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output file (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct TraceArgs {
    /// Input path document.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Vector role name.
    #[arg(long)]
    role: String,

    /// Number of points.
    #[arg(long, default_value_t = 64)]
    samples: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Fmt(args) => cmd_fmt(args),
        Command::Trace(args) => cmd_trace(args),
    }
}

fn read_model(path: &Path) -> anyhow::Result<PathModel> {
    let mut model = PathModel::new();
    model
        .load(&PathsConfig::with_path_file(path))
        .with_context(|| format!("load path document '{}'", path.display()))?;
    Ok(model)
}

fn cmd_check(args: InArgs) -> anyhow::Result<()> {
    let model = read_model(&args.in_path)?;
    for role in model.roles() {
        if let Some(channel) = model.channel(role) {
            println!(
                "{role}\t{}\t{}s",
                channel.payload().data_tag(),
                channel.duration()
            );
        }
    }
    eprintln!("{}: {} role(s) ok", args.in_path.display(), model.len());
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let model = read_model(&args.in_path)?;
    let channel = model
        .channel(&args.role)
        .with_context(|| format!("no role named '{}'", args.role))?;
    let value = match channel {
        Channel::Scalar(tree) => tree.value(args.time).map(|v| v.to_string()),
        Channel::Vector(tree) => tree
            .value(args.time)
            .map(|v| format!("{} {} {}", v.x, v.y, v.z)),
    };
    let value = value.with_context(|| format!("role '{}' has no sub-paths", args.role))?;
    println!("{value}");
    Ok(())
}

fn cmd_fmt(args: FmtArgs) -> anyhow::Result<()> {
    let model = read_model(&args.in_path)?;
    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            model
                .save(&PathsConfig::with_path_file(&out))
                .with_context(|| format!("write path document '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{}", model.serialize()?),
    }
    Ok(())
}

fn cmd_trace(args: TraceArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.samples >= 2, "--samples must be >= 2");
    let model = read_model(&args.in_path)?;
    let points = model
        .debug_line(&args.role, args.samples)
        .with_context(|| format!("'{}' is not a non-empty vector role", args.role))?;
    for p in points {
        println!("{} {} {}", p.x, p.y, p.z);
    }
    Ok(())
}
