use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use masquerade::{
    loader::CatalogLoader,
    names::{parse_names, prompt_player_count, prompt_player_names},
    presenter::{Compiler, SetupManifest, SheetWriter, TemplateSet},
    rng::RngManager,
    Allocator, PlayerSetup, SessionConfig,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Deal secret characters and print the sheets")]
struct Cli {
    /// Session config YAML (built-in defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of players (asked interactively when omitted)
    #[arg(long)]
    players: Option<usize>,

    /// Comma-separated player names (asked interactively when omitted)
    #[arg(long)]
    names: Option<String>,

    /// Seed for a reproducible deal
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the generated sheets
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Run the document compiler on every sheet
    #[arg(long)]
    compile: bool,

    /// Print the deal to stdout instead of writing sheets
    #[arg(long)]
    print: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => SessionConfig::from_yaml(path)?,
        None => SessionConfig::default(),
    };
    if let Some(dir) = cli.output_dir.clone() {
        config.output_dir = dir;
    }
    config.compile.enabled |= cli.compile;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .format_timestamp_secs()
    .init();

    let base_dir = SessionConfig::base_dir(cli.config.as_deref());
    let loader = CatalogLoader::new(&base_dir);
    let roles = loader
        .load_roles(&config.roles)
        .context("Failed to load role catalog")?;
    let professions = loader
        .load_professions(&config.professions)
        .context("Failed to load profession catalog")?;
    let allocator = Allocator::new(roles, professions);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let listed_names = cli.names.as_deref().map(parse_names);
    let players = match (cli.players, &listed_names) {
        (Some(players), _) => players,
        (None, Some(names)) => names.len(),
        (None, None) => prompt_player_count(&mut input, &mut output)?,
    };
    let (tier, quota) = allocator.plan(players)?;

    let mut rng = match cli.seed.or(config.seed) {
        Some(seed) => RngManager::new(seed),
        None => RngManager::from_entropy(),
    };
    info!("seed {} (pass --seed {} to replay this deal)", rng.seed(), rng.seed());

    let assignments = allocator.generate_characters(players, &mut rng)?;
    let names = match listed_names {
        Some(names) => names,
        None => prompt_player_names(players, &mut input, &mut output)?,
    };
    let setups = PlayerSetup::assemble(names, assignments)?;

    if cli.print {
        for setup in &setups {
            println!("{setup}\n");
        }
        return Ok(());
    }

    let templates = TemplateSet::load(
        base_dir.join(&config.templates.player),
        base_dir.join(&config.templates.narrator),
    )?;
    let writer = SheetWriter::new(templates, &config.output_dir)
        .with_compiler(Compiler::from_config(&config.compile));
    writer.prepare_output_dir()?;

    let mut reports = writer.write_players(&setups);
    reports.push(writer.write_narrator(&setups));
    writer.write_manifest(&SetupManifest::new(rng.seed(), tier, quota, &setups))?;

    let failures: Vec<String> = reports
        .iter()
        .filter_map(|report| match report {
            Ok(report) if report.is_ok() => None,
            Ok(report) => Some(report.document.display().to_string()),
            Err(err) => Some(err.to_string()),
        })
        .collect();
    for failure in &failures {
        warn!("not rendered: {failure}");
    }

    println!(
        "Dealt {} characters at {} into {} ({} of {} documents rendered).",
        players,
        tier,
        writer.output_dir().display(),
        reports.len() - failures.len(),
        reports.len()
    );
    Ok(())
}
