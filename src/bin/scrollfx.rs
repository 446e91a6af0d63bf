use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scrollfx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a scroll script against a page and print every document write.
    Simulate(SimulateArgs),
    /// Print section scores and reveal verdicts at one scroll offset.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scroll script JSON. Without one the page only initializes and settles.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Session config JSON (markers, reveal, background, frame interval).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated time to keep running after the last step.
    #[arg(long, default_value_t = 500)]
    settle_ms: u64,

    /// Emit the report as JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scroll offset to inspect at (defaults to the page's own).
    #[arg(long)]
    scroll_y: Option<f64>,

    /// Session config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, serde::Serialize)]
struct Inspection {
    scroll_y: f64,
    sections: Vec<SectionRow>,
    dominant: Option<String>,
    reveal: Vec<RevealRow>,
}

#[derive(Debug, serde::Serialize)]
struct SectionRow {
    key: String,
    color: String,
    dark: bool,
    score: Option<scrollfx::SectionScore>,
}

#[derive(Debug, serde::Serialize)]
struct RevealRow {
    key: String,
    repeatable: bool,
    in_viewport: bool,
    intersecting: bool,
    ratio: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn read_to_string(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))
}

fn load_page(path: &Path) -> anyhow::Result<scrollfx::Page> {
    let s = read_to_string(path)?;
    scrollfx::Page::from_json_str(&s).with_context(|| format!("parse page '{}'", path.display()))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<scrollfx::SessionConfig> {
    let Some(path) = path else {
        return Ok(scrollfx::SessionConfig::default());
    };
    let s = read_to_string(path)?;
    scrollfx::SessionConfig::from_json_str(&s)
        .with_context(|| format!("parse config '{}'", path.display()))
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let page = load_page(&args.in_path)?;
    let config = load_config(args.config.as_deref())?;
    let script = match &args.script {
        Some(path) => {
            let s = read_to_string(path)?;
            scrollfx::ScrollScript::from_json_str(&s)
                .with_context(|| format!("parse script '{}'", path.display()))?
        }
        None => scrollfx::ScrollScript::default(),
    };

    let mut session = scrollfx::Session::new(page, config)?;
    let report = scrollfx::run_script(&mut session, &script, args.settle_ms)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for record in &report.trace {
        println!("{:>6}ms  {}", record.at_ms, describe(record));
    }
    println!(
        "final background: {}",
        report.final_background.as_deref().unwrap_or("(none)")
    );
    println!(
        "final theme: {}",
        report.final_theme.as_deref().unwrap_or("light")
    );
    println!("ended at {}ms", report.ended_at_ms);
    Ok(())
}

fn describe(record: &scrollfx::TraceRecord) -> String {
    let element = record.element.as_deref().unwrap_or("?");
    match &record.mutation {
        scrollfx::Mutation::ClassAdded { class, .. } => format!("{element} +.{class}"),
        scrollfx::Mutation::ClassRemoved { class, .. } => format!("{element} -.{class}"),
        scrollfx::Mutation::BodyStyle { property, value } => format!("body {property}: {value}"),
        scrollfx::Mutation::BodyAttributeSet { name, value } => format!("body [{name}={value}]"),
        scrollfx::Mutation::BodyAttributeRemoved { name } => format!("body -[{name}]"),
    }
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    use scrollfx::Document as _;

    let mut page = load_page(&args.in_path)?;
    let config = load_config(args.config.as_deref())?;
    if let Some(y) = args.scroll_y {
        page.scroll_to(y);
    }

    let markers = &config.markers;
    let sections = scrollfx::discover_sections(&page, markers);
    let scores = scrollfx::score_sections(&page, &sections, config.background.center_weight);
    let dominant = scrollfx::select_dominant(&scores);

    let key = |id: scrollfx::ElementId| page.key(id).unwrap_or("?").to_string();

    let section_rows = sections
        .iter()
        .map(|s| SectionRow {
            key: key(s.id),
            color: s.config.color.clone(),
            dark: s.config.is_dark,
            score: scores.iter().find(|sc| sc.section == s.id).copied(),
        })
        .collect::<Vec<_>>();

    let mut watcher = scrollfx::IntersectionWatcher::new(scrollfx::WatchOptions::new(
        vec![config.reveal.threshold],
        config.reveal.root_margin,
    )?);
    let animatables = scrollfx::discover_animatables(&page, markers);
    for a in &animatables {
        watcher.observe(a.id);
    }
    let entries = watcher.take_records(&page, scrollfx::Timestamp::ZERO);
    let viewport = page.viewport();
    let reveal_rows = animatables
        .iter()
        .map(|a| {
            let entry = entries.iter().find(|e| e.target == a.id);
            let in_viewport = page
                .bounding_client_rect(a.id)
                .is_some_and(|r| r.y0 < viewport.height && r.y1 > 0.0);
            RevealRow {
                key: key(a.id),
                repeatable: a.config.repeatable,
                in_viewport,
                intersecting: entry.is_some_and(|e| e.is_intersecting),
                ratio: entry.map_or(0.0, |e| e.intersection_ratio),
            }
        })
        .collect::<Vec<_>>();

    let inspection = Inspection {
        scroll_y: page.scroll_y(),
        sections: section_rows,
        dominant: dominant.map(key),
        reveal: reveal_rows,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
        return Ok(());
    }

    println!("scroll_y: {}", inspection.scroll_y);
    println!("sections:");
    for row in &inspection.sections {
        let theme = if row.dark { "dark" } else { "light" };
        match &row.score {
            Some(sc) => println!(
                "  {:<16} {:<10} {:<5}  score {:.1} (visible {:.1}, off-center {:.1})",
                row.key, row.color, theme, sc.score, sc.visible_height, sc.center_distance
            ),
            None => println!("  {:<16} {:<10} {:<5}  -", row.key, row.color, theme),
        }
    }
    println!(
        "dominant: {}",
        inspection.dominant.as_deref().unwrap_or("(none)")
    );
    println!("reveal:");
    for row in &inspection.reveal {
        println!(
            "  {:<16} {:<10} in_viewport={:<5} intersecting={:<5} ratio={:.3}",
            row.key,
            if row.repeatable { "repeat" } else { "once" },
            row.in_viewport,
            row.intersecting,
            row.ratio
        );
    }
    Ok(())
}
