use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use cutlist_core::{Allocation, CutListInput, CutPlan, Planner, StrategyKind};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cutlist")]
#[command(about = "Lumber cut planner - Assign cuts to stock boards", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan which cuts go on which board
    Plan {
        /// Input file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for result (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Strategy to run
        #[arg(short, long, value_enum, default_value_t = StrategyArg::Both)]
        strategy: StrategyArg,
    },

    /// Validate an input file without planning
    Check {
        /// Input file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Global,
    Grouped,
    Both,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Output {
    Plan(CutPlan),
    Single(Allocation),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            input,
            output,
            strategy,
        } => {
            plan_command(input, output, strategy)?;
        }
        Commands::Check { input } => {
            check_command(input)?;
        }
    }

    Ok(())
}

fn load_input(path: &Path) -> Result<CutListInput> {
    debug!(path = %path.display(), "reading cut list");
    let content = std::fs::read_to_string(path)?;
    let ext = path.extension().and_then(|s| s.to_str());
    let input = if matches!(ext, Some("yaml") | Some("yml")) {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(input)
}

fn plan_command(input: PathBuf, output: Option<PathBuf>, strategy: StrategyArg) -> Result<()> {
    println!("{}", "🔍 Loading input...".bright_blue());

    let request = load_input(&input)?;
    let planner = Planner::new(request)?;
    print_request(&planner);

    println!("{}", "🪚 Planning cuts...".bright_blue());

    let result = match strategy {
        StrategyArg::Both => Output::Plan(planner.plan()?),
        StrategyArg::Global => Output::Single(planner.allocate(StrategyKind::Global)?),
        StrategyArg::Grouped => Output::Single(planner.allocate(StrategyKind::Grouped)?),
    };

    println!();
    println!("{}", "✅ Planning complete!".bright_green().bold());
    println!();

    match &result {
        Output::Plan(plan) => {
            print_allocation(&plan.global);
            print_allocation(&plan.grouped);
        }
        Output::Single(allocation) => print_allocation(allocation),
    }

    let json = serde_json::to_string_pretty(&result)?;
    if let Some(output_path) = output {
        std::fs::write(&output_path, json)?;
        println!(
            "💾 Saved result to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn check_command(input: PathBuf) -> Result<()> {
    let request = load_input(&input)?;
    let planner = Planner::new(request)?;
    print_request(&planner);
    println!("{}", "✅ Input is valid".bright_green().bold());
    Ok(())
}

fn print_request(planner: &Planner) {
    let request = planner.request();
    println!(
        "  {} cuts in {} parts",
        request.cut_count().to_string().bright_white().bold(),
        request.named_parts().count().to_string().bright_white().bold()
    );
    println!(
        "  Board: {}\" ({}\" usable, kerf {}\")",
        request.board_length, request.usable_length, request.kerf
    );
    println!();
}

fn print_allocation(allocation: &Allocation) {
    let title = match allocation.strategy {
        StrategyKind::Global => "📊 Fewest boards:",
        StrategyKind::Grouped => "📊 Parts kept together:",
    };
    println!("{}", title.bright_yellow().bold());

    let summary = &allocation.summary;
    println!(
        "  Boards: {}",
        summary.total_boards.to_string().bright_white().bold()
    );
    println!(
        "  Waste: {}",
        format!("{:.1}%", summary.waste_percentage).bright_white()
    );

    if !summary.boards_per_part.is_empty() {
        println!("  Boards per part:");
        for (part, count) in &summary.boards_per_part {
            println!("    • {}: {}", part.bright_cyan(), count);
        }
    }
    println!();
}
