use clap::{Parser, ValueEnum};
use colored::{ColoredString, Colorize};

use boardfreq_rs::board::{space_name, standard_groups, BoardState, TOTAL_SPACES};
use boardfreq_rs::engine::Ruleset;
use boardfreq_rs::report::{self, FrequencyReport, DEFAULT_PRECISION};
use boardfreq_rs::sim::{run_trials_parallel, Simulation};
use boardfreq_rs::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RulesetArg {
    /// Dice movement only
    Naive,
    /// Add the three-doubles jail rule
    Jail,
    /// Jail rule plus chance and community chest cards
    Realistic,
}

impl From<RulesetArg> for Ruleset {
    fn from(arg: RulesetArg) -> Ruleset {
        match arg {
            RulesetArg::Naive => Ruleset::Naive,
            RulesetArg::Jail => Ruleset::ThreeDoubles,
            RulesetArg::Realistic => Ruleset::Realistic,
        }
    }
}

#[derive(Parser)]
#[command(name = "boardfreq")]
#[command(about = "Estimate how often each Monopoly space gets landed on")]
struct Cli {
    #[arg(
        long,
        help = "RNG seed for a reproducible run (entropy-seeded when omitted)"
    )]
    seed: Option<u64>,
    #[arg(long, help = "Independent trials to average over", default_value_t = 1000)]
    trials: u64,
    #[arg(long, help = "Dice rolls per trial", default_value_t = 100_000)]
    moves: u64,
    #[arg(
        long,
        value_enum,
        help = "Movement rule layers to simulate",
        default_value_t = RulesetArg::Realistic
    )]
    ruleset: RulesetArg,
    #[arg(
        long,
        help = "Decimal digits in printed percentages",
        default_value_t = DEFAULT_PRECISION
    )]
    precision: usize,
    #[arg(
        long,
        help = "Worker engines for the parallel runner (1 = sequential)",
        default_value_t = 1
    )]
    workers: usize,
    #[arg(long, help = "Print the report as JSON", default_value_t = false)]
    json: bool,
}

fn run(cli: &Cli, ruleset: Ruleset) -> Result<BoardState, ConfigError> {
    if cli.workers > 1 {
        run_trials_parallel(ruleset, cli.seed, cli.workers, cli.trials, cli.moves)
    } else {
        let mut sim = Simulation::new(ruleset, cli.seed)?;
        sim.run_trials(cli.trials, cli.moves)?;
        Ok(sim.into_board())
    }
}

fn color_label(label: &str) -> ColoredString {
    match label {
        "brown" => label.truecolor(139, 69, 19),
        "light blue" => label.cyan(),
        "pink" => label.magenta(),
        "orange" => label.truecolor(255, 140, 0),
        "red" => label.red(),
        "yellow" => label.yellow(),
        "green" => label.green(),
        "dark blue" => label.blue(),
        other => other.normal(),
    }
}

fn main() {
    let cli = Cli::parse();
    let ruleset = Ruleset::from(cli.ruleset);

    let board = match run(&cli, ruleset) {
        Ok(board) => board,
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    };

    let groups = standard_groups();
    if cli.json {
        let report =
            FrequencyReport::new(&board, ruleset, cli.seed, cli.trials, cli.moves, &groups);
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("report serializes")
        );
        return;
    }

    println!("{}", report::render_board(&board, cli.precision));
    println!();
    for summary in report::group_summary(&board, &groups) {
        println!(
            "{}: {}. Average: {}",
            color_label(&summary.label),
            report::format_percentage(summary.total, cli.precision),
            report::format_percentage(summary.average, cli.precision)
        );
    }

    println!();
    println!("Most landed-on spaces:");
    let mut ranked: Vec<usize> = (0..TOTAL_SPACES).collect();
    ranked.sort_by(|&a, &b| {
        board
            .visit_fraction(b)
            .partial_cmp(&board.visit_fraction(a))
            .expect("fractions are finite")
    });
    for &pos in ranked.iter().take(5) {
        println!(
            "  {:>2}  {:<22} {}",
            pos,
            space_name(pos),
            report::format_percentage(board.visit_fraction(pos), cli.precision)
        );
    }
}
