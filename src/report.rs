use serde::Serialize;

use crate::board::{BoardState, TOTAL_SPACES};
use crate::engine::Ruleset;

/// Decimal digits shown in percentage cells.
pub const DEFAULT_PRECISION: usize = 4;

/// Zero-padded fixed-point percentage: `0.028912` becomes `02.8912%` at
/// the default precision.
pub fn format_percentage(frac: f64, precision: usize) -> String {
    format!(
        "{:0width$.precision$}%",
        100.0 * frac,
        width = precision + 2,
        precision = precision
    )
}

/// Render the landing percentages as a square board with Go at the top
/// left, following the clockwise space order: 0..=10 across the top,
/// 11..=19 down the right edge, 30..=20 across the bottom, 39..=31 down
/// the left edge.
pub fn render_board(board: &BoardState, precision: usize) -> String {
    let leg = TOTAL_SPACES / 4;
    let cell = precision + 3;
    let mut out = String::from("Go is on the top left\n|");
    for pos in 0..=leg {
        out.push_str(&format_percentage(board.visit_fraction(pos), precision));
        out.push('|');
    }
    out.push('\n');
    for row in 0..leg - 1 {
        out.push('|');
        out.push_str(&format_percentage(
            board.visit_fraction(TOTAL_SPACES - 1 - row),
            precision,
        ));
        out.push('|');
        out.push_str(&" ".repeat(cell * (leg - 1) + leg - 2));
        out.push('|');
        out.push_str(&format_percentage(
            board.visit_fraction(leg + 1 + row),
            precision,
        ));
        out.push('|');
        out.push('\n');
    }
    out.push('|');
    for pos in (2 * leg..=3 * leg).rev() {
        out.push_str(&format_percentage(board.visit_fraction(pos), precision));
        out.push('|');
    }
    out
}

/// Aggregate landing share for one group of spaces.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub label: String,
    pub total: f64,
    pub average: f64,
}

/// Total and per-space average landing fraction for each group.
pub fn group_summary(board: &BoardState, groups: &[(String, Vec<usize>)]) -> Vec<GroupSummary> {
    groups
        .iter()
        .map(|(label, spaces)| {
            let total: f64 = spaces.iter().map(|&pos| board.visit_fraction(pos)).sum();
            let average = if spaces.is_empty() {
                0.0
            } else {
                total / spaces.len() as f64
            };
            GroupSummary {
                label: label.clone(),
                total,
                average,
            }
        })
        .collect()
}

/// One printable line per group, e.g.
/// `railroads: 11.0213%. Average: 02.7553%`.
pub fn group_lines(
    board: &BoardState,
    groups: &[(String, Vec<usize>)],
    precision: usize,
) -> Vec<String> {
    group_summary(board, groups)
        .iter()
        .map(|group| {
            format!(
                "{}: {}. Average: {}",
                group.label,
                format_percentage(group.total, precision),
                format_percentage(group.average, precision)
            )
        })
        .collect()
}

/// Full run summary for machine consumption.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyReport {
    pub ruleset: Ruleset,
    pub seed: Option<u64>,
    pub trials: u64,
    pub moves_per_trial: u64,
    pub fractions: Vec<f64>,
    pub groups: Vec<GroupSummary>,
}

impl FrequencyReport {
    pub fn new(
        board: &BoardState,
        ruleset: Ruleset,
        seed: Option<u64>,
        trials: u64,
        moves_per_trial: u64,
        groups: &[(String, Vec<usize>)],
    ) -> FrequencyReport {
        FrequencyReport {
            ruleset,
            seed,
            trials,
            moves_per_trial,
            fractions: (0..TOTAL_SPACES)
                .map(|pos| board.visit_fraction(pos))
                .collect(),
            groups: group_summary(board, groups),
        }
    }
}
