use enum_iterator::{all, Sequence};
use serde::{Deserialize, Serialize};

pub const TOTAL_SPACES: usize = 40;

// Corner and card-target spaces, indexed clockwise from Go.
pub const GO: usize = 0;
pub const READING_RAILROAD: usize = 5;
pub const JUST_VISITING: usize = 10;
pub const ST_CHARLES_PLACE: usize = 11;
pub const ELECTRIC_COMPANY: usize = 12;
pub const PENNSYLVANIA_RAILROAD: usize = 15;
pub const ILLINOIS_AVENUE: usize = 24;
pub const B_O_RAILROAD: usize = 25;
pub const WATER_WORKS: usize = 28;
pub const GO_TO_JAIL: usize = 30;
pub const BOARDWALK: usize = 39;

const SPACE_NAMES: [&str; TOTAL_SPACES] = [
    "Go",
    "Mediterranean Avenue",
    "Community Chest",
    "Baltic Avenue",
    "Income Tax",
    "Reading Railroad",
    "Oriental Avenue",
    "Chance",
    "Vermont Avenue",
    "Connecticut Avenue",
    "Jail / Just Visiting",
    "St. Charles Place",
    "Electric Company",
    "States Avenue",
    "Virginia Avenue",
    "Pennsylvania Railroad",
    "St. James Place",
    "Community Chest",
    "Tennessee Avenue",
    "New York Avenue",
    "Free Parking",
    "Kentucky Avenue",
    "Chance",
    "Indiana Avenue",
    "Illinois Avenue",
    "B. & O. Railroad",
    "Atlantic Avenue",
    "Ventnor Avenue",
    "Water Works",
    "Marvin Gardens",
    "Go To Jail",
    "Pacific Avenue",
    "North Carolina Avenue",
    "Community Chest",
    "Pennsylvania Avenue",
    "Short Line",
    "Chance",
    "Park Place",
    "Luxury Tax",
    "Boardwalk",
];

pub fn space_name(pos: usize) -> &'static str {
    SPACE_NAMES[pos]
}

/// Landing counters for every space plus the token cursor and a
/// per-trial move counter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    visits: Vec<f64>,
    position: usize,
    total_moves: u64,
}

impl BoardState {
    pub fn new() -> BoardState {
        BoardState {
            visits: vec![0.0; TOTAL_SPACES],
            position: GO,
            total_moves: 0,
        }
    }

    /// Record that the token landed on `pos`. Card-driven relocations call
    /// this once for the card tile and once for the relocation target.
    pub fn record_visit(&mut self, pos: usize) {
        self.visits[pos] += 1.0;
        self.total_moves += 1;
    }

    /// A new trial starts from Go with a fresh move counter; the landing
    /// counters keep accumulating across trials.
    pub fn begin_trial(&mut self) {
        self.position = GO;
        self.total_moves = 0;
    }

    /// Scale the accumulated counters down to per-trial averages.
    pub fn average_over(&mut self, trials: u64) {
        for count in &mut self.visits {
            *count /= trials as f64;
        }
    }

    /// Fraction of all recorded landings that hit `pos`.
    pub fn visit_fraction(&self, pos: usize) -> f64 {
        if self.total_moves == 0 {
            return 0.0;
        }
        self.visits[pos] / self.total_moves as f64
    }

    pub fn counts(&self) -> Vec<f64> {
        self.visits.clone()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn set_position(&mut self, pos: usize) {
        self.position = pos;
    }

    pub fn total_moves(&self) -> u64 {
        self.total_moves
    }

    /// Fold another board's raw counters into this one. The cursor and
    /// move counter take the other board's values, the same way the
    /// sequential runner keeps its most recent trial's counter.
    pub(crate) fn absorb(&mut self, other: &BoardState) {
        for (mine, theirs) in self.visits.iter_mut().zip(&other.visits) {
            *mine += theirs;
        }
        self.position = other.position;
        self.total_moves = other.total_moves;
    }
}

impl Default for BoardState {
    fn default() -> BoardState {
        BoardState::new()
    }
}

/// Board spaces grouped the way they are owned: the eight color groups
/// plus the railroads and the utilities.
#[derive(Debug, Clone, Copy, Serialize, Sequence, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Group {
    Brown,
    LightBlue,
    Pink,
    Orange,
    Red,
    Yellow,
    Green,
    DarkBlue,
    Railroads,
    Utilities,
}

impl Group {
    pub fn label(&self) -> &'static str {
        match self {
            Group::Brown => "brown",
            Group::LightBlue => "light blue",
            Group::Pink => "pink",
            Group::Orange => "orange",
            Group::Red => "red",
            Group::Yellow => "yellow",
            Group::Green => "green",
            Group::DarkBlue => "dark blue",
            Group::Railroads => "railroads",
            Group::Utilities => "utilities",
        }
    }

    pub fn spaces(&self) -> &'static [usize] {
        match self {
            Group::Brown => &[1, 3],
            Group::LightBlue => &[6, 8, 9],
            Group::Pink => &[11, 13, 14],
            Group::Orange => &[16, 18, 19],
            Group::Red => &[21, 23, 24],
            Group::Yellow => &[26, 27, 29],
            Group::Green => &[31, 32, 34],
            Group::DarkBlue => &[37, 39],
            Group::Railroads => &[5, 15, 25, 35],
            Group::Utilities => &[12, 28],
        }
    }
}

/// The standard grouping handed to the report layer. Callers can supply
/// their own grouping for non-standard boards.
pub fn standard_groups() -> Vec<(String, Vec<usize>)> {
    all::<Group>()
        .map(|group| (group.label().to_string(), group.spaces().to_vec()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_zeroed_at_go() {
        let board = BoardState::new();
        assert_eq!(board.position(), GO);
        assert_eq!(board.total_moves(), 0);
        assert!(board.counts().iter().all(|&count| count == 0.0));
    }

    #[test]
    fn record_visit_updates_counter_and_move_count() {
        let mut board = BoardState::new();
        board.record_visit(7);
        board.record_visit(7);
        board.record_visit(12);
        assert_eq!(board.counts()[7], 2.0);
        assert_eq!(board.counts()[12], 1.0);
        assert_eq!(board.total_moves(), 3);
    }

    #[test]
    fn visit_fraction_is_idempotent() {
        let mut board = BoardState::new();
        board.record_visit(4);
        board.record_visit(9);
        let first = board.visit_fraction(4);
        assert_eq!(first, 0.5);
        assert_eq!(board.visit_fraction(4), first);
    }

    #[test]
    fn fraction_is_zero_before_any_move() {
        let board = BoardState::new();
        assert_eq!(board.visit_fraction(0), 0.0);
    }

    #[test]
    fn begin_trial_keeps_accumulated_counts() {
        let mut board = BoardState::new();
        board.set_position(22);
        board.record_visit(22);
        board.begin_trial();
        assert_eq!(board.position(), GO);
        assert_eq!(board.total_moves(), 0);
        assert_eq!(board.counts()[22], 1.0);
    }

    #[test]
    fn average_over_divides_every_counter() {
        let mut board = BoardState::new();
        for _ in 0..4 {
            board.record_visit(3);
        }
        board.record_visit(5);
        board.average_over(2);
        assert_eq!(board.counts()[3], 2.0);
        assert_eq!(board.counts()[5], 0.5);
    }

    #[test]
    fn absorb_sums_counts_and_takes_move_counter() {
        let mut merged = BoardState::new();
        let mut a = BoardState::new();
        a.record_visit(1);
        a.record_visit(1);
        let mut b = BoardState::new();
        b.record_visit(1);
        b.record_visit(30);
        b.set_position(30);
        merged.absorb(&a);
        merged.absorb(&b);
        assert_eq!(merged.counts()[1], 3.0);
        assert_eq!(merged.counts()[30], 1.0);
        assert_eq!(merged.total_moves(), 2);
        assert_eq!(merged.position(), 30);
    }

    #[test]
    fn standard_groups_cover_all_ownable_spaces_once() {
        let groups = standard_groups();
        assert_eq!(groups.len(), 10);
        let mut seen = Vec::new();
        for (_, spaces) in &groups {
            for &pos in spaces {
                assert!(pos < TOTAL_SPACES);
                assert!(!seen.contains(&pos));
                seen.push(pos);
            }
        }
        assert_eq!(seen.len(), 28);
    }

    #[test]
    fn space_names_line_up_with_constants() {
        assert_eq!(space_name(GO), "Go");
        assert_eq!(space_name(GO_TO_JAIL), "Go To Jail");
        assert_eq!(space_name(BOARDWALK), "Boardwalk");
        assert_eq!(space_name(READING_RAILROAD), "Reading Railroad");
    }
}
