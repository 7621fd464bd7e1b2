use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub const DEFAULT_PAR: i32 = 4;
pub const DEFAULT_CLUB: &str = "7I";
pub const DEFAULT_SATISFACTION: u8 = 3;

static BULK_PAR_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;\s]+").expect("separator pattern is valid"));
static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\D+").expect("digit pattern is valid"));

/// Hole counts offered by the scorecard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HoleCount {
    Nine,
    #[default]
    Eighteen,
}

impl HoleCount {
    #[must_use]
    pub fn count(self) -> usize {
        match self {
            Self::Nine => 9,
            Self::Eighteen => 18,
        }
    }

    #[must_use]
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            9 => Some(Self::Nine),
            18 => Some(Self::Eighteen),
            _ => None,
        }
    }
}

impl fmt::Display for HoleCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

impl FromStr for HoleCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(Self::from_count)
            .ok_or_else(|| format!("hole count must be 9 or 18, got `{s}`"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Terrain {
    #[default]
    Fairway,
    Rough,
    Bunker,
    Green,
    Fringe,
    Hazard,
}

impl Terrain {
    pub const ALL: [Terrain; 6] = [
        Terrain::Fairway,
        Terrain::Rough,
        Terrain::Bunker,
        Terrain::Green,
        Terrain::Fringe,
        Terrain::Hazard,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fairway => "Fairway",
            Self::Rough => "Rough",
            Self::Bunker => "Bunker",
            Self::Green => "Green",
            Self::Fringe => "Fringe",
            Self::Hazard => "Hazard",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Terrain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown terrain `{s}`"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwingRecord {
    /// Free-form; may name a club that has since been removed from the club set.
    pub club: String,
    pub terrain: Terrain,
    pub satisfaction: u8,
    pub notes: String,
}

impl Default for SwingRecord {
    fn default() -> Self {
        Self {
            club: DEFAULT_CLUB.to_string(),
            terrain: Terrain::Fairway,
            satisfaction: DEFAULT_SATISFACTION,
            notes: String::new(),
        }
    }
}

/// A single-field edit of one swing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwingUpdate {
    Club(String),
    Terrain(Terrain),
    Satisfaction(u8),
    Notes(String),
}

impl SwingUpdate {
    /// Builds an update from a form field name and raw value. Invalid values yield `None`.
    #[must_use]
    pub fn parse(field: &str, value: &str) -> Option<Self> {
        match field {
            "club" => Some(Self::Club(value.to_string())),
            "terrain" => value.parse().ok().map(Self::Terrain),
            "satisfaction" | "feel" => value
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|v| (1..=5).contains(v))
                .map(Self::Satisfaction),
            "notes" => Some(Self::Notes(value.to_string())),
            _ => None,
        }
    }

    pub fn apply(&self, swing: &mut SwingRecord) {
        match self {
            Self::Club(club) => swing.club.clone_from(club),
            Self::Terrain(terrain) => swing.terrain = *terrain,
            Self::Satisfaction(value) => swing.satisfaction = *value,
            Self::Notes(notes) => swing.notes.clone_from(notes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleRecord {
    pub par: i32,
    pub swings: Vec<SwingRecord>,
    #[serde(default)]
    pub completed: bool,
}

impl Default for HoleRecord {
    fn default() -> Self {
        Self {
            par: DEFAULT_PAR,
            swings: Vec::new(),
            completed: false,
        }
    }
}

impl HoleRecord {
    #[must_use]
    pub fn strokes(&self) -> usize {
        self.swings.len()
    }

    /// Strokes minus par; meaningless while no swings are recorded.
    #[must_use]
    pub fn to_par(&self) -> i32 {
        i32::try_from(self.strokes()).unwrap_or(i32::MAX) - self.par
    }
}

/// All hole records of one game, index 0 being hole 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Round {
    holes: Vec<HoleRecord>,
}

impl Round {
    #[must_use]
    pub fn with_holes(count: usize) -> Self {
        Self {
            holes: vec![HoleRecord::default(); count],
        }
    }

    #[must_use]
    pub fn from_holes(holes: Vec<HoleRecord>) -> Self {
        Self { holes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.holes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }

    #[must_use]
    pub fn holes(&self) -> &[HoleRecord] {
        &self.holes
    }

    #[must_use]
    pub fn hole(&self, index: usize) -> Option<&HoleRecord> {
        self.holes.get(index)
    }

    pub fn hole_mut(&mut self, index: usize) -> Option<&mut HoleRecord> {
        self.holes.get_mut(index)
    }

    /// Keeps records below the new length, pads with defaults, drops the rest.
    pub fn resize(&mut self, count: usize) {
        self.holes.resize_with(count, HoleRecord::default);
    }

    /// Overwrites pars from a list such as `"4,4,3,5"`.
    ///
    /// Each token has its non-digit runs stripped; a token without digits leaves that
    /// hole's par alone. Returns how many pars were written.
    pub fn apply_bulk_pars(&mut self, input: &str) -> usize {
        let mut written = 0;
        let tokens = BULK_PAR_SEPARATORS
            .split(input.trim())
            .filter(|t| !t.is_empty());
        for (hole, token) in self.holes.iter_mut().zip(tokens) {
            let digits = NON_DIGITS.replace_all(token, "");
            if let Ok(par) = digits.parse::<i32>() {
                hole.par = par;
                written += 1;
            }
        }
        written
    }

    #[must_use]
    pub fn total_par(&self) -> i32 {
        self.holes.iter().map(|h| h.par).sum()
    }

    #[must_use]
    pub fn total_strokes(&self) -> usize {
        self.holes.iter().map(HoleRecord::strokes).sum()
    }

    #[must_use]
    pub fn completed_holes(&self) -> usize {
        self.holes.iter().filter(|h| h.completed).count()
    }
}
