use std::fmt;

/// Discrete grid position on the settlement map, expressed in tile coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    pub fn in_bounds(self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as u32) < width && (self.y as u32) < height
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Row-major tile index used as the key for everything placed on the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructureIndex(pub u32);

impl StructureIndex {
    /// Returns `None` when the position lies outside a `width` x `height` grid.
    pub fn from_pos(pos: GridPos, width: u32, height: u32) -> Option<Self> {
        pos.in_bounds(width, height)
            .then(|| Self(pos.y as u32 * width + pos.x as u32))
    }

    pub fn to_pos(self, width: u32) -> GridPos {
        let width = width.max(1);
        GridPos::new((self.0 % width) as i32, (self.0 / width) as i32)
    }
}

/// Gatherable stockpile resources. Gold is tracked separately.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResourceKind {
    Wood,
    Stone,
    Food,
}

/// Stockpile amounts. Also used as the resource half of a [`crate::Cost`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Resources {
    pub wood: u32,
    pub stone: u32,
    pub food: u32,
}

impl Resources {
    pub fn new(wood: u32, stone: u32, food: u32) -> Self {
        Self { wood, stone, food }
    }

    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Wood => self.wood,
            ResourceKind::Stone => self.stone,
            ResourceKind::Food => self.food,
        }
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Wood => &mut self.wood,
            ResourceKind::Stone => &mut self.stone,
            ResourceKind::Food => &mut self.food,
        }
    }

    /// Adds `amount`, saturating at `u32::MAX`.
    pub fn credit(&mut self, kind: ResourceKind, amount: u32) {
        let slot = self.get_mut(kind);
        *slot = slot.saturating_add(amount);
    }

    /// Returns true when every component of `other` is covered.
    pub fn covers(&self, other: &Resources) -> bool {
        self.wood >= other.wood && self.stone >= other.stone && self.food >= other.food
    }

    pub fn is_empty(&self) -> bool {
        self.wood == 0 && self.stone == 0 && self.food == 0
    }

    /// Non-zero components in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        [
            (ResourceKind::Wood, self.wood),
            (ResourceKind::Stone, self.stone),
            (ResourceKind::Food, self.food),
        ]
        .into_iter()
        .filter(|(_, amount)| *amount > 0)
    }
}

/// Placeable building kinds.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BuildingKind {
    Farm,
    #[strum(to_string = "lumber_mill", serialize = "lumber")]
    LumberMill,
    Quarry,
    House,
    Wall,
    Market,
    Tower,
}

/// How towers pick targets during a volley.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetMode {
    /// Smallest distance first.
    #[default]
    Nearest,
    /// Highest current hp first.
    Strongest,
    /// Lowest current hp first.
    Weakest,
    /// Highest speed first.
    Fastest,
    /// Earliest spawned first.
    Oldest,
}

/// Diplomatic agreements. Unlocks are monotonic; `War` exists in the model
/// but no player command creates it.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AgreementKind {
    TradeAgreement,
    NonAggression,
    Alliance,
    War,
}

impl AgreementKind {
    /// Maps the `propose` keyword onto an agreement.
    pub fn from_proposal(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "trade" => Some(Self::TradeAgreement),
            "pact" => Some(Self::NonAggression),
            "alliance" => Some(Self::Alliance),
            _ => None,
        }
    }
}

/// Top-level phase of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    #[default]
    Day,
    Night,
    /// Absorbing.
    Victory,
    /// Absorbing.
    GameOver,
}

impl Phase {
    /// Day or Night; the run can still change.
    pub fn is_live(self) -> bool {
        matches!(self, Self::Day | Self::Night)
    }
}

/// Which wave policy drives the run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameMode {
    #[default]
    Campaign,
    /// A single scripted wave described by a `WaveProfile`.
    VerticalSlice { profile_id: String },
    Endless,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Campaign => f.write_str("campaign"),
            Self::VerticalSlice { profile_id } => write!(f, "vertical slice ({profile_id})"),
            Self::Endless => f.write_str("endless"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_index_round_trips_positions() {
        let pos = GridPos::new(3, 2);
        let index = StructureIndex::from_pos(pos, 16, 10).expect("in bounds");
        assert_eq!(index, StructureIndex(35));
        assert_eq!(index.to_pos(16), pos);
        assert_eq!(StructureIndex::from_pos(GridPos::new(16, 0), 16, 10), None);
        assert_eq!(StructureIndex::from_pos(GridPos::new(-1, 0), 16, 10), None);
    }

    #[test]
    fn building_kind_parses_aliases() {
        assert_eq!("lumber".parse::<BuildingKind>().ok(), Some(BuildingKind::LumberMill));
        assert_eq!("Lumber_Mill".parse::<BuildingKind>().ok(), Some(BuildingKind::LumberMill));
        assert_eq!(BuildingKind::LumberMill.to_string(), "lumber_mill");
        assert!("castle".parse::<BuildingKind>().is_err());
    }

    #[test]
    fn proposal_keywords_map_to_agreements() {
        assert_eq!(
            AgreementKind::from_proposal("PACT"),
            Some(AgreementKind::NonAggression)
        );
        assert_eq!(AgreementKind::from_proposal("war"), None);
    }
}
