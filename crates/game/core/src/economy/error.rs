use crate::error::{ErrorSeverity, GameError};
use crate::state::{BuildingKind, GridPos, ResourceKind};

/// Errors surfaced by day-phase economy actions.
///
/// Display text is shown to the player as the single rejection event.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EconomyError {
    #[error("Not enough gold: need {need}, have {have}.")]
    InsufficientGold { need: u32, have: u32 },

    #[error("Not enough {kind}: need {need}, have {have}.")]
    InsufficientResource {
        kind: ResourceKind,
        need: u32,
        have: u32,
    },

    #[error("No action points left today. Type 'end' to face the night.")]
    NoActionPoints,

    #[error("{pos} is outside the settlement.")]
    OutOfBounds { pos: GridPos },

    #[error("{pos} is already occupied.")]
    TileOccupied { pos: GridPos },

    #[error("There is no structure at {pos}.")]
    NoStructure { pos: GridPos },

    #[error("The structure at {pos} is not a tower.")]
    NotATower { pos: GridPos },

    #[error("That tower is already at the maximum level ({max}).")]
    TowerMaxLevel { max: u32 },

    #[error("Unknown tower type '{0}'.")]
    UnknownTowerType(String),

    #[error("Unknown building '{0}'.")]
    UnknownBuilding(String),

    #[error("No free workers. Hire more or unassign someone.")]
    NoFreeWorkers,

    #[error("The {building} has no free worker slots.")]
    NoWorkerSlots { building: BuildingKind },

    #[error("Nobody is working at {pos}.")]
    NoWorkersAssigned { pos: GridPos },

    #[error("Housing is full ({max} workers). Build a house first.")]
    HousingFull { max: u32 },

    #[error("You need a market to trade.")]
    MarketRequired,

    #[error("Trade between two different resources.")]
    SameResource,

    #[error("Amount must be greater than zero.")]
    InvalidAmount,

    #[error("Trading {amount} would return nothing at the current rate.")]
    TradeTooSmall { amount: u32 },

    #[error("Unknown recipe '{0}'.")]
    UnknownRecipe(String),

    #[error("Unknown item '{0}'.")]
    UnknownItem(String),

    #[error("You have no {0}.")]
    ItemNotOwned(String),

    #[error("You are already at full health.")]
    AlreadyAtFullHealth,

    #[error("There is no active research to advance.")]
    NoActiveResearch,
}

impl GameError for EconomyError {
    fn severity(&self) -> ErrorSeverity {
        use EconomyError::*;
        match self {
            InsufficientGold { .. }
            | InsufficientResource { .. }
            | NoActionPoints
            | TileOccupied { .. }
            | NoFreeWorkers
            | NoWorkerSlots { .. }
            | NoWorkersAssigned { .. }
            | HousingFull { .. }
            | MarketRequired
            | TowerMaxLevel { .. }
            | ItemNotOwned(_)
            | AlreadyAtFullHealth
            | NoActiveResearch
            | TradeTooSmall { .. } => ErrorSeverity::Recoverable,
            OutOfBounds { .. }
            | NoStructure { .. }
            | NotATower { .. }
            | UnknownTowerType(_)
            | UnknownBuilding(_)
            | SameResource
            | InvalidAmount
            | UnknownRecipe(_)
            | UnknownItem(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use EconomyError::*;
        match self {
            InsufficientGold { .. } => "ECONOMY_INSUFFICIENT_GOLD",
            InsufficientResource { .. } => "ECONOMY_INSUFFICIENT_RESOURCE",
            NoActionPoints => "ECONOMY_NO_ACTION_POINTS",
            OutOfBounds { .. } => "ECONOMY_OUT_OF_BOUNDS",
            TileOccupied { .. } => "ECONOMY_TILE_OCCUPIED",
            NoStructure { .. } => "ECONOMY_NO_STRUCTURE",
            NotATower { .. } => "ECONOMY_NOT_A_TOWER",
            TowerMaxLevel { .. } => "ECONOMY_TOWER_MAX_LEVEL",
            UnknownTowerType(_) => "ECONOMY_UNKNOWN_TOWER_TYPE",
            UnknownBuilding(_) => "ECONOMY_UNKNOWN_BUILDING",
            NoFreeWorkers => "ECONOMY_NO_FREE_WORKERS",
            NoWorkerSlots { .. } => "ECONOMY_NO_WORKER_SLOTS",
            NoWorkersAssigned { .. } => "ECONOMY_NO_WORKERS_ASSIGNED",
            HousingFull { .. } => "ECONOMY_HOUSING_FULL",
            MarketRequired => "ECONOMY_MARKET_REQUIRED",
            SameResource => "ECONOMY_SAME_RESOURCE",
            InvalidAmount => "ECONOMY_INVALID_AMOUNT",
            TradeTooSmall { .. } => "ECONOMY_TRADE_TOO_SMALL",
            UnknownRecipe(_) => "ECONOMY_UNKNOWN_RECIPE",
            UnknownItem(_) => "ECONOMY_UNKNOWN_ITEM",
            ItemNotOwned(_) => "ECONOMY_ITEM_NOT_OWNED",
            AlreadyAtFullHealth => "ECONOMY_ALREADY_AT_FULL_HEALTH",
            NoActiveResearch => "ECONOMY_NO_ACTIVE_RESEARCH",
        }
    }
}
