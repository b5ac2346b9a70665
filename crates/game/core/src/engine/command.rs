//! Text command protocol.
//!
//! Commands are whitespace tokenized; the first token is the verb and is
//! matched case-insensitively. Parsing is pure: it never looks at the state.

use std::str::FromStr;

use super::phase::PhaseRule;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{BuildingKind, GridPos, ResourceKind, TargetMode};

/// A parsed text command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help(Option<String>),
    Status,
    Gather(ResourceKind),
    Build {
        kind: BuildingKind,
        pos: GridPos,
        tower_type: Option<String>,
    },
    Upgrade(GridPos),
    Assign(GridPos),
    Unassign(GridPos),
    Hire,
    Explore,
    /// Without an id, lists the research tree.
    Research(Option<String>),
    Learn(String),
    Trade {
        from: ResourceKind,
        to: ResourceKind,
        amount: u32,
    },
    Craft(String),
    Use(String),
    Gift {
        faction: String,
        gold: u32,
    },
    Propose {
        proposal: String,
        faction: String,
    },
    Target(TargetMode),
    End,
    Cast(String),
    Wait,
    /// Expected tower damage at the typing presets.
    Preview { tower: String, level: u32 },
    New(Option<String>),
    Restart,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Type a command. Try 'help'.")]
    Empty,

    #[error("Unknown command '{0}'. Try 'help'.")]
    UnknownVerb(String),

    #[error("Usage: {usage}")]
    Usage { usage: &'static str },

    #[error("'{0}' is not a number.")]
    InvalidNumber(String),

    #[error("Unknown resource '{0}'. Try wood, stone or food.")]
    UnknownResource(String),

    #[error("Unknown building '{0}'.")]
    UnknownBuilding(String),

    #[error("Unknown target mode '{0}'. Try nearest, strongest, weakest, fastest or oldest.")]
    UnknownTargetMode(String),
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use CommandError::*;
        match self {
            Empty => "COMMAND_EMPTY",
            UnknownVerb(_) => "COMMAND_UNKNOWN_VERB",
            Usage { .. } => "COMMAND_USAGE",
            InvalidNumber(_) => "COMMAND_INVALID_NUMBER",
            UnknownResource(_) => "COMMAND_UNKNOWN_RESOURCE",
            UnknownBuilding(_) => "COMMAND_UNKNOWN_BUILDING",
            UnknownTargetMode(_) => "COMMAND_UNKNOWN_TARGET_MODE",
        }
    }
}

/// One help entry per verb.
pub struct VerbHelp {
    pub verb: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
}

pub const VERBS: &[VerbHelp] = &[
    VerbHelp { verb: "help", usage: "help [verb]", summary: "List commands or explain one." },
    VerbHelp { verb: "status", usage: "status", summary: "Show the settlement and the field." },
    VerbHelp { verb: "gather", usage: "gather <wood|stone|food>", summary: "Spend 1 AP gathering a resource." },
    VerbHelp { verb: "build", usage: "build <building> <x> <y> [tower_type]", summary: "Spend 1 AP placing a building." },
    VerbHelp { verb: "upgrade", usage: "upgrade <x> <y>", summary: "Raise a tower's level for gold." },
    VerbHelp { verb: "assign", usage: "assign <x> <y>", summary: "Put a free worker on a building." },
    VerbHelp { verb: "unassign", usage: "unassign <x> <y>", summary: "Take a worker off a building." },
    VerbHelp { verb: "hire", usage: "hire", summary: "Hire a worker for gold and food." },
    VerbHelp { verb: "explore", usage: "explore", summary: "Spend 1 AP and food scouting beyond the walls." },
    VerbHelp { verb: "research", usage: "research [id]", summary: "Show the research tree or start a project." },
    VerbHelp { verb: "learn", usage: "learn <skill>", summary: "Learn a skill for gold." },
    VerbHelp { verb: "trade", usage: "trade <from> <to> <amount>", summary: "Exchange resources at the market." },
    VerbHelp { verb: "craft", usage: "craft <recipe>", summary: "Craft an item." },
    VerbHelp { verb: "use", usage: "use <item>", summary: "Use an item from the inventory." },
    VerbHelp { verb: "gift", usage: "gift <faction> <gold>", summary: "Improve relations with gold." },
    VerbHelp { verb: "propose", usage: "propose <trade|pact|alliance> <faction>", summary: "Offer a faction an agreement." },
    VerbHelp { verb: "target", usage: "target <nearest|strongest|weakest|fastest|oldest>", summary: "Choose how towers pick targets." },
    VerbHelp { verb: "end", usage: "end", summary: "End the day and face the night." },
    VerbHelp { verb: "cast", usage: "cast <spell>", summary: "Cast a spell at night." },
    VerbHelp { verb: "wait", usage: "wait", summary: "Let a night turn pass." },
    VerbHelp { verb: "preview", usage: "preview <tower> [level]", summary: "Estimate a tower's damage at a few typing speeds." },
    VerbHelp { verb: "new", usage: "new [seed]", summary: "Start a new game." },
    VerbHelp { verb: "restart", usage: "restart", summary: "Restart with the current seed." },
];

pub fn verb_help(verb: &str) -> Option<&'static VerbHelp> {
    VERBS.iter().find(|entry| entry.verb.eq_ignore_ascii_case(verb))
}

fn usage(verb: &str) -> CommandError {
    CommandError::Usage {
        usage: verb_help(verb).map(|entry| entry.usage).unwrap_or("help"),
    }
}

fn number<T: FromStr>(token: &str) -> Result<T, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidNumber(token.to_string()))
}

fn resource(token: &str) -> Result<ResourceKind, CommandError> {
    ResourceKind::from_str(token).map_err(|_| CommandError::UnknownResource(token.to_string()))
}

fn position(verb: &str, x: Option<&str>, y: Option<&str>) -> Result<GridPos, CommandError> {
    match (x, y) {
        (Some(x), Some(y)) => Ok(GridPos::new(number(x)?, number(y)?)),
        _ => Err(usage(verb)),
    }
}

impl Command {
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let mut tokens = text.split_whitespace();
        let verb = tokens.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let args: Vec<&str> = tokens.collect();
        let arg = |i: usize| args.get(i).copied();
        let required = |i: usize| arg(i).ok_or_else(|| usage(&verb));

        let command = match verb.as_str() {
            "help" => Command::Help(arg(0).map(str::to_ascii_lowercase)),
            "status" => Command::Status,
            "gather" => Command::Gather(resource(required(0)?)?),
            "build" => {
                let name = required(0)?;
                let kind = BuildingKind::from_str(name)
                    .map_err(|_| CommandError::UnknownBuilding(name.to_string()))?;
                let pos = position(&verb, arg(1), arg(2))?;
                Command::Build {
                    kind,
                    pos,
                    tower_type: arg(3).map(str::to_ascii_lowercase),
                }
            }
            "upgrade" => Command::Upgrade(position(&verb, arg(0), arg(1))?),
            "assign" => Command::Assign(position(&verb, arg(0), arg(1))?),
            "unassign" => Command::Unassign(position(&verb, arg(0), arg(1))?),
            "hire" => Command::Hire,
            "explore" => Command::Explore,
            "research" => Command::Research(arg(0).map(str::to_ascii_lowercase)),
            "learn" => Command::Learn(required(0)?.to_ascii_lowercase()),
            "trade" => Command::Trade {
                from: resource(required(0)?)?,
                to: resource(required(1)?)?,
                amount: number(required(2)?)?,
            },
            "craft" => Command::Craft(required(0)?.to_ascii_lowercase()),
            "use" => Command::Use(required(0)?.to_ascii_lowercase()),
            "gift" => Command::Gift {
                faction: required(0)?.to_ascii_lowercase(),
                gold: number(required(1)?)?,
            },
            "propose" => Command::Propose {
                proposal: required(0)?.to_ascii_lowercase(),
                faction: required(1)?.to_ascii_lowercase(),
            },
            "target" => {
                let mode = required(0)?;
                Command::Target(
                    TargetMode::from_str(mode)
                        .map_err(|_| CommandError::UnknownTargetMode(mode.to_string()))?,
                )
            }
            "end" => Command::End,
            "cast" => Command::Cast(required(0)?.to_ascii_lowercase()),
            "wait" => Command::Wait,
            "preview" => Command::Preview {
                tower: required(0)?.to_ascii_lowercase(),
                level: match arg(1) {
                    Some(level) => number(level)?,
                    None => 1,
                },
            },
            "new" => Command::New(arg(0).map(str::to_string)),
            "restart" => Command::Restart,
            _ => return Err(CommandError::UnknownVerb(verb.clone())),
        };
        Ok(command)
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Command::Help(_) => "help",
            Command::Status => "status",
            Command::Gather(_) => "gather",
            Command::Build { .. } => "build",
            Command::Upgrade(_) => "upgrade",
            Command::Assign(_) => "assign",
            Command::Unassign(_) => "unassign",
            Command::Hire => "hire",
            Command::Explore => "explore",
            Command::Research(_) => "research",
            Command::Learn(_) => "learn",
            Command::Trade { .. } => "trade",
            Command::Craft(_) => "craft",
            Command::Use(_) => "use",
            Command::Gift { .. } => "gift",
            Command::Propose { .. } => "propose",
            Command::Target(_) => "target",
            Command::End => "end",
            Command::Cast(_) => "cast",
            Command::Wait => "wait",
            Command::Preview { .. } => "preview",
            Command::New(_) => "new",
            Command::Restart => "restart",
        }
    }

    pub fn phase_rule(&self) -> PhaseRule {
        match self {
            Command::Help(_) | Command::Status | Command::New(_) | Command::Restart => {
                PhaseRule::Always
            }
            Command::Target(_) => PhaseRule::Live,
            Command::Cast(_) | Command::Wait => PhaseRule::Night,
            Command::Research(None) | Command::Preview { .. } => PhaseRule::Always,
            _ => PhaseRule::Day,
        }
    }

    /// Commands that only report and never mutate.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Command::Help(_)
                | Command::Status
                | Command::Research(None)
                | Command::Preview { .. }
        )
    }
}

/// Help lines for every verb, or the usage of one.
pub fn help_lines(verb: Option<&str>) -> Vec<String> {
    match verb {
        Some(verb) => match verb_help(verb) {
            Some(entry) => vec![format!("{}: {}", entry.usage, entry.summary)],
            None => vec![format!("No help for '{verb}'. Type 'help' for all commands.")],
        },
        None => {
            let mut lines = vec!["Commands:".to_string()];
            lines.extend(
                VERBS
                    .iter()
                    .map(|entry| format!("  {:<48} {}", entry.usage, entry.summary)),
            );
            lines.push("At night, type an enemy's word to strike it.".to_string());
            lines
        }
    }
}
