// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A winner that is guaranteed to win a tier, at a fixed rank of the
/// announced list.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Preset {
    /// 1-based rank at which the name is announced.
    pub position: u32,
    pub name: String,
}

/// Main tiers are drawn first, bonus tiers afterwards.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum TierKind {
    Main,
    Bonus,
}

/// One named prize category with a fixed number of winners.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PrizeTier {
    pub id: String,
    /// The label shown to the audience and written in the winners list.
    pub display_name: String,
    pub quantity: u32,
    pub kind: TierKind,
    /// The preset winner is inserted on top of the drawn names, it does not
    /// take the place of a drawn name.
    pub preset: Option<Preset>,
}

// ******** Output data structures *********

#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct WinnerRecord {
    pub prize: String,
    pub winner: String,
}

/// The result of one draw.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DrawOutcome {
    pub tier_label: String,
    /// All the winners of the tier, in announcement order (preset included).
    pub winners: Vec<String>,
    /// How many of the winners were drawn from the pool.
    pub drawn_count: usize,
}

// ******** Session structures *********

/// The page that the operator is looking at.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Phase {
    Setup,
    Drawing,
    Finished,
}

/// The state of the draw engine for the current tier.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum DrawState {
    AwaitingReady,
    Ready,
    Complete,
}

/// The user actions accepted by the session controller.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Action {
    /// A participant list was uploaded.
    Load(Vec<String>),
    Begin,
    Prepare,
    Draw,
    Reset,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Load(_) => "load",
            Action::Begin => "begin",
            Action::Prepare => "prepare",
            Action::Draw => "draw",
            Action::Reset => "reset",
        }
    }
}

/// Errors reported by the engine and the controller.
///
/// None of them is fatal: the session that produced the error is left as it
/// was before the action.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum DrawErrors {
    /// The session or the schedule is not set up correctly.
    Configuration(String),
    /// Nobody left to draw from, or nothing to draw for this tier.
    InsufficientParticipants {
        tier: String,
        pool_size: usize,
        quantity: u32,
    },
    /// A draw was requested before the tier was prepared.
    NotReady,
    /// The action is not accepted in the current phase.
    InvalidAction { action: String, phase: Phase },
}

impl Error for DrawErrors {}

impl Display for DrawErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawErrors::Configuration(msg) => write!(f, "configuration error: {}", msg),
            DrawErrors::InsufficientParticipants {
                tier,
                pool_size,
                quantity,
            } => write!(
                f,
                "not enough participants to draw {}: {} left in the pool, {} requested",
                tier, pool_size, quantity
            ),
            DrawErrors::NotReady => write!(f, "the current prize is not ready to be drawn"),
            DrawErrors::InvalidAction { action, phase } => {
                write!(f, "action {} is not accepted during {:?}", action, phase)
            }
        }
    }
}
