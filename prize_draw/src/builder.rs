pub use crate::config::*;
use crate::schedule::PrizeSchedule;

use std::collections::HashSet;

/// A builder for prize schedules.
///
/// Main tiers and bonus tiers can be added in any order: main tiers are
/// always drawn before the bonus tiers.
///
/// ```
/// pub use prize_draw::builder::ScheduleBuilder;
/// # use prize_draw::DrawErrors;
///
/// let schedule = ScheduleBuilder::new()
///     .main_tier("Fifth Prize", 20)
///     .main_tier("First Prize", 1)
///     .bonus_tier("Tommy Bonus 5000", 5, Some((2, "Johnson")))
///     .build()?;
///
/// assert_eq!(schedule.size(), 3);
/// # Ok::<(), DrawErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    pub(crate) _main: Vec<PrizeTier>,
    pub(crate) _bonus: Vec<PrizeTier>,
}

impl ScheduleBuilder {
    pub fn new() -> ScheduleBuilder {
        ScheduleBuilder::default()
    }

    /// Adds a main tier whose label is its id.
    pub fn main_tier(self, id: &str, quantity: u32) -> ScheduleBuilder {
        self.tier(PrizeTier {
            id: id.to_string(),
            display_name: id.to_string(),
            quantity,
            kind: TierKind::Main,
            preset: None,
        })
    }

    /// Adds a bonus tier, with an optional preset winner given as
    /// (1-based position, name).
    pub fn bonus_tier(self, id: &str, quantity: u32, preset: Option<(u32, &str)>) -> ScheduleBuilder {
        self.tier(PrizeTier {
            id: id.to_string(),
            display_name: id.to_string(),
            quantity,
            kind: TierKind::Bonus,
            preset: preset.map(|(position, name)| Preset {
                position,
                name: name.to_string(),
            }),
        })
    }

    /// Adds a fully described tier.
    pub fn tier(mut self, tier: PrizeTier) -> ScheduleBuilder {
        match tier.kind {
            TierKind::Main => self._main.push(tier),
            TierKind::Bonus => self._bonus.push(tier),
        }
        self
    }

    pub fn build(self) -> Result<PrizeSchedule, DrawErrors> {
        let mut ids: HashSet<&str> = HashSet::new();
        for t in self._main.iter().chain(self._bonus.iter()) {
            if !ids.insert(t.id.as_str()) {
                return Err(DrawErrors::Configuration(format!(
                    "prize {} is defined more than once",
                    t.id
                )));
            }
            if let Some(p) = &t.preset {
                if p.position == 0 {
                    return Err(DrawErrors::Configuration(format!(
                        "preset winner {} of prize {}: positions start at 1",
                        p.name, t.id
                    )));
                }
                if p.name.is_empty() {
                    return Err(DrawErrors::Configuration(format!(
                        "prize {} has a preset winner without a name",
                        t.id
                    )));
                }
            }
        }
        Ok(PrizeSchedule::new(self._main, self._bonus))
    }
}
