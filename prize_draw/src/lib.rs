/*!
Draw sequencing for prize raffles.

A raffle is a fixed [PrizeSchedule] of tiers, drawn one after the other from
a [ParticipantPool]. Winners are taken out of the pool as soon as they are
drawn. A bonus tier may carry a preset winner: this name never enters the
pool and is inserted at a fixed rank in the list of drawn names.

The [DrawEngine] runs one tier at a time and the [SessionController] drives
the whole session from the setup page to the final winners list:

```
use prize_draw::builder::ScheduleBuilder;
use prize_draw::*;

let schedule = ScheduleBuilder::new()
    .main_tier("Fifth Prize", 2)
    .bonus_tier("Tommy Bonus 5000", 2, Some((2, "Johnson")))
    .build()?;
let mut controller = SessionController::with_seed(schedule, Some(42));

let names: Vec<String> = ["Anna", "Bob", "Clara", "Dan", "Johnson"]
    .iter()
    .map(|s| s.to_string())
    .collect();
let mut state = controller.initial_state();
for action in [Action::Load(names), Action::Begin] {
    state = controller.handle(&state, &action)?;
}
while state.phase() == Phase::Drawing {
    state = controller.handle(&state, &Action::Prepare)?;
    state = controller.handle(&state, &Action::Draw)?;
}
assert_eq!(state.winners().len(), 5);
# Ok::<(), DrawErrors>(())
```

For more details, see the [manual].
*/

pub mod builder;
mod config;
pub mod manual;
mod pool;
mod schedule;
mod session;

use log::{debug, info, warn};
use rand::Rng;

pub use crate::config::*;
pub use crate::pool::ParticipantPool;
pub use crate::schedule::PrizeSchedule;
pub use crate::session::{SessionController, SessionState};

/// Runs the draws of a schedule, one tier at a time.
///
/// The engine itself holds no state: everything that changes during a draw
/// lives in the [SessionState] that is passed to it.
#[derive(Debug, Clone, Copy)]
pub struct DrawEngine<'a> {
    schedule: &'a PrizeSchedule,
}

impl<'a> DrawEngine<'a> {
    pub fn new(schedule: &'a PrizeSchedule) -> DrawEngine<'a> {
        DrawEngine { schedule }
    }

    pub fn state(&self, session: &SessionState) -> DrawState {
        if session.tier_index >= self.schedule.size() {
            DrawState::Complete
        } else if session.ready {
            DrawState::Ready
        } else {
            DrawState::AwaitingReady
        }
    }

    /// Marks the current tier as ready to be drawn. Calling it again has no
    /// effect.
    pub fn prepare(&self, session: &mut SessionState) -> Result<DrawState, DrawErrors> {
        match self.state(session) {
            DrawState::Complete => Err(DrawErrors::InvalidAction {
                action: Action::Prepare.name().to_string(),
                phase: Phase::Finished,
            }),
            DrawState::Ready => Ok(DrawState::Ready),
            DrawState::AwaitingReady => {
                session.ready = true;
                debug!("prepare: tier {} is ready", session.tier_index);
                Ok(DrawState::Ready)
            }
        }
    }

    /// Draws the winners of the current tier.
    ///
    /// The draw is atomic: either the pool, the winners list and the tier
    /// index are all updated, or nothing changes at all.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        session: &mut SessionState,
        rng: &mut R,
    ) -> Result<DrawOutcome, DrawErrors> {
        if self.state(session) != DrawState::Ready {
            return Err(DrawErrors::NotReady);
        }
        let tier = self
            .schedule
            .tier_at(session.tier_index)
            .ok_or(DrawErrors::NotReady)?;
        let pool = session
            .pool
            .as_mut()
            .ok_or_else(|| DrawErrors::Configuration("no participant list loaded".to_string()))?;

        if pool.is_empty() || tier.quantity == 0 {
            warn!(
                "draw: cannot draw {}: pool size {}, quantity {}",
                tier.display_name,
                pool.size(),
                tier.quantity
            );
            return Err(DrawErrors::InsufficientParticipants {
                tier: tier.display_name.clone(),
                pool_size: pool.size(),
                quantity: tier.quantity,
            });
        }

        let drawn = pool.sample_without_replacement(tier.quantity as usize, rng);
        let drawn_count = drawn.len();
        let mut winners = drawn.clone();
        if let Some(preset) = &tier.preset {
            let idx = insertion_index(preset.position, drawn_count);
            debug!(
                "draw: inserting preset winner {:?} at index {} of {}",
                preset.name, idx, drawn_count
            );
            winners.insert(idx, preset.name.clone());
        }
        // The preset winner was never in the pool.
        pool.remove(&drawn);

        info!(
            "draw: {} -> {} winner(s), {} left in the pool",
            tier.display_name,
            winners.len(),
            pool.size()
        );

        session
            .winners
            .extend(winners.iter().map(|w| WinnerRecord {
                prize: tier.display_name.clone(),
                winner: w.clone(),
            }));
        let outcome = DrawOutcome {
            tier_label: tier.display_name.clone(),
            winners,
            drawn_count,
        };
        session.last_draw = Some(outcome.clone());
        session.tier_index += 1;
        session.ready = false;

        Ok(outcome)
    }
}

/// The index at which a preset winner is inserted. Positions beyond the
/// drawn names are clamped to the end of the list.
fn insertion_index(position: u32, drawn_count: usize) -> usize {
    (position.saturating_sub(1) as usize).min(drawn_count)
}
