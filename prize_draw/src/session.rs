use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::*;
use crate::pool::ParticipantPool;
use crate::schedule::PrizeSchedule;
use crate::DrawEngine;

/// Everything that changes during a session.
///
/// The state is a plain value: the controller takes it by reference and
/// hands back the next one, so a failed action leaves the previous state
/// untouched.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SessionState {
    pub(crate) phase: Phase,
    // None until a participant list has been uploaded.
    pub(crate) pool: Option<ParticipantPool>,
    pub(crate) tier_index: usize,
    pub(crate) ready: bool,
    pub(crate) winners: Vec<WinnerRecord>,
    // The last draw, until the next tier is prepared.
    pub(crate) last_draw: Option<DrawOutcome>,
}

impl SessionState {
    pub fn new() -> SessionState {
        SessionState {
            phase: Phase::Setup,
            pool: None,
            tier_index: 0,
            ready: false,
            winners: Vec::new(),
            last_draw: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pool(&self) -> Option<&ParticipantPool> {
        self.pool.as_ref()
    }

    pub fn tier_index(&self) -> usize {
        self.tier_index
    }

    pub fn winners(&self) -> &[WinnerRecord] {
        &self.winners
    }

    pub fn last_draw(&self) -> Option<&DrawOutcome> {
        self.last_draw.as_ref()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::new()
    }
}

/// Drives a session from the setup page to the final list of winners.
///
/// Every user action goes through [SessionController::handle]. The
/// controller owns the schedule and the random generator, the session state
/// is owned by the caller.
#[derive(Debug, Clone)]
pub struct SessionController<R: Rng> {
    schedule: PrizeSchedule,
    rng: R,
}

impl SessionController<StdRng> {
    /// Uses a seeded generator when a seed is provided, which makes all the
    /// draws reproducible.
    pub fn with_seed(schedule: PrizeSchedule, seed: Option<u64>) -> SessionController<StdRng> {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        SessionController::new(schedule, rng)
    }
}

impl<R: Rng> SessionController<R> {
    pub fn new(schedule: PrizeSchedule, rng: R) -> SessionController<R> {
        SessionController { schedule, rng }
    }

    pub fn schedule(&self) -> &PrizeSchedule {
        &self.schedule
    }

    pub fn initial_state(&self) -> SessionState {
        SessionState::new()
    }

    /// Applies one user action and returns the next state.
    pub fn handle(
        &mut self,
        state: &SessionState,
        action: &Action,
    ) -> Result<SessionState, DrawErrors> {
        debug!("handle: {} during {:?}", action.name(), state.phase);
        let mut next = state.clone();
        match (state.phase, action) {
            (_, Action::Reset) => {
                info!("handle: back to setup");
                next = SessionState::new();
            }
            (Phase::Setup, Action::Load(names)) => {
                let pool = ParticipantPool::initialize(names, &self.schedule.preset_names());
                info!(
                    "handle: loaded {} participants ({} eligible)",
                    names.len(),
                    pool.size()
                );
                next.pool = Some(pool);
            }
            (Phase::Setup, Action::Begin) => {
                if state.pool.is_none() {
                    return Err(DrawErrors::Configuration(
                        "no participant list loaded".to_string(),
                    ));
                }
                next.tier_index = 0;
                next.ready = false;
                next.winners.clear();
                next.last_draw = None;
                next.phase = if self.schedule.size() == 0 {
                    Phase::Finished
                } else {
                    Phase::Drawing
                };
                info!("handle: starting the draws, {} prizes", self.schedule.size());
            }
            (Phase::Drawing, Action::Prepare) => {
                DrawEngine::new(&self.schedule).prepare(&mut next)?;
                next.last_draw = None;
            }
            (Phase::Drawing, Action::Draw) => {
                let engine = DrawEngine::new(&self.schedule);
                engine.draw(&mut next, &mut self.rng)?;
                if engine.state(&next) == DrawState::Complete {
                    info!("handle: all the prizes have been drawn");
                    next.phase = Phase::Finished;
                }
            }
            (phase, action) => {
                return Err(DrawErrors::InvalidAction {
                    action: action.name().to_string(),
                    phase,
                });
            }
        }
        Ok(next)
    }

    pub fn current_phase(&self, state: &SessionState) -> Phase {
        state.phase
    }

    /// The tier being drawn, if any.
    pub fn current_tier(&self, state: &SessionState) -> Option<&PrizeTier> {
        match state.phase {
            Phase::Drawing => self.schedule.tier_at(state.tier_index),
            _ => None,
        }
    }

    pub fn current_tier_label(&self, state: &SessionState) -> Option<&str> {
        self.current_tier(state).map(|t| t.display_name.as_str())
    }

    /// The number of winners announced for the tier being drawn.
    pub fn current_tier_remaining_quantity(&self, state: &SessionState) -> Option<u32> {
        self.current_tier(state).map(|t| t.quantity)
    }

    /// The winners of the last draw, empty once the next tier is prepared.
    pub fn pending_winners<'s>(&self, state: &'s SessionState) -> &'s [String] {
        state
            .last_draw
            .as_ref()
            .map(|o| o.winners.as_slice())
            .unwrap_or(&[])
    }

    /// The tier label and winners of the last draw.
    pub fn last_draw<'s>(&self, state: &'s SessionState) -> Option<&'s DrawOutcome> {
        state.last_draw.as_ref()
    }

    pub fn all_winners<'s>(&self, state: &'s SessionState) -> &'s [WinnerRecord] {
        &state.winners
    }

    pub fn is_ready_to_draw(&self, state: &SessionState) -> bool {
        state.phase == Phase::Drawing
            && DrawEngine::new(&self.schedule).state(state) == DrawState::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ScheduleBuilder;
    use std::collections::HashSet;

    fn names(l: &[&str]) -> Vec<String> {
        l.iter().map(|s| s.to_string()).collect()
    }

    fn event_schedule() -> PrizeSchedule {
        ScheduleBuilder::new()
            .main_tier("五等獎", 3)
            .main_tier("一等獎", 1)
            .bonus_tier("Tommy加彩5000", 2, Some((2, "Johnson")))
            .bonus_tier("Jamie加彩5000", 2, Some((1, "Lunar")))
            .build()
            .unwrap()
    }

    fn step(
        c: &mut SessionController<StdRng>,
        s: SessionState,
        actions: &[Action],
    ) -> SessionState {
        actions
            .iter()
            .fold(s, |s, a| c.handle(&s, a).unwrap())
    }

    #[test]
    fn full_session() {
        let mut c = SessionController::with_seed(event_schedule(), Some(1));
        let participants = names(&["A", "B", "C", "D", "E", "F", "G", "H", "Johnson", "Lunar"]);
        let mut s = step(
            &mut c,
            SessionState::new(),
            &[Action::Load(participants), Action::Begin],
        );
        assert_eq!(c.current_phase(&s), Phase::Drawing);
        assert_eq!(s.pool().map(|p| p.size()), Some(8));
        assert_eq!(c.current_tier_label(&s), Some("五等獎"));
        assert_eq!(c.current_tier_remaining_quantity(&s), Some(3));

        while c.current_phase(&s) == Phase::Drawing {
            let index = s.tier_index();
            s = step(&mut c, s, &[Action::Prepare]);
            assert!(c.is_ready_to_draw(&s));
            s = step(&mut c, s, &[Action::Draw]);
            assert_eq!(s.tier_index(), index + 1);
            assert!(!c.pending_winners(&s).is_empty());
            let outcome = c.last_draw(&s).unwrap();
            assert_eq!(
                Some(outcome.tier_label.as_str()),
                c.schedule().tier_at(index).map(|t| t.display_name.as_str())
            );
            assert_eq!(outcome.winners, c.pending_winners(&s));
        }

        assert_eq!(c.current_phase(&s), Phase::Finished);
        // 3 + 1 + (2 + 1) + (2 + 1)
        assert_eq!(c.all_winners(&s).len(), 10);
        let distinct: HashSet<&String> = c.all_winners(&s).iter().map(|w| &w.winner).collect();
        assert_eq!(distinct.len(), 10);
        assert_eq!(c.all_winners(&s)[5].winner, "Johnson");
        assert_eq!(c.all_winners(&s)[5].prize, "Tommy加彩5000");
        assert_eq!(c.all_winners(&s)[7].winner, "Lunar");
        assert_eq!(c.current_tier_label(&s), None);
    }

    #[test]
    fn pool_runs_out() {
        let mut c = SessionController::with_seed(event_schedule(), Some(2));
        let mut s = step(
            &mut c,
            SessionState::new(),
            &[Action::Load(names(&["A", "B"])), Action::Begin],
        );
        s = step(&mut c, s, &[Action::Prepare, Action::Draw]);
        assert_eq!(s.winners().len(), 2);
        s = step(&mut c, s, &[Action::Prepare]);
        let err = c.handle(&s, &Action::Draw);
        assert!(matches!(
            err,
            Err(DrawErrors::InsufficientParticipants { .. })
        ));
        // Still resumable: the same tier can be retried or the session reset.
        assert!(c.is_ready_to_draw(&s));
        let s = step(&mut c, s, &[Action::Reset]);
        assert_eq!(s, SessionState::new());
    }

    #[test]
    fn begin_requires_a_list() {
        let mut c = SessionController::with_seed(event_schedule(), Some(3));
        let s = c.initial_state();
        assert!(matches!(
            c.handle(&s, &Action::Begin),
            Err(DrawErrors::Configuration(_))
        ));
    }

    #[test]
    fn draw_before_prepare() {
        let mut c = SessionController::with_seed(event_schedule(), Some(4));
        let s = step(
            &mut c,
            SessionState::new(),
            &[Action::Load(names(&["A", "B", "C"])), Action::Begin],
        );
        assert_eq!(c.handle(&s, &Action::Draw), Err(DrawErrors::NotReady));
    }

    #[test]
    fn actions_outside_their_phase() {
        let mut c = SessionController::with_seed(event_schedule(), Some(5));
        let s = c.initial_state();
        assert_eq!(
            c.handle(&s, &Action::Draw),
            Err(DrawErrors::InvalidAction {
                action: "draw".to_string(),
                phase: Phase::Setup
            })
        );
        let s = step(
            &mut c,
            s,
            &[Action::Load(names(&["A"])), Action::Begin],
        );
        assert!(matches!(
            c.handle(&s, &Action::Load(names(&["B"]))),
            Err(DrawErrors::InvalidAction { .. })
        ));
    }

    #[test]
    fn prepare_twice_is_harmless() {
        let mut c = SessionController::with_seed(event_schedule(), Some(6));
        let s = step(
            &mut c,
            SessionState::new(),
            &[Action::Load(names(&["A", "B", "C"])), Action::Begin, Action::Prepare],
        );
        let again = c.handle(&s, &Action::Prepare).unwrap();
        assert_eq!(again, s);
    }

    #[test]
    fn reset_clears_everything() {
        let mut c = SessionController::with_seed(event_schedule(), Some(7));
        let s = step(
            &mut c,
            SessionState::new(),
            &[
                Action::Load(names(&["A", "B", "C", "D"])),
                Action::Begin,
                Action::Prepare,
                Action::Draw,
            ],
        );
        assert_eq!(s.tier_index(), 1);
        let s = step(&mut c, s, &[Action::Reset]);
        assert_eq!(s.phase(), Phase::Setup);
        assert!(s.winners().is_empty());
        assert_eq!(s.tier_index(), 0);
        assert!(s.pool().is_none());
    }

    #[test]
    fn empty_schedule_finishes_at_once() {
        let mut c = SessionController::with_seed(PrizeSchedule::default(), Some(8));
        let s = step(
            &mut c,
            SessionState::new(),
            &[Action::Load(names(&["A"])), Action::Begin],
        );
        assert_eq!(s.phase(), Phase::Finished);
    }
}
