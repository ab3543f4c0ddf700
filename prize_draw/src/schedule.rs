use crate::config::*;

/// The ordered list of tiers to draw. Main tiers come first, then the bonus
/// tiers.
///
/// It is immutable once constructed. Use [crate::builder::ScheduleBuilder]
/// to assemble one with validation.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct PrizeSchedule {
    tiers: Vec<PrizeTier>,
}

impl PrizeSchedule {
    pub fn new(main: Vec<PrizeTier>, bonus: Vec<PrizeTier>) -> PrizeSchedule {
        let mut tiers = main;
        tiers.extend(bonus);
        PrizeSchedule { tiers }
    }

    pub fn tier_at(&self, index: usize) -> Option<&PrizeTier> {
        self.tiers.get(index)
    }

    pub fn size(&self) -> usize {
        self.tiers.len()
    }

    pub fn tiers(&self) -> &[PrizeTier] {
        &self.tiers
    }

    pub fn main_tiers(&self) -> impl Iterator<Item = &PrizeTier> {
        self.tiers.iter().filter(|t| t.kind == TierKind::Main)
    }

    /// The names reserved for a bonus tier. They are kept out of the pool.
    pub fn preset_names(&self) -> Vec<String> {
        self.tiers
            .iter()
            .filter_map(|t| t.preset.as_ref().map(|p| p.name.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(id: &str, quantity: u32, kind: TierKind, preset: Option<(u32, &str)>) -> PrizeTier {
        PrizeTier {
            id: id.to_string(),
            display_name: id.to_string(),
            quantity,
            kind,
            preset: preset.map(|(position, name)| Preset {
                position,
                name: name.to_string(),
            }),
        }
    }

    #[test]
    fn main_tiers_come_first() {
        let schedule = PrizeSchedule::new(
            vec![
                tier("fifth", 20, TierKind::Main, None),
                tier("first", 1, TierKind::Main, None),
            ],
            vec![tier("bonus", 5, TierKind::Bonus, Some((2, "Johnson")))],
        );
        assert_eq!(schedule.size(), 3);
        assert_eq!(schedule.tier_at(0).map(|t| t.id.as_str()), Some("fifth"));
        assert_eq!(schedule.tier_at(2).map(|t| t.id.as_str()), Some("bonus"));
        assert_eq!(schedule.tier_at(3), None);
        assert_eq!(schedule.main_tiers().count(), 2);
        assert_eq!(schedule.preset_names(), vec!["Johnson".to_string()]);
    }
}
