use std::collections::HashMap;
use std::fs;

use log::debug;
use prize_draw::builder::ScheduleBuilder;
use prize_draw::{Preset, PrizeSchedule, PrizeTier, TierKind};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::draw::*;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PrizeSettings {
    pub name: String,
    pub count: u32,
    pub translation: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PresetWinnerSettings {
    pub prize: String,
    pub position: u32,
    pub name: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DrawConfig {
    #[serde(rename = "eventName")]
    pub event_name: Option<String>,
    #[serde(rename = "nameColumn")]
    pub name_column: Option<String>,
    #[serde(rename = "mainPrizes")]
    pub main_prizes: Vec<PrizeSettings>,
    #[serde(rename = "bonusPrizes", default)]
    pub bonus_prizes: Vec<PrizeSettings>,
    #[serde(rename = "presetWinners", default)]
    pub preset_winners: Vec<PresetWinnerSettings>,
}

impl DrawConfig {
    pub const DEFAULT_EVENT_NAME: &'static str = "宿霧場館新年抽獎";

    pub fn event_title(&self) -> String {
        self.event_name
            .clone()
            .unwrap_or_else(|| DrawConfig::DEFAULT_EVENT_NAME.to_string())
    }
}

/// The label under which the winners of a prize are announced.
pub fn prize_label(prize: &PrizeSettings) -> String {
    match &prize.translation {
        Some(t) if !t.is_empty() => format!("{} ({})", prize.name, t),
        _ => prize.name.clone(),
    }
}

pub fn read_config(path: &str) -> DrawToolResult<DrawConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> DrawToolResult<DrawConfig> {
    let config: DrawConfig = serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    debug!("parse_config: {:?}", config);
    Ok(config)
}

/// The prizes of the new year event.
pub fn default_config() -> DrawConfig {
    let prize = |name: &str, count: u32, translation: &str| PrizeSettings {
        name: name.to_string(),
        count,
        translation: Some(translation.to_string()),
    };
    let preset = |prize: &str, position: u32, name: &str| PresetWinnerSettings {
        prize: prize.to_string(),
        position,
        name: name.to_string(),
    };
    DrawConfig {
        event_name: None,
        name_column: None,
        main_prizes: vec![
            prize("五等獎", 20, "Fifth Prize"),
            prize("四等獎", 10, "Fourth Prize"),
            prize("三等獎", 6, "Third Prize"),
            prize("二等獎", 3, "Second Prize"),
            prize("一等獎", 1, "First Prize"),
        ],
        bonus_prizes: vec![
            prize("Tommy加彩5000", 5, "Tommy Bonus 5000"),
            prize("Wayne加彩5000", 5, "Wayne Bonus 5000"),
            prize("Jamie加彩5000", 5, "Jamie Bonus 5000"),
        ],
        preset_winners: vec![
            preset("Tommy加彩5000", 2, "Johnson"),
            preset("Wayne加彩5000", 4, "Yiyi"),
            preset("Jamie加彩5000", 1, "Lunar"),
        ],
    }
}

/// Validates the configuration and turns it into a schedule.
///
/// Preset winners must refer to a bonus prize, with at most one preset
/// winner per prize.
pub fn build_schedule(config: &DrawConfig) -> DrawToolResult<PrizeSchedule> {
    let mut presets: HashMap<&str, &PresetWinnerSettings> = HashMap::new();
    for p in config.preset_winners.iter() {
        if !config.bonus_prizes.iter().any(|b| b.name == p.prize) {
            whatever!(
                "Preset winner {} refers to {}, which is not a bonus prize",
                p.name,
                p.prize
            )
        }
        if presets.insert(p.prize.as_str(), p).is_some() {
            whatever!("Prize {} has more than one preset winner", p.prize)
        }
    }

    let mut builder = ScheduleBuilder::new();
    for m in config.main_prizes.iter() {
        builder = builder.tier(PrizeTier {
            id: m.name.clone(),
            display_name: prize_label(m),
            quantity: m.count,
            kind: TierKind::Main,
            preset: None,
        });
    }
    for b in config.bonus_prizes.iter() {
        builder = builder.tier(PrizeTier {
            id: b.name.clone(),
            display_name: prize_label(b),
            quantity: b.count,
            kind: TierKind::Bonus,
            preset: presets.get(b.name.as_str()).map(|p| Preset {
                position: p.position,
                name: p.name.clone(),
            }),
        });
    }
    builder.build().context(DrawSnafu {})
}
