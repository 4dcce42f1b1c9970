use anyhow::{anyhow, Context, Result};
use chrono::Weekday;
use prepweek_core::{
    ComplexitySignal, ComplexityTier, DayScoreEngine, LocalCalendar, TierOverride, TimeBlockSignal,
    TitleStressSignal,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::state::ensure_prepweek_home;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage key for saved weeks.
    pub user: String,
    /// IANA zone that defines the local day.
    pub timezone: String,
    /// Used when RUST_LOG is unset.
    pub log_level: String,
    pub signals: SignalsSection,
    /// Weekday name -> tier, e.g. `wednesday = "quick"`.
    pub overrides: BTreeMap<String, ComplexityTier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalsSection {
    pub time_block_weight: f64,
    /// Title keyword signal; off unless set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_stress_weight: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: std::env::var("USER").unwrap_or_else(|_| "default".to_string()),
            timezone: "America/Chicago".to_string(),
            log_level: "warn".to_string(),
            signals: SignalsSection::default(),
            overrides: BTreeMap::new(),
        }
    }
}

impl Default for SignalsSection {
    fn default() -> Self {
        Self {
            time_block_weight: 1.0,
            title_stress_weight: None,
        }
    }
}

impl Config {
    /// `--tz` wins over the configured zone.
    pub fn calendar(&self, tz_flag: Option<&str>) -> Result<LocalCalendar> {
        let name = tz_flag.unwrap_or(&self.timezone);
        Ok(LocalCalendar::parse(name)?)
    }

    pub fn engine(&self, calendar: LocalCalendar) -> DayScoreEngine {
        let mut signals: Vec<Arc<dyn ComplexitySignal>> = vec![Arc::new(
            TimeBlockSignal::new(calendar).with_weight(self.signals.time_block_weight),
        )];
        if let Some(w) = self.signals.title_stress_weight {
            signals.push(Arc::new(TitleStressSignal::new(calendar).with_weight(w)));
        }
        DayScoreEngine::new(calendar, signals)
    }

    pub fn tier_overrides(&self) -> Result<Vec<TierOverride>> {
        self.overrides
            .iter()
            .map(|(day, tier)| {
                let day: Weekday = day
                    .trim()
                    .parse()
                    .map_err(|_| anyhow!("config [overrides]: '{day}' is not a weekday"))?;
                Ok(TierOverride { day, tier: *tier })
            })
            .collect()
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_prepweek_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
