use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use prepweek_core::WeekPlan;
use std::fs;
use std::path::{Path, PathBuf};

/// `$PREPWEEK_HOME`, else `~/.prepweek`.
pub fn prepweek_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("PREPWEEK_HOME").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".prepweek"))
}

pub fn ensure_prepweek_home() -> Result<PathBuf> {
    let dir = prepweek_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// `<root>/weeks/<user>/<week_start>.json`
pub fn week_plan_path(root: &Path, user: &str, week_start: NaiveDate) -> Result<PathBuf> {
    let user = user.trim();
    if user.is_empty() || user == "." || user == ".." || user.contains(['/', '\\']) {
        bail!("invalid user name for storage: '{user}'");
    }
    Ok(root
        .join("weeks")
        .join(user)
        .join(format!("{}.json", week_start.format("%Y-%m-%d"))))
}

pub fn write_week_plan(root: &Path, plan: &WeekPlan) -> Result<PathBuf> {
    if let Err(reason) = plan.validate() {
        bail!("refusing to store week plan: {reason}");
    }
    let p = week_plan_path(root, &plan.user, plan.week_start)?;
    if let Some(dir) = p.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(plan).context("serialize week plan")?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

/// `None` when nothing has been stored for that week.
pub fn read_week_plan(root: &Path, user: &str, week_start: NaiveDate) -> Result<Option<WeekPlan>> {
    let p = week_plan_path(root, user, week_start)?;
    if !p.exists() {
        return Ok(None);
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let plan: WeekPlan =
        serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    Ok(Some(plan))
}
