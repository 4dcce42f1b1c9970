//! Plain-text rendering for terminal output.

use prepweek_core::{ComplexityTier, DayScore, PickupRecommendation, ShelfLifeEntry, WeekPlan};

fn cook_range(tier: ComplexityTier) -> String {
    match tier.suggested_cook_minutes() {
        (0, Some(max)) => format!("<= {max} min"),
        (min, Some(max)) => format!("{min}-{max} min"),
        (min, None) => format!("{min}+ min"),
    }
}

pub fn day_line(day: &DayScore, effective: ComplexityTier) -> String {
    let tier = if effective == day.tier() {
        format!("{}", day.tier())
    } else {
        format!("{} (override, recommended {})", effective, day.tier())
    };
    format!(
        "{} {:>3}  {:<40}  cook {}",
        day.date().format("%a %Y-%m-%d"),
        day.final_score(),
        tier,
        cook_range(effective)
    )
}

pub fn signal_lines(day: &DayScore) -> Vec<String> {
    day.signals()
        .iter()
        .map(|s| format!("    {}: {:.0} | {}", s.signal, s.score, s.reasoning))
        .collect()
}

pub fn print_week(plan: &WeekPlan) {
    for day in &plan.scores {
        let effective = plan.effective_tier(day.date()).unwrap_or(day.tier());
        println!("{}", day_line(day, effective));
        for line in signal_lines(day) {
            println!("{line}");
        }
    }
}

pub fn pickup_lines(rec: &PickupRecommendation) -> Vec<String> {
    vec![
        rec.reasoning.clone(),
        format!(
            "score={:.1} (availability={:.1}, freshness={:.1})",
            rec.score, rec.availability_score, rec.freshness_score
        ),
    ]
}

pub fn shelf_life_line(category: &str, entry: &ShelfLifeEntry) -> String {
    format!(
        "{}: {} ({}-{} days)",
        category.trim(),
        entry.freshness.as_str(),
        entry.min_days,
        entry.max_days
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use prepweek_core::get_shelf_life;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 17).unwrap()
    }

    #[test]
    fn override_is_shown_next_to_recommendation() {
        let day = DayScore::new(monday(), 72, vec![]);
        let plain = day_line(&day, ComplexityTier::Quick);
        assert!(plain.starts_with("Mon 2025-02-17  72  quick"));
        assert!(plain.ends_with("cook <= 30 min"));

        let overridden = day_line(&day, ComplexityTier::Exploratory);
        assert!(overridden.contains("exploratory (override, recommended quick)"));
        assert!(overridden.ends_with("cook 60+ min"));
    }

    #[test]
    fn shelf_life_line_names_freshness_and_range() {
        let line = shelf_life_line(" Seafood ", &get_shelf_life("Seafood"));
        assert_eq!(line, "Seafood: short (1-2 days)");
    }
}
