use anyhow::{bail, Context, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use prepweek_core::{
    recommend_pickup_day, LocalCalendar, PickupRecommendation, ShelfLifeTable, WeekPlan,
};
use prepweek_ingest::{load_event_files, load_grocery_csv, load_meal_dates_csv};
use std::path::PathBuf;
use tracing::{debug, info};

mod config;
mod logging;
mod report;
mod state;

use config::Config;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PREPWEEK_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "prepweek",
    version = VERSION,
    about = "Score how busy each day of your week is and pick a grocery pickup day"
)]
struct Cli {
    /// Debug logging on stderr (overrides RUST_LOG and config log_level)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct WeekArgs {
    /// Calendar exports to merge (.ics, anything else is read as JSON)
    #[arg(long, required = true, num_args = 1..)]
    events: Vec<PathBuf>,

    /// First day of the week, YYYY-MM-DD (default: the Monday on or after today)
    #[arg(long)]
    week_start: Option<NaiveDate>,

    /// IANA timezone for local days (default: config timezone)
    #[arg(long)]
    tz: Option<String>,
}

#[derive(Args, Debug)]
struct BasketArgs {
    /// Grocery list CSV with header name,category
    #[arg(long)]
    groceries: Option<PathBuf>,

    /// Perishable meal dates CSV with header category,date
    #[arg(long)]
    meals: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the seven day scores and tiers for a week
    ScoreWeek {
        #[command(flatten)]
        week: WeekArgs,
    },

    /// Recommend the best grocery pickup day for a week
    Pickup {
        #[command(flatten)]
        week: WeekArgs,

        #[command(flatten)]
        basket: BasketArgs,
    },

    /// Score the week, pick a pickup day and save the result
    Plan {
        #[command(flatten)]
        week: WeekArgs,

        #[command(flatten)]
        basket: BasketArgs,

        /// Print the stored plan as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show a saved week without recalculating
    Show {
        #[arg(long)]
        week_start: Option<NaiveDate>,

        #[arg(long)]
        tz: Option<String>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Shelf life for an ingredient category (lists categories when omitted)
    ShelfLife { category: Option<String> },

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config.toml if none exists
    Init,

    /// Print the config in effect
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    logging::init(&cfg.log_level, cli.verbose);
    debug!(user = %cfg.user, timezone = %cfg.timezone, "config loaded");

    match cli.command {
        Command::ScoreWeek { week } => {
            let plan = score_week(&cfg, &week)?;
            println!("Week of {} ({})\n", plan.week_start, cfg.user);
            report::print_week(&plan);
        }

        Command::Pickup { week, basket } => {
            let plan = score_week(&cfg, &week)?;
            let rec = pickup(&plan, &basket)?;
            for line in report::pickup_lines(&rec) {
                println!("{line}");
            }
        }

        Command::Plan { week, basket, json } => {
            let plan = score_week(&cfg, &week)?;
            let rec = pickup(&plan, &basket)?;
            let plan = plan.with_pickup(rec);

            let home = state::ensure_prepweek_home()?;
            let path = state::write_week_plan(&home, &plan)?;
            info!(path = %path.display(), "week plan saved");

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_plan(&plan);
                println!("\nSaved {}", path.display());
            }
        }

        Command::Show { week_start, tz, json } => {
            let calendar = cfg.calendar(tz.as_deref())?;
            let week_start =
                week_start.unwrap_or_else(|| default_week_start(&calendar, Utc::now()));
            let home = state::prepweek_home()?;

            let Some(plan) = state::read_week_plan(&home, &cfg.user, week_start)? else {
                bail!(
                    "No saved plan for {} (week of {}). \
                     Run: prepweek plan --events <file> --week-start {}",
                    cfg.user,
                    week_start,
                    week_start
                );
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_plan(&plan);
            }
        }

        Command::ShelfLife { category } => {
            let table = ShelfLifeTable::STANDARD;
            match category {
                Some(category) => {
                    let cat = category.trim();
                    println!("{}", report::shelf_life_line(cat, &table.get(cat)));
                    if table.lookup(cat).is_none() {
                        println!("(not a known category; using the default)");
                    }
                }
                None => {
                    for cat in table.categories() {
                        println!("{}", report::shelf_life_line(cat, &table.get(cat)));
                    }
                }
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let p = config::config_path()?;
                println!("# {}", p.display());
                println!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// The local Monday on or after `now`.
fn default_week_start(calendar: &LocalCalendar, now: DateTime<Utc>) -> NaiveDate {
    let today = calendar.local_date(now);
    let ahead = (7 - today.weekday().num_days_from_monday()) % 7;
    today + Duration::days(i64::from(ahead))
}

fn score_week(cfg: &Config, args: &WeekArgs) -> Result<WeekPlan> {
    let calendar = cfg.calendar(args.tz.as_deref())?;
    let week_start = args
        .week_start
        .unwrap_or_else(|| default_week_start(&calendar, Utc::now()));

    let loaded = load_event_files(&args.events, &calendar);
    if loaded.all_failed() {
        let reasons: Vec<String> = loaded
            .failed
            .iter()
            .map(|(p, e)| format!("{}: {e}", p.display()))
            .collect();
        bail!("No calendar could be read:\n  {}", reasons.join("\n  "));
    }
    for (p, e) in &loaded.failed {
        eprintln!("warning: skipped {} ({e})", p.display());
    }

    let scores = cfg.engine(calendar).score_week(&loaded.events, week_start);
    Ok(WeekPlan::new(cfg.user.clone(), week_start, scores.to_vec())
        .with_overrides(cfg.tier_overrides()?))
}

fn pickup(plan: &WeekPlan, basket: &BasketArgs) -> Result<PickupRecommendation> {
    let items = match &basket.groceries {
        Some(p) => load_grocery_csv(p)?,
        None => Vec::new(),
    };
    let meals = match &basket.meals {
        Some(p) => load_meal_dates_csv(p)?,
        None => Vec::new(),
    };
    Ok(recommend_pickup_day(&plan.scores, &items, &meals)?)
}

fn print_plan(plan: &WeekPlan) {
    println!("Week of {} ({})\n", plan.week_start, plan.user);
    report::print_week(plan);
    if let Some(rec) = &plan.pickup {
        println!("\nGrocery pickup");
        for line in report::pickup_lines(rec) {
            println!("  {line}");
        }
    }
}
