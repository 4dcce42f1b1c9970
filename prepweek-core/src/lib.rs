//! prepweek-core: calendar-aware day scoring and grocery pickup planning

pub mod engine;
pub mod error;
pub mod event;
pub mod grocery;
pub mod pickup;
pub mod shelf_life;
pub mod signal;
pub mod tier;
pub mod time;
pub mod time_block;
pub mod title_stress;
pub mod week_plan;

pub use engine::{DayScore, DayScoreEngine};
pub use error::CoreError;
pub use event::{CalendarEvent, EventMetadata, EventSource};
pub use grocery::{GroceryItemRef, PerishableMealDate};
pub use pickup::{recommend_pickup_day, PickupOptimizer, PickupRecommendation};
pub use shelf_life::{get_shelf_life, Freshness, ShelfLifeEntry, ShelfLifeTable};
pub use signal::{ComplexitySignal, SignalResult};
pub use tier::ComplexityTier;
pub use time::{LocalCalendar, TimeSpan};
pub use time_block::TimeBlockSignal;
pub use title_stress::TitleStressSignal;
pub use week_plan::{TierOverride, WeekPlan};
