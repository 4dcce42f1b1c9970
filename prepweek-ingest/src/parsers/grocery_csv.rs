//! Grocery list and meal schedule CSVs.
//!
//! groceries.csv:  name,category        (category may be blank)
//! meals.csv:      category,date        (date as YYYY-MM-DD)

use anyhow::{Context, Result};
use chrono::NaiveDate;
use prepweek_core::{GroceryItemRef, PerishableMealDate};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct GroceryRow {
    name: String,
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MealRow {
    category: String,
    date: NaiveDate,
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

/// Parse grocery rows; rows without a name are skipped.
pub fn parse_grocery_csv<R: Read>(input: R) -> Result<Vec<GroceryItemRef>> {
    let mut rdr = reader(input);
    let mut items = Vec::new();

    for (row, result) in rdr.deserialize::<GroceryRow>().enumerate() {
        let r = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(row = row + 1, error = %e, "skipping grocery row");
                continue;
            }
        };
        if r.name.is_empty() {
            continue;
        }
        items.push(GroceryItemRef {
            name: r.name,
            category: r.category.filter(|c| !c.is_empty()),
        });
    }

    Ok(items)
}

/// Parse meal schedule rows; rows with an unparseable date are skipped.
pub fn parse_meal_dates_csv<R: Read>(input: R) -> Result<Vec<PerishableMealDate>> {
    let mut rdr = reader(input);
    let mut meals = Vec::new();

    for (row, result) in rdr.deserialize::<MealRow>().enumerate() {
        match result {
            Ok(r) => meals.push(PerishableMealDate::new(r.category, r.date)),
            Err(e) => warn!(row = row + 1, error = %e, "skipping meal row"),
        }
    }

    Ok(meals)
}

pub fn load_grocery_csv(path: impl AsRef<Path>) -> Result<Vec<GroceryItemRef>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_grocery_csv(file).with_context(|| format!("parsing {}", path.display()))
}

pub fn load_meal_dates_csv(path: impl AsRef<Path>) -> Result<Vec<PerishableMealDate>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_meal_dates_csv(file).with_context(|| format!("parsing {}", path.display()))
}
