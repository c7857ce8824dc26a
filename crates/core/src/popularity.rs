//! Visitor counts per cocktail and year.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CocktailError, Result};

/// One `(name, year, visitors)` observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularityRecord {
    pub name: String,
    pub year: i32,
    pub visitors: u64,
}

/// Visitors summed over a year range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkTotal {
    pub name: String,
    pub visitors: u64,
}

/// Reads popularity records from CSV with `name,year,visitors` columns.
pub fn read_popularity<R: Read>(reader: R) -> Result<Vec<PopularityRecord>> {
    csv::Reader::from_reader(reader)
        .deserialize()
        .map(|record| record.map_err(CocktailError::from))
        .collect()
}

/// Reads popularity records from a file.
pub fn read_popularity_file(path: impl AsRef<Path>) -> Result<Vec<PopularityRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CocktailError::FileNotFound(path.to_path_buf()));
    }
    read_popularity(std::fs::File::open(path)?)
}

/// Earliest and latest year present, or `None` without records.
pub fn year_bounds(records: &[PopularityRecord]) -> Option<(i32, i32)> {
    let min = records.iter().map(|r| r.year).min()?;
    let max = records.iter().map(|r| r.year).max()?;
    Some((min, max))
}

/// The `n` most visited drinks between `start` and `end` inclusive.
///
/// Ties are broken by name so the result is stable across runs.
pub fn top_drinks(records: &[PopularityRecord], start: i32, end: i32, n: usize) -> Vec<DrinkTotal> {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for record in records.iter().filter(|r| (start..=end).contains(&r.year)) {
        *totals.entry(record.name.as_str()).or_default() += record.visitors;
    }

    let mut ranked: Vec<DrinkTotal> = totals
        .into_iter()
        .map(|(name, visitors)| DrinkTotal { name: name.to_string(), visitors })
        .collect();
    ranked.sort_by(|a, b| b.visitors.cmp(&a.visitors).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, year: i32, visitors: u64) -> PopularityRecord {
        PopularityRecord { name: name.into(), year, visitors }
    }

    fn records() -> Vec<PopularityRecord> {
        vec![
            record("Mojito", 2019, 120),
            record("Negroni", 2019, 80),
            record("Mojito", 2020, 50),
            record("Negroni", 2020, 150),
            record("Martini", 2021, 300),
            record("Daiquiri", 2021, 40),
        ]
    }

    #[test]
    fn test_year_bounds() {
        assert_eq!(year_bounds(&records()), Some((2019, 2021)));
        assert_eq!(year_bounds(&[]), None);
    }

    #[test]
    fn test_top_drinks_sums_within_range() {
        let top = top_drinks(&records(), 2019, 2020, 10);
        assert_eq!(
            top,
            vec![
                DrinkTotal { name: "Negroni".into(), visitors: 230 },
                DrinkTotal { name: "Mojito".into(), visitors: 170 },
            ]
        );
    }

    #[test]
    fn test_top_drinks_truncates_and_breaks_ties_by_name() {
        let records = vec![record("Sidecar", 2020, 10), record("Gimlet", 2020, 10), record("Martini", 2020, 5)];
        let top = top_drinks(&records, 2020, 2020, 2);
        let names: Vec<_> = top.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Gimlet", "Sidecar"]);
    }

    #[test]
    fn test_empty_range() {
        assert!(top_drinks(&records(), 1990, 1995, 10).is_empty());
    }

    #[test]
    fn test_read_popularity() {
        let csv = "name,year,visitors\nMojito,2019,120\nNegroni,2020,80\n";
        let records = read_popularity(csv.as_bytes()).unwrap();
        assert_eq!(records, vec![record("Mojito", 2019, 120), record("Negroni", 2020, 80)]);
    }
}
