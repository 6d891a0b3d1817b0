//! CSV-based rate table loader
//!
//! Loads contribution and allocation matrices from CSV files in data/rates/

use serde::Deserialize;
use std::fs::File;
use std::path::Path;

use super::allocation::{AccountSplit, AllocationBracket};
use super::contribution::{ContributionBracket, EntityRates};
use crate::error::{CpfError, Result};

/// Default path to the rate table directory
pub const DEFAULT_RATES_PATH: &str = "data/rates";

#[derive(Debug, Deserialize)]
struct ContributionRow {
    max_age: u32,
    band: String,
    combined: f64,
    employee: f64,
    #[serde(default)]
    misc: f64,
}

#[derive(Debug, Deserialize)]
struct AllocationRow {
    max_age: u32,
    oa: f64,
    sa: f64,
    ma: f64,
    oa_ratio: f64,
    sa_ratio: f64,
    ma_ratio: f64,
}

/// Load contribution brackets from contribution_rates.csv
///
/// Each bracket needs one row per band (total_wage, phased, full).
pub fn load_contribution_rates(path: &Path) -> Result<Vec<ContributionBracket>> {
    const TABLE: &str = "contribution_rates.csv";
    let file = File::open(path.join(TABLE))?;
    let mut reader = csv::Reader::from_reader(file);

    // (max_age, [total_wage, phased, full])
    let mut partial: Vec<(u32, [Option<EntityRates>; 3])> = Vec::new();

    for result in reader.deserialize() {
        let row: ContributionRow = result?;
        let slot = match row.band.as_str() {
            "total_wage" => 0,
            "phased" => 1,
            "full" => 2,
            other => {
                return Err(CpfError::RateTable {
                    table: TABLE,
                    reason: format!("unknown band \"{}\"", other),
                })
            }
        };

        let rates = EntityRates::phased(row.combined, row.employee, row.misc);
        match partial.iter_mut().find(|(age, _)| *age == row.max_age) {
            Some((_, bands)) => bands[slot] = Some(rates),
            None => {
                let mut bands = [None; 3];
                bands[slot] = Some(rates);
                partial.push((row.max_age, bands));
            }
        }
    }

    let mut brackets = partial
        .into_iter()
        .map(|(max_age, bands)| match bands {
            [Some(total_wage), Some(phased), Some(full)] => Ok(ContributionBracket {
                max_age,
                total_wage,
                phased,
                full,
            }),
            _ => Err(CpfError::RateTable {
                table: TABLE,
                reason: format!("age bracket {} is missing a band", max_age),
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    brackets.sort_by_key(|b| b.max_age);
    ensure_non_empty(TABLE, brackets.len())?;
    Ok(brackets)
}

/// Load allocation brackets from allocation_rates.csv
pub fn load_allocation_rates(path: &Path) -> Result<Vec<AllocationBracket>> {
    const TABLE: &str = "allocation_rates.csv";
    let file = File::open(path.join(TABLE))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut brackets = Vec::new();
    for result in reader.deserialize() {
        let row: AllocationRow = result?;
        brackets.push(AllocationBracket {
            max_age: row.max_age,
            pct_of_wage: AccountSplit::new(row.oa, row.sa, row.ma),
            ratio: AccountSplit::new(row.oa_ratio, row.sa_ratio, row.ma_ratio),
        });
    }

    brackets.sort_by_key(|b| b.max_age);
    ensure_non_empty(TABLE, brackets.len())?;
    Ok(brackets)
}

fn ensure_non_empty(table: &'static str, len: usize) -> Result<()> {
    if len == 0 {
        return Err(CpfError::RateTable {
            table,
            reason: "no age brackets".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::{allocation, contribution};

    fn rates_dir() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_RATES_PATH)
    }

    #[test]
    fn test_loaded_tables_match_statutory() {
        let loaded = load_contribution_rates(&rates_dir());
        assert!(loaded.is_ok(), "Failed to load contribution rates: {:?}", loaded.err());
        assert_eq!(loaded.unwrap(), contribution::statutory_brackets());

        let loaded = load_allocation_rates(&rates_dir()).unwrap();
        assert_eq!(loaded, allocation::statutory_brackets());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let result = load_allocation_rates(Path::new("does/not/exist"));
        assert!(matches!(result, Err(CpfError::Io(_))));
    }
}
