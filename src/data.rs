use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::{ContractChurn, DatasetSummary};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a valid churn dataset", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// One dataset row after coercion and imputation. Contract labels are kept as
/// they appear in the source file.
#[derive(Debug, Clone)]
pub struct CustomerRow {
    pub tenure_months: u32,
    pub contract: String,
    pub total_charges: f64,
    pub churned: bool,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub rows: Vec<CustomerRow>,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "tenure")]
    tenure_months: u32,
    #[serde(rename = "Contract")]
    contract: String,
    /// Numeric-as-text in the source data; blank for customers with no
    /// billing history yet.
    #[serde(rename = "TotalCharges")]
    total_charges: String,
    #[serde(rename = "Churn")]
    churn: String,
}

/// Load the churn dataset. Non-numeric `TotalCharges` cells are replaced with
/// the median of the cells that did parse in the same load.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut raw_rows = Vec::new();
    for result in reader.deserialize::<RawRow>() {
        let row = result.map_err(|source| LoadError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        raw_rows.push(row);
    }

    let charges: Vec<Option<f64>> = raw_rows
        .iter()
        .map(|row| row.total_charges.trim().parse::<f64>().ok())
        .collect();
    let mut numeric: Vec<f64> = charges.iter().flatten().copied().collect();
    let fill = median(&mut numeric);

    let rows = raw_rows
        .into_iter()
        .zip(charges)
        .map(|(raw, parsed)| CustomerRow {
            tenure_months: raw.tenure_months,
            contract: raw.contract,
            total_charges: parsed.unwrap_or(fill),
            churned: raw.churn.eq_ignore_ascii_case("yes"),
        })
        .collect();

    Ok(Dataset { rows })
}

impl Dataset {
    pub fn summary(&self) -> DatasetSummary {
        let total = self.rows.len();
        let churned = self.rows.iter().filter(|row| row.churned).count();
        let churn_rate_pct = if total == 0 {
            0.0
        } else {
            churned as f64 / total as f64 * 100.0
        };
        let avg_tenure_months = if total == 0 {
            0.0
        } else {
            self.rows.iter().map(|row| row.tenure_months as f64).sum::<f64>() / total as f64
        };

        DatasetSummary {
            total_customers: total,
            churn_count: churned,
            churn_rate_pct,
            avg_tenure_months,
        }
    }

    /// Churn rate per contract label, sorted by label for stable output.
    pub fn churn_by_contract(&self) -> Vec<ContractChurn> {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for row in &self.rows {
            let entry = counts.entry(row.contract.as_str()).or_insert((0, 0));
            entry.0 += 1;
            if row.churned {
                entry.1 += 1;
            }
        }

        let mut breakdown: Vec<ContractChurn> = counts
            .into_iter()
            .map(|(contract, (total, churned))| ContractChurn {
                contract: contract.to_string(),
                total,
                churned,
                churn_rate_pct: if total == 0 {
                    0.0
                } else {
                    churned as f64 / total as f64 * 100.0
                },
            })
            .collect();
        breakdown.sort_by(|a, b| a.contract.cmp(&b.contract));
        breakdown
    }
}

fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
