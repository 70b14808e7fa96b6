use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use once_cell::unsync::OnceCell;

mod artifacts;
mod data;
mod models;
mod report;
mod risk;

use artifacts::ModelArtifacts;
use data::{Dataset, LoadError};
use models::{ContractType, CustomerRecord, Gender, InternetService, PaymentMethod};

const DEFAULT_DATASET: &str = "data/raw/telco_customer_churn.csv";
const DEFAULT_MODEL: &str = "models/churn_model.bin";
const DEFAULT_SCALER: &str = "models/scaler.bin";

#[derive(Parser)]
#[command(name = "churn-dashboard")]
#[command(about = "Customer churn dashboard: dataset analysis, risk scoring, model metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the churn dataset
    Analyze {
        #[arg(long, default_value = DEFAULT_DATASET)]
        csv: PathBuf,
        /// Emit the derived values as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score churn risk for one customer
    Predict {
        #[arg(long, value_enum, default_value_t = Gender::Male)]
        gender: Gender,
        #[arg(long)]
        senior_citizen: bool,
        #[arg(long)]
        partner: bool,
        #[arg(long)]
        dependents: bool,
        #[arg(long)]
        phone_service: bool,
        /// Months with the service (0-72)
        #[arg(long, default_value_t = 12)]
        tenure: u32,
        #[arg(long, value_enum, default_value_t = InternetService::None)]
        internet: InternetService,
        #[arg(long, value_enum, default_value_t = ContractType::MonthToMonth)]
        contract: ContractType,
        /// Monthly charges in dollars (0-150)
        #[arg(long, default_value_t = 50.0)]
        monthly_charges: f64,
        /// Defaults to monthly charges times tenure
        #[arg(long)]
        total_charges: Option<f64>,
        #[arg(long, value_enum, default_value_t = PaymentMethod::ElectronicCheck)]
        payment: PaymentMethod,
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: PathBuf,
        #[arg(long, default_value = DEFAULT_SCALER)]
        scaler: PathBuf,
        /// Emit the assessment as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the precomputed model metrics
    Performance {
        /// Emit the metric tables as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the full markdown report
    Report {
        #[arg(long, default_value = DEFAULT_DATASET)]
        csv: PathBuf,
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: PathBuf,
        #[arg(long, default_value = DEFAULT_SCALER)]
        scaler: PathBuf,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

/// Per-process cache for the file loads. Loads are lazy, happen at most once,
/// and are never invalidated. Unsynchronized: commands run on one thread.
struct LoadCache {
    data_path: PathBuf,
    model_path: PathBuf,
    scaler_path: PathBuf,
    dataset: OnceCell<Dataset>,
    artifacts: OnceCell<ModelArtifacts>,
}

impl LoadCache {
    fn new(data_path: PathBuf, model_path: PathBuf, scaler_path: PathBuf) -> Self {
        LoadCache {
            data_path,
            model_path,
            scaler_path,
            dataset: OnceCell::new(),
            artifacts: OnceCell::new(),
        }
    }

    fn dataset(&self) -> Result<&Dataset, LoadError> {
        self.dataset
            .get_or_try_init(|| data::load_dataset(&self.data_path))
    }

    fn artifacts(&self) -> Result<&ModelArtifacts, LoadError> {
        self.artifacts
            .get_or_try_init(|| artifacts::load_artifacts(&self.model_path, &self.scaler_path))
    }
}

#[derive(serde::Serialize)]
struct AnalysisView {
    summary: models::DatasetSummary,
    churn_by_contract: Vec<models::ContractChurn>,
}

#[derive(serde::Serialize)]
struct PerformanceView<'a> {
    headline: &'a [report::HeadlineMetric],
    comparison: &'a [report::ModelComparison],
}

#[derive(serde::Serialize)]
struct PredictionView<'a> {
    input: &'a CustomerRecord,
    assessment: &'a models::RiskAssessment,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { csv, json } => {
            let cache = LoadCache::new(csv, DEFAULT_MODEL.into(), DEFAULT_SCALER.into());
            let dataset = cache.dataset().context("analysis view is unavailable")?;

            if json {
                let view = AnalysisView {
                    summary: dataset.summary(),
                    churn_by_contract: dataset.churn_by_contract(),
                };
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", report::render_analysis(dataset));
            }
        }
        Commands::Predict {
            gender,
            senior_citizen,
            partner,
            dependents,
            phone_service,
            tenure,
            internet,
            contract,
            monthly_charges,
            total_charges,
            payment,
            model,
            scaler,
            json,
        } => {
            let record = CustomerRecord {
                gender,
                senior_citizen,
                partner,
                dependents,
                phone_service,
                tenure_months: tenure,
                internet_service: internet,
                contract,
                monthly_charges,
                total_charges: total_charges.unwrap_or(monthly_charges * tenure as f64),
                payment_method: payment,
            };

            let cache = LoadCache::new(DEFAULT_DATASET.into(), model, scaler);
            match cache.artifacts() {
                Ok(loaded) => {
                    if !json {
                        println!(
                            "Artifacts on hand: {}, {}.",
                            loaded.model.describe(),
                            loaded.scaler.describe()
                        );
                    }
                }
                Err(err) => {
                    eprintln!("warning: {err}; scoring with the rule engine only");
                }
            }

            let assessment = risk::assess(&record)?;
            if json {
                let view = PredictionView {
                    input: &record,
                    assessment: &assessment,
                };
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!(
                    "Churn risk for a {} contract, {} months tenure, ${:.2}/month via {}:",
                    record.contract,
                    record.tenure_months,
                    record.monthly_charges,
                    record.payment_method
                );
                println!("{}", report::render_gauge(assessment.score));
                if assessment.recommendations.is_empty() {
                    println!("No follow-up needed; the customer looks satisfied.");
                } else {
                    println!("Recommended actions:");
                    for action in assessment.recommendations {
                        println!("- {action}");
                    }
                }
            }
        }
        Commands::Performance { json } => {
            if json {
                let view = PerformanceView {
                    headline: &report::HEADLINE_METRICS,
                    comparison: &report::MODEL_COMPARISON,
                };
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", report::render_performance());
            }
        }
        Commands::Report {
            csv,
            model,
            scaler,
            out,
        } => {
            let cache = LoadCache::new(csv, model, scaler);
            let dataset = match cache.dataset() {
                Ok(dataset) => Some(dataset),
                Err(err) => {
                    eprintln!("warning: {err}");
                    None
                }
            };
            let artifacts = match cache.artifacts() {
                Ok(artifacts) => Some(artifacts),
                Err(err) => {
                    eprintln!("warning: {err}");
                    None
                }
            };

            let rendered = report::build_report(dataset, artifacts, Utc::now().date_naive());
            std::fs::write(&out, rendered)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
