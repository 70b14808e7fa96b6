use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::artifacts::ModelArtifacts;
use crate::data::Dataset;
use crate::risk;

/// Headline metrics of the best model, with their deltas against the previous
/// evaluation round. Literal figures, never recomputed.
#[derive(Debug, Clone, Serialize)]
pub struct HeadlineMetric {
    pub name: &'static str,
    pub value: &'static str,
    pub delta: &'static str,
}

pub const HEADLINE_METRICS: [HeadlineMetric; 4] = [
    HeadlineMetric {
        name: "Accuracy",
        value: "80.5%",
        delta: "+2.3%",
    },
    HeadlineMetric {
        name: "Precision",
        value: "0.67",
        delta: "+0.05",
    },
    HeadlineMetric {
        name: "Recall",
        value: "0.54",
        delta: "+0.02",
    },
    HeadlineMetric {
        name: "F1-Score",
        value: "0.60",
        delta: "+0.03",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct ModelComparison {
    pub model: &'static str,
    pub accuracy: f64,
    pub f1_score: f64,
    pub auc: f64,
}

pub const MODEL_COMPARISON: [ModelComparison; 3] = [
    ModelComparison {
        model: "Logistic Regression",
        accuracy: 0.78,
        f1_score: 0.55,
        auc: 0.84,
    },
    ModelComparison {
        model: "Random Forest",
        accuracy: 0.79,
        f1_score: 0.58,
        auc: 0.85,
    },
    ModelComparison {
        model: "XGBoost",
        accuracy: 0.805,
        f1_score: 0.60,
        auc: 0.86,
    },
];

const GAUGE_WIDTH: usize = 25;
const BAR_WIDTH: usize = 30;

/// Text gauge over the 0-100 axis, bucketed by the same thresholds as the
/// risk category.
pub fn render_gauge(score: u32) -> String {
    let filled = (score as usize * GAUGE_WIDTH) / 100;
    let mut bar = String::with_capacity(GAUGE_WIDTH);
    for i in 0..GAUGE_WIDTH {
        bar.push(if i < filled { '#' } else { '-' });
    }
    format!("[{bar}] {score}/100 ({})", risk::category_for(score))
}

fn render_bar(pct: f64) -> String {
    let clamped = pct.clamp(0.0, 100.0);
    let filled = (clamped / 100.0 * BAR_WIDTH as f64).round() as usize;
    let mut bar = String::with_capacity(BAR_WIDTH);
    for i in 0..BAR_WIDTH {
        bar.push(if i < filled { '#' } else { '.' });
    }
    bar
}

pub fn render_analysis(dataset: &Dataset) -> String {
    let summary = dataset.summary();
    let mut output = String::new();

    let _ = writeln!(output, "## Dataset Overview");
    let _ = writeln!(output, "- Total customers: {}", summary.total_customers);
    let _ = writeln!(output, "- Churned: {}", summary.churn_count);
    let _ = writeln!(output, "- Churn rate: {:.1}%", summary.churn_rate_pct);
    let _ = writeln!(
        output,
        "- Average tenure: {:.1} months",
        summary.avg_tenure_months
    );

    let retained = summary.total_customers - summary.churn_count;
    let _ = writeln!(output);
    let _ = writeln!(output, "## Churn Distribution");
    let _ = writeln!(output, "- Retained: {retained}");
    let _ = writeln!(output, "- Churned: {}", summary.churn_count);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Churn by Contract Type");
    let breakdown = dataset.churn_by_contract();
    if breakdown.is_empty() {
        let _ = writeln!(output, "No rows in the dataset.");
    } else {
        for group in &breakdown {
            let _ = writeln!(
                output,
                "- {}: {:.1}% churn ({} of {}) {}",
                group.contract,
                group.churn_rate_pct,
                group.churned,
                group.total,
                render_bar(group.churn_rate_pct)
            );
        }
    }

    output
}

pub fn render_performance() -> String {
    let mut output = String::new();

    let _ = writeln!(output, "## Model Performance");
    for metric in &HEADLINE_METRICS {
        let _ = writeln!(
            output,
            "- {}: {} ({})",
            metric.name, metric.value, metric.delta
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Model Comparison");
    let _ = writeln!(output, "| Model | Accuracy | F1-Score | AUC |");
    let _ = writeln!(output, "|---|---|---|---|");
    for row in &MODEL_COMPARISON {
        let _ = writeln!(
            output,
            "| {} | {:.3} | {:.2} | {:.2} |",
            row.model, row.accuracy, row.f1_score, row.auc
        );
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "XGBoost shows the strongest overall performance.");

    output
}

fn render_artifacts(artifacts: Option<&ModelArtifacts>) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "## Model Artifacts");
    match artifacts {
        Some(artifacts) => {
            let _ = writeln!(output, "- Classifier: {}", artifacts.model.describe());
            let _ = writeln!(output, "- Scaler: {}", artifacts.scaler.describe());
        }
        None => {
            let _ = writeln!(
                output,
                "Artifacts not available; predictions use the rule engine."
            );
        }
    }
    output
}

/// Assemble the full markdown report. A section whose inputs failed to load
/// renders an explanatory line instead of taking the whole report down.
pub fn build_report(
    dataset: Option<&Dataset>,
    artifacts: Option<&ModelArtifacts>,
    generated_on: NaiveDate,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Customer Churn Dashboard Report");
    let _ = writeln!(output, "Generated on {generated_on}");
    let _ = writeln!(output);

    match dataset {
        Some(dataset) => output.push_str(&render_analysis(dataset)),
        None => {
            let _ = writeln!(output, "## Dataset Overview");
            let _ = writeln!(output, "Dataset unavailable; analysis sections skipped.");
        }
    }

    let _ = writeln!(output);
    output.push_str(&render_performance());

    let _ = writeln!(output);
    output.push_str(&render_artifacts(artifacts));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CustomerRow;

    fn sample_dataset() -> Dataset {
        let mut rows = Vec::new();
        for i in 0..10 {
            rows.push(CustomerRow {
                tenure_months: 6 + i,
                contract: if i < 6 {
                    "Month-to-month".to_string()
                } else {
                    "Two year".to_string()
                },
                total_charges: 100.0 * (i + 1) as f64,
                churned: i % 2 == 0,
            });
        }
        Dataset { rows }
    }

    #[test]
    fn gauge_buckets_match_category_thresholds() {
        assert!(render_gauge(30).ends_with("30/100 (low)"));
        assert!(render_gauge(31).ends_with("31/100 (medium)"));
        assert!(render_gauge(61).ends_with("61/100 (high)"));

        // 95/100 over a 25-char bar fills 23 cells.
        let expected_bar = format!("[{}{}]", "#".repeat(23), "-".repeat(2));
        assert!(render_gauge(95).starts_with(&expected_bar));
    }

    #[test]
    fn analysis_lists_every_contract_group() {
        let rendered = render_analysis(&sample_dataset());
        assert!(rendered.contains("- Total customers: 10"));
        assert!(rendered.contains("Month-to-month"));
        assert!(rendered.contains("Two year"));
        assert!(rendered.contains("## Churn Distribution"));
    }

    #[test]
    fn performance_renders_the_fixed_tables() {
        let rendered = render_performance();
        assert!(rendered.contains("- Accuracy: 80.5% (+2.3%)"));
        assert!(rendered.contains("| Logistic Regression | 0.780 | 0.55 | 0.84 |"));
        assert!(rendered.contains("| Random Forest | 0.790 | 0.58 | 0.85 |"));
        assert!(rendered.contains("| XGBoost | 0.805 | 0.60 | 0.86 |"));
    }

    #[test]
    fn report_degrades_section_by_section() {
        let generated_on = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let report = build_report(None, None, generated_on);

        assert!(report.contains("Generated on 2026-08-07"));
        assert!(report.contains("Dataset unavailable; analysis sections skipped."));
        assert!(report.contains("Artifacts not available"));
        // The static performance section renders regardless.
        assert!(report.contains("| XGBoost | 0.805 | 0.60 | 0.86 |"));
    }

    #[test]
    fn full_report_contains_every_section() {
        let generated_on = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let dataset = sample_dataset();
        let report = build_report(Some(&dataset), None, generated_on);

        for heading in [
            "# Customer Churn Dashboard Report",
            "## Dataset Overview",
            "## Churn Distribution",
            "## Churn by Contract Type",
            "## Model Performance",
            "## Model Comparison",
            "## Model Artifacts",
        ] {
            assert!(report.contains(heading), "missing {heading}");
        }
    }
}
