use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ContractType {
    MonthToMonth,
    OneYear,
    TwoYear,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::MonthToMonth => "month-to-month",
            ContractType::OneYear => "one-year",
            ContractType::TwoYear => "two-year",
        }
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum InternetService {
    None,
    Dsl,
    FiberOptic,
}

impl InternetService {
    pub fn as_str(&self) -> &'static str {
        match self {
            InternetService::None => "none",
            InternetService::Dsl => "dsl",
            InternetService::FiberOptic => "fiber-optic",
        }
    }
}

impl std::fmt::Display for InternetService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    ElectronicCheck,
    MailedCheck,
    BankTransferAuto,
    CreditCardAuto,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::ElectronicCheck => "electronic-check",
            PaymentMethod::MailedCheck => "mailed-check",
            PaymentMethod::BankTransferAuto => "bank-transfer-auto",
            PaymentMethod::CreditCardAuto => "credit-card-auto",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Gender::Male => "male",
            Gender::Female => "female",
        })
    }
}

/// One customer as collected by the prediction form. The demographic and
/// billing-total fields are accepted but carry no weight in the score.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerRecord {
    pub gender: Gender,
    pub senior_citizen: bool,
    pub partner: bool,
    pub dependents: bool,
    pub phone_service: bool,
    pub tenure_months: u32,
    pub internet_service: InternetService,
    pub contract: ContractType,
    pub monthly_charges: f64,
    pub total_charges: f64,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Medium => "medium",
            RiskCategory::High => "high",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub score: u32,
    pub category: RiskCategory,
    pub recommendations: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub total_customers: usize,
    pub churn_count: usize,
    pub churn_rate_pct: f64,
    pub avg_tenure_months: f64,
}

/// Churn breakdown for one contract type, as it appears in the source data.
#[derive(Debug, Clone, Serialize)]
pub struct ContractChurn {
    pub contract: String,
    pub total: usize,
    pub churned: usize,
    pub churn_rate_pct: f64,
}
