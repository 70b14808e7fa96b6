use thiserror::Error;

use crate::models::{
    ContractType, CustomerRecord, InternetService, PaymentMethod, RiskAssessment, RiskCategory,
};

/// Points contributed by each rule. The rules are independent; every matching
/// rule contributes, in any order, with no interaction terms.
pub const MONTH_TO_MONTH_POINTS: u32 = 30;
pub const SHORT_TENURE_POINTS: u32 = 25;
pub const FIBER_OPTIC_POINTS: u32 = 20;
pub const ELECTRONIC_CHECK_POINTS: u32 = 15;
pub const HIGH_MONTHLY_CHARGES_POINTS: u32 = 10;

pub const SHORT_TENURE_MONTHS: u32 = 12;
pub const HIGH_MONTHLY_CHARGES: f64 = 70.0;

/// Scores cap at 95 even though the raw rule sum can reach 100. The ceiling
/// is a fixed constant, not derived from the rule table.
pub const SCORE_CEILING: u32 = 95;

pub const HIGH_THRESHOLD: u32 = 60;
pub const MEDIUM_THRESHOLD: u32 = 30;

pub const MAX_TENURE_MONTHS: u32 = 72;
pub const MAX_MONTHLY_CHARGES: f64 = 150.0;

const HIGH_RECOMMENDATIONS: &[&str] = &[
    "offer special discount",
    "schedule urgent contact",
    "propose long-term contract",
];

const MEDIUM_RECOMMENDATIONS: &[&str] = &["send satisfaction survey", "collect feedback"];

const LOW_RECOMMENDATIONS: &[&str] = &[];

#[derive(Debug, Error, PartialEq)]
pub enum InvalidInput {
    #[error("tenure must be at most {MAX_TENURE_MONTHS} months, got {0}")]
    TenureMonths(u32),
    #[error("monthly charges must be a finite value between 0 and {MAX_MONTHLY_CHARGES}, got {0}")]
    MonthlyCharges(f64),
}

/// Score one customer against the additive rule table.
pub fn assess(record: &CustomerRecord) -> Result<RiskAssessment, InvalidInput> {
    validate(record)?;

    let mut points = 0;
    if record.contract == ContractType::MonthToMonth {
        points += MONTH_TO_MONTH_POINTS;
    }
    if record.tenure_months < SHORT_TENURE_MONTHS {
        points += SHORT_TENURE_POINTS;
    }
    if record.internet_service == InternetService::FiberOptic {
        points += FIBER_OPTIC_POINTS;
    }
    if record.payment_method == PaymentMethod::ElectronicCheck {
        points += ELECTRONIC_CHECK_POINTS;
    }
    if record.monthly_charges > HIGH_MONTHLY_CHARGES {
        points += HIGH_MONTHLY_CHARGES_POINTS;
    }

    let score = points.min(SCORE_CEILING);
    let category = category_for(score);

    Ok(RiskAssessment {
        score,
        category,
        recommendations: recommendations_for(category),
    })
}

pub fn validate(record: &CustomerRecord) -> Result<(), InvalidInput> {
    if record.tenure_months > MAX_TENURE_MONTHS {
        return Err(InvalidInput::TenureMonths(record.tenure_months));
    }
    if !record.monthly_charges.is_finite()
        || record.monthly_charges < 0.0
        || record.monthly_charges > MAX_MONTHLY_CHARGES
    {
        return Err(InvalidInput::MonthlyCharges(record.monthly_charges));
    }
    Ok(())
}

pub fn category_for(score: u32) -> RiskCategory {
    if score > HIGH_THRESHOLD {
        RiskCategory::High
    } else if score > MEDIUM_THRESHOLD {
        RiskCategory::Medium
    } else {
        RiskCategory::Low
    }
}

pub fn recommendations_for(category: RiskCategory) -> &'static [&'static str] {
    match category {
        RiskCategory::High => HIGH_RECOMMENDATIONS,
        RiskCategory::Medium => MEDIUM_RECOMMENDATIONS,
        RiskCategory::Low => LOW_RECOMMENDATIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn sample_record(
        contract: ContractType,
        tenure_months: u32,
        internet_service: InternetService,
        payment_method: PaymentMethod,
        monthly_charges: f64,
    ) -> CustomerRecord {
        CustomerRecord {
            gender: Gender::Female,
            senior_citizen: false,
            partner: true,
            dependents: false,
            phone_service: true,
            tenure_months,
            internet_service,
            contract,
            monthly_charges,
            total_charges: monthly_charges * tenure_months as f64,
            payment_method,
        }
    }

    #[test]
    fn all_rule_combinations_sum_and_clamp() {
        for mask in 0u32..32 {
            let month_to_month = mask & 1 != 0;
            let short_tenure = mask & 2 != 0;
            let fiber = mask & 4 != 0;
            let electronic_check = mask & 8 != 0;
            let high_charges = mask & 16 != 0;

            let record = sample_record(
                if month_to_month {
                    ContractType::MonthToMonth
                } else {
                    ContractType::TwoYear
                },
                if short_tenure { 3 } else { 40 },
                if fiber {
                    InternetService::FiberOptic
                } else {
                    InternetService::Dsl
                },
                if electronic_check {
                    PaymentMethod::ElectronicCheck
                } else {
                    PaymentMethod::CreditCardAuto
                },
                if high_charges { 80.0 } else { 50.0 },
            );

            let mut expected = 0;
            if month_to_month {
                expected += 30;
            }
            if short_tenure {
                expected += 25;
            }
            if fiber {
                expected += 20;
            }
            if electronic_check {
                expected += 15;
            }
            if high_charges {
                expected += 10;
            }
            let expected = expected.min(95);

            let assessment = assess(&record).unwrap();
            assert_eq!(assessment.score, expected, "mask {mask:05b}");
        }
    }

    #[test]
    fn all_rules_matching_caps_at_ninety_five() {
        let record = sample_record(
            ContractType::MonthToMonth,
            3,
            InternetService::FiberOptic,
            PaymentMethod::ElectronicCheck,
            80.0,
        );
        let assessment = assess(&record).unwrap();
        assert_eq!(assessment.score, 95);
        assert_eq!(assessment.category, RiskCategory::High);
        assert_eq!(
            assessment.recommendations,
            [
                "offer special discount",
                "schedule urgent contact",
                "propose long-term contract"
            ]
        );
    }

    #[test]
    fn no_rules_matching_is_low_with_no_recommendations() {
        let record = sample_record(
            ContractType::TwoYear,
            40,
            InternetService::Dsl,
            PaymentMethod::CreditCardAuto,
            50.0,
        );
        let assessment = assess(&record).unwrap();
        assert_eq!(assessment.score, 0);
        assert_eq!(assessment.category, RiskCategory::Low);
        assert!(assessment.recommendations.is_empty());
    }

    #[test]
    fn category_boundaries_are_exact() {
        assert_eq!(category_for(30), RiskCategory::Low);
        assert_eq!(category_for(31), RiskCategory::Medium);
        assert_eq!(category_for(60), RiskCategory::Medium);
        assert_eq!(category_for(61), RiskCategory::High);
    }

    #[test]
    fn recommendations_depend_only_on_category() {
        assert_eq!(
            recommendations_for(RiskCategory::Medium),
            ["send satisfaction survey", "collect feedback"]
        );
        assert_eq!(
            recommendations_for(RiskCategory::Medium),
            recommendations_for(RiskCategory::Medium)
        );
        assert!(recommendations_for(RiskCategory::Low).is_empty());
    }

    #[test]
    fn assess_is_idempotent() {
        let record = sample_record(
            ContractType::MonthToMonth,
            8,
            InternetService::Dsl,
            PaymentMethod::MailedCheck,
            72.5,
        );
        assert_eq!(assess(&record).unwrap(), assess(&record).unwrap());
    }

    #[test]
    fn cosmetic_fields_do_not_move_the_score() {
        let mut record = sample_record(
            ContractType::OneYear,
            20,
            InternetService::FiberOptic,
            PaymentMethod::BankTransferAuto,
            65.0,
        );
        let baseline = assess(&record).unwrap();

        record.gender = Gender::Male;
        record.senior_citizen = true;
        record.partner = false;
        record.dependents = true;
        record.phone_service = false;
        record.total_charges = 9999.0;

        assert_eq!(assess(&record).unwrap(), baseline);
    }

    #[test]
    fn rejects_out_of_range_tenure() {
        let record = sample_record(
            ContractType::OneYear,
            73,
            InternetService::Dsl,
            PaymentMethod::MailedCheck,
            50.0,
        );
        assert_eq!(assess(&record).unwrap_err(), InvalidInput::TenureMonths(73));
    }

    #[test]
    fn rejects_out_of_range_monthly_charges() {
        for charges in [-1.0, 150.5, f64::NAN, f64::INFINITY] {
            let record = sample_record(
                ContractType::OneYear,
                20,
                InternetService::Dsl,
                PaymentMethod::MailedCheck,
                charges,
            );
            assert!(matches!(
                assess(&record).unwrap_err(),
                InvalidInput::MonthlyCharges(_)
            ));
        }
    }
}
