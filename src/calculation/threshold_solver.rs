//! Closed-form income thresholds for a family composition.
//!
//! The solver answers "at what income does the payment change?" without
//! searching. Every income it reports is consistent with the engines: feeding
//! a reported zero-payment income back into the Benefit A engine yields a nil
//! fortnightly rate.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{HigherTierTaper, RateTable};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BenefitAThresholds, BenefitBThresholds, Child, Threshold, YoungestChildBand,
};

use super::child_rates::{ChildRateTotals, adjusted_child_rates, total_child_rates};
use super::money::{income_to_exhaust, round_income_up};

/// Solves the Benefit A thresholds for a set of children.
///
/// Incomes are family adjusted taxable income. The zero-payment income is
/// rounded up to the cent so that it always produces a nil rate.
///
/// # Example
///
/// ```
/// use family_benefit_engine::calculation::solve_benefit_a_thresholds;
/// use family_benefit_engine::config::RateTable;
/// use family_benefit_engine::models::{Child, Threshold};
/// use rust_decimal::Decimal;
///
/// let table = RateTable::default_2024_25();
/// let thresholds = solve_benefit_a_thresholds(&[Child::new(5).unwrap()], &table);
/// assert_eq!(thresholds.zero_payment, Threshold::Income(Decimal::new(12217434, 2)));
/// ```
pub fn solve_benefit_a_thresholds(children: &[Child], table: &RateTable) -> BenefitAThresholds {
    let a = &table.benefit_a;
    let contributions: Vec<_> = children
        .iter()
        .map(|child| adjusted_child_rates(child, table))
        .collect();
    let totals = total_child_rates(&contributions);

    let base_rate_reached = base_rate_reached(totals, table);
    let zero_payment = later(
        method_1_zero_income(totals, table),
        method_2_zero_income(totals, table),
    );
    let zero_payment = match zero_payment {
        Threshold::Income(income) => Threshold::Income(round_income_up(income)),
        other => other,
    };
    let supplement_cutoff = match zero_payment {
        Threshold::Income(income) => Threshold::Income(income.min(a.supplement_income_limit)),
        _ => Threshold::Income(a.supplement_income_limit),
    };

    debug!(
        children = children.len(),
        ?zero_payment,
        ?base_rate_reached,
        "Solved Benefit A thresholds"
    );

    BenefitAThresholds {
        lower_income_free_area: a.lower_income_free_area,
        base_rate_reached,
        higher_taper_start: a.higher_income_free_area,
        supplement_cutoff,
        zero_payment,
    }
}

/// Solves the Benefit B thresholds for a set of children.
///
/// When the rate table carries a published secondary cut-out table it is used
/// for couples whose youngest child is 12 or under; otherwise the cut-out is
/// solved from the standard rate and taper.
///
/// # Errors
///
/// Returns `InvalidHousehold` when `children` is empty, since Benefit B has no
/// youngest child to key on.
pub fn solve_benefit_b_thresholds(
    children: &[Child],
    table: &RateTable,
) -> EngineResult<BenefitBThresholds> {
    let youngest = children
        .iter()
        .map(Child::age)
        .min()
        .ok_or_else(|| EngineError::InvalidHousehold {
            field: "children".to_string(),
            message: "at least one child is required to solve Benefit B thresholds"
                .to_string(),
        })?;

    let b = &table.benefit_b;
    let couple_eligible = youngest < b.couple_age_limit;
    let single_eligible = youngest < b.single_age_limit;

    let secondary_cutoff = if !couple_eligible {
        Threshold::NotAvailable
    } else if let Some(cutoffs) = &b.secondary_cutoffs {
        match youngest {
            0..=4 => Threshold::Income(cutoffs.under_5),
            5..=12 => Threshold::Income(cutoffs.five_to_twelve),
            _ => Threshold::NotAvailable,
        }
    } else {
        let standard_rate = b.max_rates.for_band(YoungestChildBand::for_age(youngest));
        match income_to_exhaust(standard_rate, b.secondary_free_area, b.taper, table) {
            Some(income) => Threshold::Income(round_income_up(income)),
            None => Threshold::NeverReached,
        }
    };

    debug!(youngest, ?secondary_cutoff, "Solved Benefit B thresholds");

    Ok(BenefitBThresholds {
        primary_income_limit: b.primary_income_limit,
        secondary_free_area: b.secondary_free_area,
        secondary_cutoff,
        couple_eligible,
        single_eligible,
    })
}

/// Income at which Method 1 reaches the total base rate.
fn base_rate_reached(totals: ChildRateTotals, table: &RateTable) -> Threshold {
    let a = &table.benefit_a;
    if totals.maximum_rate <= totals.base_rate {
        return Threshold::Income(a.lower_income_free_area);
    }
    let excess = totals.maximum_rate - totals.base_rate;
    let first_tier = income_to_exhaust(excess, a.lower_income_free_area, a.primary_taper, table);

    match table.variant.higher_tier_taper {
        // The floor holds the rate at base until the higher threshold.
        HigherTierTaper::BaseRateFloor => match first_tier {
            Some(income) => Threshold::Income(income.min(a.higher_income_free_area)),
            None => Threshold::Income(a.higher_income_free_area),
        },
        HigherTierTaper::ContinuousFromMaximum => match first_tier {
            Some(income) if income <= a.higher_income_free_area => Threshold::Income(income),
            _ => {
                let remaining = excess - first_tier_reduction(table);
                match income_to_exhaust(
                    remaining,
                    a.higher_income_free_area,
                    a.secondary_taper,
                    table,
                ) {
                    Some(income) => Threshold::Income(income),
                    None => Threshold::NeverReached,
                }
            }
        },
    }
}

/// Income at which Method 1 reaches nil.
fn method_1_zero_income(totals: ChildRateTotals, table: &RateTable) -> Threshold {
    let a = &table.benefit_a;
    if totals.maximum_rate.is_zero() {
        return Threshold::Income(Decimal::ZERO);
    }

    match table.variant.higher_tier_taper {
        HigherTierTaper::BaseRateFloor => {
            if totals.base_rate > Decimal::ZERO {
                return income_to_exhaust(
                    totals.base_rate,
                    a.higher_income_free_area,
                    a.secondary_taper,
                    table,
                )
                .map_or(Threshold::NeverReached, Threshold::Income);
            }
            // With no base rate to floor at, the rate is nil from the first
            // cent above the higher threshold.
            match income_to_exhaust(
                totals.maximum_rate,
                a.lower_income_free_area,
                a.primary_taper,
                table,
            ) {
                Some(income) if income <= a.higher_income_free_area => Threshold::Income(income),
                _ => Threshold::Income(a.higher_income_free_area + Decimal::new(1, 2)),
            }
        }
        HigherTierTaper::ContinuousFromMaximum => {
            match income_to_exhaust(
                totals.maximum_rate,
                a.lower_income_free_area,
                a.primary_taper,
                table,
            ) {
                Some(income) if income <= a.higher_income_free_area => Threshold::Income(income),
                _ => {
                    let remaining = totals.maximum_rate - first_tier_reduction(table);
                    income_to_exhaust(
                        remaining,
                        a.higher_income_free_area,
                        a.secondary_taper,
                        table,
                    )
                    .map_or(Threshold::NeverReached, Threshold::Income)
                }
            }
        }
    }
}

/// Income at which Method 2 reaches nil.
fn method_2_zero_income(totals: ChildRateTotals, table: &RateTable) -> Threshold {
    let a = &table.benefit_a;
    if totals.base_rate.is_zero() {
        return Threshold::Income(Decimal::ZERO);
    }
    income_to_exhaust(
        totals.base_rate,
        a.higher_income_free_area,
        a.secondary_taper,
        table,
    )
    .map_or(Threshold::NeverReached, Threshold::Income)
}

/// Full fortnightly reduction accumulated between the two income-free areas.
fn first_tier_reduction(table: &RateTable) -> Decimal {
    let a = &table.benefit_a;
    (a.higher_income_free_area - a.lower_income_free_area) * a.primary_taper
        / table.annualisation_factor()
}

/// The later of two thresholds. `NeverReached` is later than any income.
fn later(first: Threshold, second: Threshold) -> Threshold {
    match (first, second) {
        (Threshold::Income(x), Threshold::Income(y)) => Threshold::Income(x.max(y)),
        (Threshold::Income(_), other) | (other, Threshold::Income(_)) => other,
        (first, _) => first,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::benefit_a::calculate_benefit_a;
    use crate::config::PolicyVariant;
    use crate::models::Household;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn child(age: u8) -> Child {
        Child::new(age).unwrap()
    }

    fn continuous_table() -> RateTable {
        RateTable::default_2024_25().with_variant(PolicyVariant {
            higher_tier_taper: HigherTierTaper::ContinuousFromMaximum,
            ..PolicyVariant::default()
        })
    }

    #[test]
    fn test_one_young_child_thresholds() {
        let table = RateTable::default_2024_25();

        let thresholds = solve_benefit_a_thresholds(&[child(5)], &table);

        assert_eq!(thresholds.lower_income_free_area, dec("65189"));
        assert_eq!(thresholds.higher_taper_start, dec("115997"));
        // 65189 + (222.04 - 71.26) * 26 / 0.20 = 84790.40
        assert_eq!(thresholds.base_rate_reached, Threshold::Income(dec("84790.4")));
        // 115997 + 71.26 * 26 / 0.30 = 122173.3333...
        assert_eq!(thresholds.zero_payment, Threshold::Income(dec("122173.34")));
        assert_eq!(thresholds.supplement_cutoff, Threshold::Income(dec("80000")));
    }

    #[test]
    fn test_zero_payment_round_trips_through_engine() {
        let table = RateTable::default_2024_25();
        let kids = vec![child(2), child(14)];

        let thresholds = solve_benefit_a_thresholds(&kids, &table);
        let income = thresholds.zero_payment.income().unwrap();

        let at = Household::single(income, kids.clone()).unwrap();
        let below = Household::single(income - dec("1"), kids).unwrap();

        assert_eq!(
            calculate_benefit_a(&at, &table).amounts.fortnightly_rate,
            Decimal::ZERO
        );
        assert!(calculate_benefit_a(&below, &table).amounts.fortnightly_rate > Decimal::ZERO);
    }

    #[test]
    fn test_no_children_zero_payment_at_zero_income() {
        let table = RateTable::default_2024_25();
        let thresholds = solve_benefit_a_thresholds(&[], &table);
        assert_eq!(thresholds.zero_payment, Threshold::Income(Decimal::ZERO));
        assert_eq!(thresholds.supplement_cutoff, Threshold::Income(Decimal::ZERO));
    }

    #[test]
    fn test_zero_secondary_taper_never_reaches_zero() {
        let mut table = RateTable::default_2024_25();
        table.benefit_a.secondary_taper = Decimal::ZERO;

        let thresholds = solve_benefit_a_thresholds(&[child(5)], &table);

        assert_eq!(thresholds.zero_payment, Threshold::NeverReached);
        assert_eq!(thresholds.supplement_cutoff, Threshold::Income(dec("80000")));
    }

    #[test]
    fn test_base_rate_reached_capped_at_higher_threshold() {
        let mut table = RateTable::default_2024_25();
        table.benefit_a.primary_taper = dec("0.01");

        let thresholds = solve_benefit_a_thresholds(&[child(5)], &table);

        assert_eq!(thresholds.base_rate_reached, Threshold::Income(dec("115997")));
    }

    #[test]
    fn test_wiped_base_rate_zero_at_higher_threshold() {
        let mut table = RateTable::default_2024_25();
        table.compliance_penalty = dec("80");
        table.benefit_a.primary_taper = dec("0.01");
        let failing = child(8).with_immunisation(false);

        let thresholds = solve_benefit_a_thresholds(&[failing], &table);

        // Max 142.04 cannot be tapered away by 0.01 before 115997, and the
        // base rate is nil.
        assert_eq!(thresholds.zero_payment, Threshold::Income(dec("115997.01")));

        let household = Household::single(dec("115997.01"), vec![failing]).unwrap();
        assert_eq!(
            calculate_benefit_a(&household, &table).amounts.fortnightly_rate,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_continuous_variant_zero_income() {
        let table = continuous_table();

        let thresholds = solve_benefit_a_thresholds(&[child(5)], &table);

        // Method 1 exhausts at 65189 + 222.04 * 130 = 94054.20, but Method 2
        // pays base until 122173.34.
        assert_eq!(thresholds.zero_payment, Threshold::Income(dec("122173.34")));
        assert_eq!(thresholds.base_rate_reached, Threshold::Income(dec("84790.4")));
    }

    #[test]
    fn test_benefit_b_published_cutoffs() {
        let table = RateTable::default_2024_25();

        let under_5 = solve_benefit_b_thresholds(&[child(3), child(9)], &table).unwrap();
        let school_age = solve_benefit_b_thresholds(&[child(12)], &table).unwrap();

        assert_eq!(under_5.secondary_cutoff, Threshold::Income(dec("33653")));
        assert_eq!(school_age.secondary_cutoff, Threshold::Income(dec("26207")));
        assert!(under_5.couple_eligible);
        assert_eq!(under_5.primary_income_limit, dec("117194"));
        assert_eq!(under_5.secondary_free_area, dec("6789"));
    }

    #[test]
    fn test_benefit_b_teenager_not_available_for_couples() {
        let table = RateTable::default_2024_25();

        let thresholds = solve_benefit_b_thresholds(&[child(13)], &table).unwrap();

        assert_eq!(thresholds.secondary_cutoff, Threshold::NotAvailable);
        assert!(!thresholds.couple_eligible);
        assert!(thresholds.single_eligible);
    }

    #[test]
    fn test_benefit_b_closed_form_without_published_table() {
        let mut table = RateTable::default_2024_25();
        table.benefit_b.secondary_cutoffs = None;

        let thresholds = solve_benefit_b_thresholds(&[child(3)], &table).unwrap();

        // 6789 + 188.86 * 26 / 0.20 = 31340.80
        assert_eq!(thresholds.secondary_cutoff, Threshold::Income(dec("31340.8")));
    }

    #[test]
    fn test_benefit_b_zero_taper_never_reached() {
        let mut table = RateTable::default_2024_25();
        table.benefit_b.secondary_cutoffs = None;
        table.benefit_b.taper = Decimal::ZERO;

        let thresholds = solve_benefit_b_thresholds(&[child(3)], &table).unwrap();

        assert_eq!(thresholds.secondary_cutoff, Threshold::NeverReached);
    }

    #[test]
    fn test_benefit_b_requires_children() {
        let table = RateTable::default_2024_25();

        match solve_benefit_b_thresholds(&[], &table) {
            Err(EngineError::InvalidHousehold { field, .. }) => assert_eq!(field, "children"),
            other => panic!("Expected InvalidHousehold, got {:?}", other),
        }
    }

    #[test]
    fn test_later_prefers_never_reached() {
        assert_eq!(
            later(Threshold::Income(dec("1")), Threshold::NeverReached),
            Threshold::NeverReached
        );
        assert_eq!(
            later(Threshold::Income(dec("1")), Threshold::Income(dec("2"))),
            Threshold::Income(dec("2"))
        );
    }

    proptest! {
        #[test]
        fn prop_zero_payment_income_gives_nil_rate(
            ages in proptest::collection::vec(0u8..=19, 1..4),
            continuous in any::<bool>(),
        ) {
            let table = if continuous { continuous_table() } else { RateTable::default_2024_25() };
            let kids: Vec<Child> = ages.into_iter().map(child).collect();

            let thresholds = solve_benefit_a_thresholds(&kids, &table);
            let income = thresholds.zero_payment.income().unwrap();
            let household = Household::single(income, kids).unwrap();

            prop_assert_eq!(
                calculate_benefit_a(&household, &table).amounts.fortnightly_rate,
                Decimal::ZERO
            );
        }
    }
}
