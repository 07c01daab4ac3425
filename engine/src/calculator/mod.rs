// Uses-based monthly cost comparison between the reference and a comparison product.
use crate::error::EngineError;
use shared::models::{ComparisonResult, ProductCost, ProductInputs, Recommendation};

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonInputs {
    pub reference: ProductInputs,
    pub comparison: ProductInputs,
    /// Comparison cases shipped per month.
    pub monthly_cases: f64,
}

/// Per-person uses one case provides: sheets per case / daily usage.
pub fn case_uses(product: &ProductInputs) -> Result<f64, EngineError> {
    if product.daily_usage == 0.0 {
        return Err(EngineError::DivisionByZero {
            product: product.short_name.clone(),
            quantity: "daily usage",
        });
    }
    Ok(product.pack_size * product.packs_per_case / product.daily_usage)
}

/// Cost of one person's daily usage: daily usage × price per pack / pack size.
pub fn daily_cost_per_person(product: &ProductInputs) -> Result<f64, EngineError> {
    if product.pack_size == 0.0 {
        return Err(EngineError::DivisionByZero {
            product: product.short_name.clone(),
            quantity: "pack size",
        });
    }
    Ok(product.daily_usage * product.price_per_pack / product.pack_size)
}

pub fn case_price(product: &ProductInputs) -> f64 {
    product.price_per_pack * product.packs_per_case
}

fn check_non_negative(value: f64, what: &str) -> Result<(), EngineError> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::InvalidInput(format!("{} must be a non-negative number, got {}", what, value)));
    }
    Ok(())
}

fn validate(inputs: &ComparisonInputs) -> Result<(), EngineError> {
    check_non_negative(inputs.monthly_cases, "monthly case count")?;
    for product in [&inputs.reference, &inputs.comparison] {
        check_non_negative(product.price_per_pack, &format!("price per pack of '{}'", product.short_name))?;
        check_non_negative(product.daily_usage, &format!("daily usage of '{}'", product.short_name))?;
        check_non_negative(product.pack_size, &format!("pack size of '{}'", product.short_name))?;
        check_non_negative(product.packs_per_case, &format!("packs per case of '{}'", product.short_name))?;
    }
    Ok(())
}

pub fn compute(inputs: &ComparisonInputs) -> Result<ComparisonResult, EngineError> {
    validate(inputs)?;
    let reference = &inputs.reference;
    let comparison = &inputs.comparison;

    let comparison_case_uses = case_uses(comparison)?;
    let reference_case_uses = case_uses(reference)?;
    if reference_case_uses == 0.0 {
        return Err(EngineError::DivisionByZero {
            product: reference.short_name.clone(),
            quantity: "sheets per case",
        });
    }

    let required_uses = comparison_case_uses * inputs.monthly_cases;
    let reference_required_cases = required_uses / reference_case_uses;

    let reference_monthly_cost = reference_required_cases * reference.price_per_pack * reference.packs_per_case;
    let comparison_monthly_cost = inputs.monthly_cases * comparison.price_per_pack * comparison.packs_per_case;
    if comparison_monthly_cost == 0.0 {
        return Err(EngineError::DivisionByZero {
            product: comparison.short_name.clone(),
            quantity: "monthly cost",
        });
    }

    let diff = comparison_monthly_cost - reference_monthly_cost;
    let rate = diff / comparison_monthly_cost * 100.0;

    Ok(ComparisonResult {
        reference: ProductCost {
            product: reference.clone(),
            daily_cost_per_person: daily_cost_per_person(reference)?,
            case_price: case_price(reference),
            case_uses: reference_case_uses,
            required_cases: reference_required_cases,
            monthly_cost: reference_monthly_cost,
        },
        comparison: ProductCost {
            product: comparison.clone(),
            daily_cost_per_person: daily_cost_per_person(comparison)?,
            case_price: case_price(comparison),
            case_uses: comparison_case_uses,
            required_cases: inputs.monthly_cases,
            monthly_cost: comparison_monthly_cost,
        },
        required_uses,
        diff,
        rate,
        recommendation: Recommendation::from_diff(diff),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, daily_usage: f64, pack_size: f64, packs_per_case: f64, price: f64) -> ProductInputs {
        ProductInputs {
            short_name: name.to_string(),
            daily_usage,
            pack_size,
            packs_per_case,
            price_per_pack: price,
            country_of_origin: None,
        }
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!((actual - expected).abs() < tolerance, "{} != {} (±{})", actual, expected, tolerance);
    }

    fn worked_example() -> ComparisonInputs {
        ComparisonInputs {
            reference: product("新エルナ", 6.71, 200.0, 35.0, 79.0),
            comparison: product("ソフト", 5.0, 200.0, 40.0, 70.0),
            monthly_cases: 50.0,
        }
    }

    #[test]
    fn test_worked_example() {
        let result = compute(&worked_example()).unwrap();

        assert_close(result.comparison.case_uses, 1600.0, 1e-9);
        assert_close(result.required_uses, 80000.0, 1e-6);
        assert_close(result.reference.case_uses, 1043.219, 1e-3);
        assert_close(result.reference.required_cases, 76.6857, 1e-4);
        assert_close(result.reference.monthly_cost, 212036.0, 1e-6);
        assert_close(result.comparison.monthly_cost, 140000.0, 1e-9);
        assert_close(result.diff, -72036.0, 1e-6);
        assert_close(result.rate, -51.4543, 1e-4);
        assert_eq!(result.recommendation, Recommendation::NoReduction);

        assert_close(result.reference.daily_cost_per_person, 6.71 * 79.0 / 200.0, 1e-12);
        assert_close(result.comparison.daily_cost_per_person, 1.75, 1e-12);
        assert_close(result.reference.case_price, 2765.0, 1e-9);
        assert_close(result.comparison.required_cases, 50.0, 1e-12);
    }

    #[test]
    fn test_cheaper_reference_is_cost_reduction() {
        let mut inputs = worked_example();
        inputs.reference.price_per_pack = 40.0;
        let result = compute(&inputs).unwrap();
        assert!(result.diff > 0.0);
        assert_eq!(result.recommendation, Recommendation::CostReduction);
        assert!(result.rate > 0.0);
    }

    #[test]
    fn test_equal_cost_is_no_reduction() {
        let inputs = ComparisonInputs {
            reference: product("新エルナ", 5.0, 200.0, 40.0, 70.0),
            comparison: product("ソフト", 5.0, 200.0, 40.0, 70.0),
            monthly_cases: 10.0,
        };
        let result = compute(&inputs).unwrap();
        assert_eq!(result.diff, 0.0);
        assert_eq!(result.rate, 0.0);
        assert_eq!(result.recommendation, Recommendation::NoReduction);
    }

    #[test]
    fn test_case_uses_decreases_with_usage() {
        let mut previous = f64::INFINITY;
        for usage in [0.5, 1.0, 2.0, 5.0, 6.71, 10.0, 100.0] {
            let uses = case_uses(&product("p", usage, 200.0, 35.0, 1.0)).unwrap();
            assert!(uses < previous, "case_uses({}) = {} not below {}", usage, uses, previous);
            previous = uses;
        }
    }

    #[test]
    fn test_zero_usage_is_division_by_zero() {
        let mut inputs = worked_example();
        inputs.comparison.daily_usage = 0.0;
        match compute(&inputs) {
            Err(EngineError::DivisionByZero { product, quantity }) => {
                assert_eq!(product, "ソフト");
                assert_eq!(quantity, "daily usage");
            }
            other => panic!("expected DivisionByZero, got {:?}", other),
        }

        let mut inputs = worked_example();
        inputs.reference.daily_usage = 0.0;
        assert!(matches!(compute(&inputs), Err(EngineError::DivisionByZero { .. })));
    }

    #[test]
    fn test_zero_pack_size_is_division_by_zero() {
        let mut inputs = worked_example();
        inputs.reference.pack_size = 0.0;
        assert!(matches!(compute(&inputs), Err(EngineError::DivisionByZero { .. })));
    }

    #[test]
    fn test_zero_monthly_cases_is_division_by_zero() {
        let mut inputs = worked_example();
        inputs.monthly_cases = 0.0;
        match compute(&inputs) {
            Err(EngineError::DivisionByZero { quantity, .. }) => assert_eq!(quantity, "monthly cost"),
            other => panic!("expected DivisionByZero, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_inputs_are_rejected() {
        let mut inputs = worked_example();
        inputs.monthly_cases = -1.0;
        assert!(matches!(compute(&inputs), Err(EngineError::InvalidInput(_))));

        let mut inputs = worked_example();
        inputs.comparison.price_per_pack = f64::NAN;
        assert!(matches!(compute(&inputs), Err(EngineError::InvalidInput(_))));
    }
}
