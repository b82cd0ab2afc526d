use crate::core::count::{max_reduced_shortfall, pizza_count, reduced_count};
use crate::core::optimizer::best_combination;
use crate::domain::model::{Pizza, PizzaSettings, PizzaSize, PlanOptions, PlanSummary, PlanVariant};
use crate::utils::error::{Result, SplitError};

/// Builds the purchase list for `orders` (size, count) in the given order,
/// applying the every-Nth-pizza-free promotion across the whole list.
pub fn build_pizza_list(settings: &PizzaSettings, orders: &[(PizzaSize, u32)]) -> Vec<Pizza> {
    let mut pizzas = Vec::new();
    let mut position: u32 = 0;

    for &(size, count) in orders {
        for _ in 0..count {
            position += 1;
            let is_free = settings.use_free_pizza
                && settings.free_pizza_threshold > 0
                && position % settings.free_pizza_threshold == 0;

            let size = if is_free && settings.free_pizza_is_small {
                PizzaSize::Small
            } else {
                size
            };
            let list_price = settings.price_of(size);

            pizzas.push(Pizza {
                size,
                slices: settings.slices_of(size),
                price: if is_free { 0.0 } else { list_price },
                list_price,
                is_free,
            });
        }
    }

    pizzas
}

pub fn purchased_slices(pizzas: &[Pizza]) -> Result<u32> {
    pizzas.iter().try_fold(0u32, |total, pizza| {
        total.checked_add(pizza.slices).ok_or_else(|| {
            SplitError::validation(format!(
                "purchased slices for {} pizzas exceed {}",
                pizzas.len(),
                u32::MAX
            ))
        })
    })
}

pub fn free_pizza_count(pizzas: &[Pizza]) -> u32 {
    pizzas.iter().filter(|pizza| pizza.is_free).count() as u32
}

pub fn large_plan(required: u32, settings: &PizzaSettings) -> Result<Vec<Pizza>> {
    let count = pizza_count(required, settings.large_pizza_slices)?;
    Ok(build_pizza_list(settings, &[(PizzaSize::Large, count)]))
}

pub fn small_plan(required: u32, settings: &PizzaSettings) -> Result<Vec<Pizza>> {
    let count = pizza_count(required, settings.small_pizza_slices)?;
    Ok(build_pizza_list(settings, &[(PizzaSize::Small, count)]))
}

/// Optimizer combination, or `None` when small pizzas are not smaller or the optimizer picks none.
pub fn optimal_plan(required: u32, settings: &PizzaSettings) -> Result<Option<Vec<Pizza>>> {
    if settings.small_equal() {
        return Ok(None);
    }
    let combo = best_combination(
        required,
        settings.large_pizza_slices,
        settings.small_pizza_slices,
    )?;
    if combo.small == 0 {
        return Ok(None);
    }
    Ok(Some(build_pizza_list(
        settings,
        &[(PizzaSize::Large, combo.large), (PizzaSize::Small, combo.small)],
    )))
}

/// One large pizza fewer than the large plan, offered only for a small shortfall.
pub fn reduced_plan(required: u32, settings: &PizzaSettings) -> Result<Option<Vec<Pizza>>> {
    let Some(count) = reduced_count(required, settings.large_pizza_slices)? else {
        return Ok(None);
    };
    let pizzas = build_pizza_list(settings, &[(PizzaSize::Large, count)]);
    let shortfall = i64::from(required) - i64::from(purchased_slices(&pizzas)?);
    let limit = i64::from(max_reduced_shortfall(settings.large_pizza_slices));

    if shortfall > 0 && shortfall <= limit {
        Ok(Some(pizzas))
    } else {
        Ok(None)
    }
}

/// Large pizzas for every full multiple plus one small pizza for any remainder.
pub fn mixed_plan(required: u32, settings: &PizzaSettings) -> Result<Vec<Pizza>> {
    if settings.large_pizza_slices == 0 {
        return Err(SplitError::validation(
            "large pizza slices must be positive to plan a mixed order",
        ));
    }
    let large = required / settings.large_pizza_slices;
    let small = u32::from(required % settings.large_pizza_slices > 0);
    Ok(build_pizza_list(
        settings,
        &[(PizzaSize::Large, large), (PizzaSize::Small, small)],
    ))
}

pub fn plan_for_variant(
    required: u32,
    settings: &PizzaSettings,
    variant: PlanVariant,
) -> Result<Vec<Pizza>> {
    let plan = match variant {
        PlanVariant::Large => Some(large_plan(required, settings)?),
        PlanVariant::Small => Some(small_plan(required, settings)?),
        PlanVariant::Optimal => optimal_plan(required, settings)?,
        PlanVariant::Reduced => reduced_plan(required, settings)?,
    };

    plan.ok_or_else(|| {
        SplitError::validation(format!(
            "plan variant '{}' is not available for {} required slices",
            variant, required
        ))
    })
}

pub fn summarize(variant: PlanVariant, required: u32, pizzas: &[Pizza]) -> Result<PlanSummary> {
    let purchased = purchased_slices(pizzas)?;
    let large_pizzas = pizzas
        .iter()
        .filter(|pizza| pizza.size == PizzaSize::Large)
        .count() as u32;

    Ok(PlanSummary {
        variant,
        large_pizzas,
        small_pizzas: pizzas.len() as u32 - large_pizzas,
        free_pizza_count: free_pizza_count(pizzas),
        purchased_slices: purchased,
        residual_slices: i64::from(purchased) - i64::from(required),
    })
}

pub fn plan_options(required: u32, settings: &PizzaSettings) -> Result<PlanOptions> {
    let large = large_plan(required, settings)?;
    let small = small_plan(required, settings)?;
    let optimal = optimal_plan(required, settings)?;
    let reduced = reduced_plan(required, settings)?;

    Ok(PlanOptions {
        required_slices: required,
        large: summarize(PlanVariant::Large, required, &large)?,
        small: summarize(PlanVariant::Small, required, &small)?,
        optimal: optimal
            .map(|p| summarize(PlanVariant::Optimal, required, &p))
            .transpose()?,
        reduced: reduced
            .map(|p| summarize(PlanVariant::Reduced, required, &p))
            .transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_promo() -> PizzaSettings {
        PizzaSettings {
            use_free_pizza: false,
            ..PizzaSettings::default()
        }
    }

    #[test]
    fn test_every_nth_pizza_is_free() {
        let settings = PizzaSettings::default();
        let pizzas = build_pizza_list(&settings, &[(PizzaSize::Large, 7)]);

        assert_eq!(free_pizza_count(&pizzas), 2);
        assert!(pizzas[2].is_free);
        assert!(pizzas[5].is_free);
        assert_eq!(pizzas[2].price, 0.0);
        assert_eq!(pizzas[2].list_price, 800.0);
        assert!(!pizzas[0].is_free);
    }

    #[test]
    fn test_free_pizza_count_matches_floor_rule() {
        let settings = PizzaSettings {
            free_pizza_threshold: 4,
            ..PizzaSettings::default()
        };
        for n in 0..20u32 {
            let pizzas = build_pizza_list(&settings, &[(PizzaSize::Large, n)]);
            assert_eq!(free_pizza_count(&pizzas), n / 4);
        }
        for n in 0..20u32 {
            let pizzas = build_pizza_list(&no_promo(), &[(PizzaSize::Large, n)]);
            assert_eq!(free_pizza_count(&pizzas), 0);
        }
    }

    #[test]
    fn test_free_pizza_can_be_small() {
        let settings = PizzaSettings {
            free_pizza_is_small: true,
            ..PizzaSettings::default()
        };
        let pizzas = build_pizza_list(&settings, &[(PizzaSize::Large, 3)]);

        assert_eq!(pizzas[2].size, PizzaSize::Small);
        assert_eq!(pizzas[2].slices, 6);
        assert_eq!(pizzas[2].list_price, 520.0);
        assert_eq!(purchased_slices(&pizzas).unwrap(), 22);
    }

    #[test]
    fn test_free_rule_spans_mixed_sizes() {
        let pizzas = build_pizza_list(
            &PizzaSettings::default(),
            &[(PizzaSize::Large, 2), (PizzaSize::Small, 1)],
        );
        assert_eq!(pizzas[2].size, PizzaSize::Small);
        assert!(pizzas[2].is_free);
        assert_eq!(pizzas[2].list_price, 520.0);
    }

    #[test]
    fn test_large_plan_covers_requirement() {
        let pizzas = large_plan(17, &no_promo()).unwrap();
        assert_eq!(pizzas.len(), 3);
        assert_eq!(purchased_slices(&pizzas).unwrap(), 24);
    }

    #[test]
    fn test_optimal_plan_needs_smaller_small_pizzas() {
        let settings = no_promo();
        let pizzas = optimal_plan(14, &settings).unwrap().unwrap();
        assert_eq!(pizzas.len(), 2);
        assert_eq!(pizzas[0].size, PizzaSize::Large);
        assert_eq!(pizzas[1].size, PizzaSize::Small);

        // Optimizer picks no small pizza for an exact multiple of 8.
        assert!(optimal_plan(16, &settings).unwrap().is_none());

        let reversed = PizzaSettings {
            small_pizza_slices: 10,
            ..no_promo()
        };
        assert!(optimal_plan(14, &reversed).unwrap().is_none());
    }

    #[test]
    fn test_reduced_plan_only_for_small_shortfall() {
        let settings = no_promo();
        // 3 large = 24, reduced = 16, shortfall 2 <= 8 / 4
        let reduced = reduced_plan(18, &settings).unwrap().unwrap();
        assert_eq!(reduced.len(), 2);

        // shortfall 3 is too much
        assert!(reduced_plan(19, &settings).unwrap().is_none());
        // a single pizza cannot be reduced
        assert!(reduced_plan(7, &settings).unwrap().is_none());
    }

    #[test]
    fn test_mixed_plan() {
        let pizzas = mixed_plan(19, &no_promo()).unwrap();
        assert_eq!(pizzas.len(), 3);
        assert_eq!(pizzas[2].size, PizzaSize::Small);

        let exact = mixed_plan(16, &no_promo()).unwrap();
        assert!(exact.iter().all(|p| p.size == PizzaSize::Large));
        assert!(mixed_plan(0, &no_promo()).unwrap().is_empty());
    }

    #[test]
    fn test_plan_for_unavailable_variant_is_error() {
        assert!(plan_for_variant(19, &no_promo(), PlanVariant::Reduced).is_err());
        assert!(plan_for_variant(19, &no_promo(), PlanVariant::Large).is_ok());
    }

    #[test]
    fn test_plan_options() {
        let options = plan_options(18, &no_promo()).unwrap();

        assert_eq!(options.large.pizza_count(), 3);
        assert_eq!(options.large.residual_slices, 6);
        assert_eq!(options.small.pizza_count(), 3);
        assert_eq!(options.small.residual_slices, 0);
        let reduced = options.reduced.as_ref().unwrap();
        assert_eq!(reduced.residual_slices, -2);
        // 18 = 0*8 + 3*6
        let optimal = options.optimal.as_ref().unwrap();
        assert_eq!((optimal.large_pizzas, optimal.small_pizzas), (0, 3));
        assert_eq!(
            options.available(),
            vec![
                PlanVariant::Large,
                PlanVariant::Small,
                PlanVariant::Optimal,
                PlanVariant::Reduced
            ]
        );
    }

    #[test]
    fn test_purchased_slices_overflow_is_error() {
        let settings = PizzaSettings {
            large_pizza_slices: u32::MAX,
            ..no_promo()
        };
        let pizzas = build_pizza_list(&settings, &[(PizzaSize::Large, 2)]);
        assert!(purchased_slices(&pizzas).is_err());
        assert!(summarize(PlanVariant::Large, 1, &pizzas).is_err());
    }
}
