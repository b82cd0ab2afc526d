use crate::domain::model::Pizza;

/// How purchased slices are priced against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlicePricing {
    /// Every slice costs the same.
    Uniform,
    /// A slice carries its own pizza's list price divided by that pizza's slice count.
    BySize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostBreakdown {
    pub total_cost: f64,
    pub free_pizza_value: f64,
    pub price_per_slice: f64,
    pub common_cost: f64,
    pub participant_costs: Vec<f64>,
}

/// Sum of what was actually paid: free pizzas are excluded.
pub fn total_cost(pizzas: &[Pizza]) -> f64 {
    pizzas
        .iter()
        .filter(|pizza| !pizza.is_free)
        .map(|pizza| pizza.price)
        .sum()
}

pub fn free_pizza_value(pizzas: &[Pizza]) -> f64 {
    pizzas
        .iter()
        .filter(|pizza| pizza.is_free)
        .map(|pizza| pizza.list_price)
        .sum()
}

pub fn price_per_slice(basis: f64, purchased_slices: u64) -> f64 {
    if purchased_slices == 0 {
        return 0.0;
    }
    basis / purchased_slices as f64
}

/// Derives the cost of an order and of each participant's share.
///
/// `allocations` are in participant order and must not exceed the purchased
/// slices in total. An `order_total` above zero replaces the theoretical cost
/// as the amount to split, so a real receipt can be reconciled against the plan.
pub fn derive_costs(
    pizzas: &[Pizza],
    allocations: &[u32],
    pricing: SlicePricing,
    order_total: Option<f64>,
    split_common_slices: bool,
) -> CostBreakdown {
    let total_cost = total_cost(pizzas);
    let free_pizza_value = free_pizza_value(pizzas);
    let purchased: u64 = pizzas.iter().map(|pizza| u64::from(pizza.slices)).sum();
    let basis = order_total
        .filter(|amount| *amount > 0.0)
        .unwrap_or(total_cost);
    let per_slice = price_per_slice(basis, purchased);

    let list_total: f64 = pizzas.iter().map(|pizza| pizza.list_price).sum();
    let (mut participant_costs, common_cost) =
        if pricing == SlicePricing::BySize && list_total > 0.0 {
            let mut cursor = SliceCursor::new(pizzas, basis / list_total);
            let costs: Vec<f64> = allocations
                .iter()
                .map(|&slices| cursor.take(u64::from(slices)))
                .collect();
            (costs, cursor.take_rest())
        } else {
            let assigned: u64 = allocations.iter().map(|&slices| u64::from(slices)).sum();
            let costs: Vec<f64> = allocations
                .iter()
                .map(|&slices| f64::from(slices) * per_slice)
                .collect();
            (costs, purchased.saturating_sub(assigned) as f64 * per_slice)
        };

    if split_common_slices && !participant_costs.is_empty() {
        let share = common_cost / participant_costs.len() as f64;
        for cost in &mut participant_costs {
            *cost += share;
        }
    }

    CostBreakdown {
        total_cost,
        free_pizza_value,
        price_per_slice: per_slice,
        common_cost,
        participant_costs,
    }
}

/// Walks purchased slices in purchase order without materializing them.
///
/// A slice is worth its pizza's list price over its slice count, times `scale`.
struct SliceCursor<'a> {
    pizzas: &'a [Pizza],
    index: usize,
    remaining: u32,
    scale: f64,
}

impl<'a> SliceCursor<'a> {
    fn new(pizzas: &'a [Pizza], scale: f64) -> Self {
        Self {
            pizzas,
            index: 0,
            remaining: pizzas.first().map_or(0, |pizza| pizza.slices),
            scale,
        }
    }

    /// Value of the next `count` slices, or of as many as are left.
    fn take(&mut self, mut count: u64) -> f64 {
        let mut value = 0.0;
        while count > 0 {
            if self.remaining == 0 {
                self.index += 1;
                match self.pizzas.get(self.index) {
                    Some(pizza) => self.remaining = pizza.slices,
                    None => break,
                }
                continue;
            }
            let pizza = &self.pizzas[self.index];
            let taken = count.min(u64::from(self.remaining)) as u32;
            value += f64::from(taken) * pizza.list_price / f64::from(pizza.slices) * self.scale;
            self.remaining -= taken;
            count -= u64::from(taken);
        }
        value
    }

    fn take_rest(&mut self) -> f64 {
        self.take(u64::MAX)
    }
}
