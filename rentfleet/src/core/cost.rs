//! Return-cost computation and condition-state derivation.

use crate::core::config::RegistryConfig;
use crate::fleet::CarState;

/// Cost of a completed rental.
///
/// Three components: the base price for the booked days, the fuel shortfall
/// priced per litre at the configured fuel price, and a damage fine
/// proportional to both the reported damage and the configured fine percent.
pub fn rental_cost(
    config: &RegistryConfig,
    price_per_day: u32,
    rent_days: u32,
    tank_capacity: u32,
    damage_percent: u32,
    tank_percent: u32,
) -> f64 {
    let base = f64::from(price_per_day) * f64::from(rent_days);
    let missing_litres =
        f64::from(tank_capacity) * f64::from(100 - tank_percent.min(100)) / 100.0;
    let fuel = f64::from(config.fuel_price) * missing_litres;
    let fine = base * f64::from(damage_percent) / 100.0 * f64::from(config.fine_percent) / 100.0;
    base + fuel + fine
}

/// Condition implied by a single return's damage percentage.
///
/// Damage at or above `remove_threshold` never reaches this function: the
/// car is removed instead of degraded.
pub fn state_for_damage(config: &RegistryConfig, damage_percent: u32) -> CarState {
    if damage_percent <= config.good_threshold {
        CarState::Excellent
    } else if damage_percent <= config.bad_threshold {
        CarState::Good
    } else {
        CarState::Bad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_sums_base_fuel_and_fine() {
        // 200/day * 3 days + 10/litre * 10 missing litres + 600 * 5% * 15%
        let cost = rental_cost(&RegistryConfig::default(), 200, 3, 50, 5, 80);
        assert_eq!(cost, 600.0 + 100.0 + 4.5);
    }

    #[test]
    fn full_tank_and_no_damage_cost_base_only() {
        let cost = rental_cost(&RegistryConfig::default(), 200, 3, 50, 0, 100);
        assert_eq!(cost, 600.0);
    }

    #[test]
    fn overfull_tank_report_is_clamped() {
        let cost = rental_cost(&RegistryConfig::default(), 200, 3, 50, 0, 120);
        assert_eq!(cost, 600.0);
    }

    #[test]
    fn damage_maps_to_states_at_threshold_boundaries() {
        let config = RegistryConfig::default();
        assert_eq!(state_for_damage(&config, 0), CarState::Excellent);
        assert_eq!(state_for_damage(&config, 10), CarState::Excellent);
        assert_eq!(state_for_damage(&config, 11), CarState::Good);
        assert_eq!(state_for_damage(&config, 30), CarState::Good);
        assert_eq!(state_for_damage(&config, 31), CarState::Bad);
        assert_eq!(state_for_damage(&config, 59), CarState::Bad);
    }
}
