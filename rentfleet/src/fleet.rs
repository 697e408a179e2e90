//! Entity value types for the rental fleet.
//!
//! Identity for every entity is its key field alone: two cars with the same
//! registration number compare equal regardless of color or condition, and a
//! closed rent record compares equal to its open predecessor. Everything
//! else carries plain value semantics.

use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Vehicle model, keyed by name. Immutable once added to the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    /// Fuel tank capacity in litres.
    pub tank_capacity: u32,
    pub manufacturer: String,
    pub country: String,
    pub price_per_day: u32,
}

impl Model {
    pub fn new(
        name: &str,
        tank_capacity: u32,
        manufacturer: &str,
        country: &str,
        price_per_day: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            tank_capacity,
            manufacturer: manufacturer.to_string(),
            country: country.to_string(),
            price_per_day,
        }
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Model {}

impl Hash for Model {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Condition of a car, re-derived from the damage reported at each return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarState {
    Excellent,
    Good,
    Bad,
}

/// A fleet car, keyed by registration number.
///
/// `in_use` and `flagged_for_removal` are owned by the registry engine;
/// `flagged_for_removal` marks a rented car whose removal is deferred until
/// its return completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub reg_number: String,
    pub color: String,
    pub state: CarState,
    pub model_name: String,
    pub in_use: bool,
    pub flagged_for_removal: bool,
}

impl Car {
    pub fn new(reg_number: &str, color: &str, model_name: &str) -> Self {
        Self {
            reg_number: reg_number.to_string(),
            color: color.to_string(),
            state: CarState::Excellent,
            model_name: model_name.to_string(),
            in_use: false,
            flagged_for_removal: false,
        }
    }
}

impl PartialEq for Car {
    fn eq(&self, other: &Self) -> bool {
        self.reg_number == other.reg_number
    }
}

impl Eq for Car {}

impl Hash for Car {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.reg_number.hash(state);
    }
}

/// A driver, keyed by license id. Only the phone number is mutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub license_id: u64,
    pub name: String,
    pub birth_year: i32,
    pub phone: String,
}

impl Driver {
    pub fn new(license_id: u64, name: &str, birth_year: i32, phone: &str) -> Self {
        Self {
            license_id,
            name: name.to_string(),
            birth_year,
            phone: phone.to_string(),
        }
    }
}

impl PartialEq for Driver {
    fn eq(&self, other: &Self) -> bool {
        self.license_id == other.license_id
    }
}

impl Eq for Driver {}

impl Hash for Driver {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.license_id.hash(state);
    }
}

/// One rental transaction, keyed by (reg number, license, rent date, days).
///
/// A record with no return date is *open*: the car is currently out with
/// that driver. Closing fills in the return fields and the computed cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentRecord {
    pub reg_number: String,
    pub license_id: u64,
    pub rent_date: NaiveDate,
    pub rent_days: u32,
    pub return_date: Option<NaiveDate>,
    pub damage_percent: u32,
    pub tank_percent: u32,
    pub cost: f64,
}

impl RentRecord {
    /// Create an open record for a rental that just started.
    pub fn open(reg_number: &str, license_id: u64, rent_date: NaiveDate, rent_days: u32) -> Self {
        Self {
            reg_number: reg_number.to_string(),
            license_id,
            rent_date,
            rent_days,
            return_date: None,
            damage_percent: 0,
            tank_percent: 0,
            cost: 0.0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

impl PartialEq for RentRecord {
    fn eq(&self, other: &Self) -> bool {
        self.reg_number == other.reg_number
            && self.license_id == other.license_id
            && self.rent_date == other.rent_date
            && self.rent_days == other.rent_days
    }
}

impl Eq for RentRecord {}

impl Hash for RentRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.reg_number.hash(state);
        self.license_id.hash(state);
        self.rent_date.hash(state);
        self.rent_days.hash(state);
    }
}

/// Result of a removal (or removal-candidate) operation.
///
/// `records: None` means the car was not actually removed and the value is
/// informational (a deferred removal, or a plain return). An empty list
/// means the car was removed but had no rental history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedCarData {
    pub car: Car,
    pub records: Option<Vec<RentRecord>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn car_equality_is_reg_number_only() {
        let a = Car::new("R-100", "black", "Sprint");
        let mut b = Car::new("R-100", "red", "Sprint");
        b.state = CarState::Bad;
        b.in_use = true;
        assert_eq!(a, b);
        assert_ne!(a, Car::new("R-101", "black", "Sprint"));
    }

    #[test]
    fn record_equality_ignores_return_fields() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 1).expect("date");
        let open = RentRecord::open("R-100", 1000, date, 3);
        let mut closed = open.clone();
        closed.return_date = NaiveDate::from_ymd_opt(2025, 8, 6);
        closed.damage_percent = 5;
        closed.tank_percent = 80;
        closed.cost = 704.5;
        assert_eq!(open, closed);
    }

    #[test]
    fn model_and_driver_equality_are_key_only() {
        assert_eq!(
            Model::new("Sprint", 50, "Vornado", "Freedonia", 200),
            Model::new("Sprint", 60, "Other", "Elsewhere", 999)
        );
        assert_eq!(
            Driver::new(1000, "Mara Voss", 1990, "555-0101"),
            Driver::new(1000, "Someone Else", 1985, "555-0199")
        );
    }
}
