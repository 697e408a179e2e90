//! The registry engine: entity collections, derived indices, and the
//! rent/return/removal state machine.
//!
//! The registry is the sole owner of all collections. Lookups hand out
//! immutable borrows; every mutation goes through a registry operation so
//! the derived indices stay consistent with the primary collections.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::core::config::RegistryConfig;
use crate::core::cost::{rental_cost, state_for_damage};
use crate::core::types::{AddOutcome, RentOutcome};
use crate::fleet::{Car, Driver, Model, RemovedCarData, RentRecord};

/// Position of a record inside its car's history.
///
/// Positions are stable: histories are append-only and only ever purged
/// wholesale together with their car.
type RecordPos = (String, usize);

#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub(crate) config: RegistryConfig,
    pub(crate) models: HashMap<String, Model>,
    pub(crate) cars: HashMap<String, Car>,
    pub(crate) drivers: HashMap<u64, Driver>,
    /// Rental histories keyed by registration number. This map owns every
    /// record and doubles as the records-by-car index.
    pub(crate) histories: HashMap<String, Vec<RentRecord>>,
    /// Registration numbers per model name.
    pub(crate) model_index: HashMap<String, Vec<String>>,
    /// Rent-date ordering over all records.
    pub(crate) date_index: BTreeMap<NaiveDate, Vec<RecordPos>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Rebuild a registry from its persisted parts, reconstructing every
    /// derived index. Records must arrive in insertion order per car.
    pub fn from_parts(
        config: RegistryConfig,
        models: Vec<Model>,
        cars: Vec<Car>,
        drivers: Vec<Driver>,
        records: Vec<RentRecord>,
    ) -> Self {
        let mut registry = Self::with_config(config);
        for model in models {
            registry.models.insert(model.name.clone(), model);
        }
        for car in cars {
            registry
                .model_index
                .entry(car.model_name.clone())
                .or_default()
                .push(car.reg_number.clone());
            registry.cars.insert(car.reg_number.clone(), car);
        }
        for driver in drivers {
            registry.drivers.insert(driver.license_id, driver);
        }
        for record in records {
            let history = registry.histories.entry(record.reg_number.clone()).or_default();
            registry
                .date_index
                .entry(record.rent_date)
                .or_default()
                .push((record.reg_number.clone(), history.len()));
            history.push(record);
        }
        registry
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RegistryConfig) {
        self.config = config;
    }

    pub fn fuel_price(&self) -> u32 {
        self.config.fuel_price
    }

    pub fn set_fuel_price(&mut self, price: u32) {
        self.config.fuel_price = price;
    }

    pub fn fine_percent(&self) -> u32 {
        self.config.fine_percent
    }

    pub fn set_fine_percent(&mut self, percent: u32) {
        self.config.fine_percent = percent;
    }

    // ---- entity management ----

    pub fn add_model(&mut self, model: Model) -> AddOutcome {
        if self.models.contains_key(&model.name) {
            return AddOutcome::ModelExists;
        }
        debug!(model = %model.name, "model added");
        self.models.insert(model.name.clone(), model);
        AddOutcome::Ok
    }

    /// Insert a car. The referenced model must already exist; on success the
    /// car also joins its model's index bucket.
    pub fn add_car(&mut self, car: Car) -> AddOutcome {
        if !self.models.contains_key(&car.model_name) {
            return AddOutcome::NoModel;
        }
        if self.cars.contains_key(&car.reg_number) {
            return AddOutcome::CarExists;
        }
        debug!(reg = %car.reg_number, model = %car.model_name, "car added");
        self.model_index
            .entry(car.model_name.clone())
            .or_default()
            .push(car.reg_number.clone());
        self.cars.insert(car.reg_number.clone(), car);
        AddOutcome::Ok
    }

    pub fn add_driver(&mut self, driver: Driver) -> AddOutcome {
        if self.drivers.contains_key(&driver.license_id) {
            return AddOutcome::DriverExists;
        }
        debug!(license = driver.license_id, "driver added");
        self.drivers.insert(driver.license_id, driver);
        AddOutcome::Ok
    }

    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    pub fn car(&self, reg_number: &str) -> Option<&Car> {
        self.cars.get(reg_number)
    }

    pub fn driver(&self, license_id: u64) -> Option<&Driver> {
        self.drivers.get(&license_id)
    }

    /// Recolor a car. Returns false if the car is unknown.
    pub fn set_car_color(&mut self, reg_number: &str, color: &str) -> bool {
        match self.cars.get_mut(reg_number) {
            Some(car) => {
                car.color = color.to_string();
                true
            }
            None => false,
        }
    }

    /// Update a driver's phone number. Returns false if the driver is unknown.
    pub fn set_driver_phone(&mut self, license_id: u64, phone: &str) -> bool {
        match self.drivers.get_mut(&license_id) {
            Some(driver) => {
                driver.phone = phone.to_string();
                true
            }
            None => false,
        }
    }

    // ---- rental transitions ----

    /// Start a rental: creates an open record, indexes it, and marks the car
    /// in use. `rent_days` is not bounded here; validating it is the
    /// caller's concern.
    pub fn rent_car(
        &mut self,
        reg_number: &str,
        license_id: u64,
        rent_date: NaiveDate,
        rent_days: u32,
    ) -> RentOutcome {
        let Some(car) = self.cars.get_mut(reg_number) else {
            return RentOutcome::NoCar;
        };
        if !self.drivers.contains_key(&license_id) {
            return RentOutcome::NoDriver;
        }
        if car.flagged_for_removal {
            return RentOutcome::CarRemoved;
        }
        if car.in_use {
            return RentOutcome::CarInUse;
        }
        car.in_use = true;
        let history = self.histories.entry(reg_number.to_string()).or_default();
        self.date_index
            .entry(rent_date)
            .or_default()
            .push((reg_number.to_string(), history.len()));
        history.push(RentRecord::open(reg_number, license_id, rent_date, rent_days));
        debug!(reg = reg_number, license = license_id, %rent_date, rent_days, "car rented");
        RentOutcome::Ok
    }

    /// Complete a rental.
    ///
    /// Returns `None` when no open record matches (no active rental for that
    /// car/driver pair). Otherwise closes the record, computes its cost,
    /// re-derives the car's condition from this return's damage alone, and
    /// clears the in-use flag. Damage at or above the remove threshold, or a
    /// pending removal flag, purges the car; the result then carries every
    /// purged record including the one just closed.
    pub fn return_car(
        &mut self,
        reg_number: &str,
        license_id: u64,
        return_date: NaiveDate,
        damage_percent: u32,
        tank_percent: u32,
    ) -> Option<RemovedCarData> {
        let history = self.histories.get_mut(reg_number)?;
        let pos = history
            .iter()
            .position(|record| record.license_id == license_id && record.is_open())?;
        let car = self.cars.get_mut(reg_number)?;

        let record = &mut history[pos];
        record.return_date = Some(return_date);
        record.damage_percent = damage_percent;
        record.tank_percent = tank_percent;
        match self.models.get(&car.model_name) {
            Some(model) => {
                record.cost = rental_cost(
                    &self.config,
                    model.price_per_day,
                    record.rent_days,
                    model.tank_capacity,
                    damage_percent,
                    tank_percent,
                );
            }
            None => {
                warn!(reg = reg_number, model = %car.model_name, "model missing at return, cost left at zero");
            }
        }

        car.in_use = false;
        // condition is re-derived first; only remove-threshold damage has no
        // mapped state, a flagged car keeps its updated condition in the result
        if damage_percent < self.config.remove_threshold {
            car.state = state_for_damage(&self.config, damage_percent);
        }
        let purge = damage_percent >= self.config.remove_threshold || car.flagged_for_removal;
        debug!(reg = reg_number, license = license_id, %return_date, damage_percent, purge, "car returned");
        if purge {
            return self.purge_car(reg_number);
        }
        Some(RemovedCarData {
            car: car.clone(),
            records: None,
        })
    }

    // ---- removal ----

    /// Remove a car, or flag it when it is currently out.
    ///
    /// Unknown car: `None`. In use and already flagged: `None` (idempotent).
    /// In use and unflagged: sets the flag and returns the `records: None`
    /// sentinel; the purge happens when the rental returns. Idle: purges the
    /// car and its whole rental history.
    pub fn remove_car(&mut self, reg_number: &str) -> Option<RemovedCarData> {
        let car = self.cars.get_mut(reg_number)?;
        if car.in_use {
            if car.flagged_for_removal {
                return None;
            }
            car.flagged_for_removal = true;
            debug!(reg = reg_number, "removal deferred, car is out");
            return Some(RemovedCarData {
                car: car.clone(),
                records: None,
            });
        }
        self.purge_car(reg_number)
    }

    /// Remove every removable car of a model.
    ///
    /// Cars currently out are deferred exactly like `remove_car` (flagged,
    /// finalized on return) and do not appear in the result; only fully
    /// removed cars do.
    pub fn remove_model(&mut self, model_name: &str) -> Vec<RemovedCarData> {
        let regs = self.model_index.get(model_name).cloned().unwrap_or_default();
        regs.iter()
            .filter_map(|reg| self.remove_car(reg))
            .filter(|data| data.records.is_some())
            .collect()
    }

    /// Drop the car from every collection and index, collecting its records.
    fn purge_car(&mut self, reg_number: &str) -> Option<RemovedCarData> {
        let car = self.cars.remove(reg_number)?;
        if let Some(bucket) = self.model_index.get_mut(&car.model_name) {
            bucket.retain(|reg| reg != reg_number);
            if bucket.is_empty() {
                self.model_index.remove(&car.model_name);
            }
        }
        let records = self.histories.remove(reg_number).unwrap_or_default();
        for bucket in self.date_index.values_mut() {
            bucket.retain(|(reg, _)| reg != reg_number);
        }
        self.date_index.retain(|_, bucket| !bucket.is_empty());
        debug!(reg = reg_number, purged = records.len(), "car purged");
        Some(RemovedCarData {
            car,
            records: Some(records),
        })
    }

    // ---- queries ----

    /// Cars of a model that are not currently out. Unknown model yields an
    /// empty list, never an error.
    pub fn cars_by_model(&self, model_name: &str) -> Vec<&Car> {
        self.cars_of_model(model_name)
            .into_iter()
            .filter(|car| !car.in_use)
            .collect()
    }

    /// Every car of a model, rented ones included.
    pub fn cars_of_model(&self, model_name: &str) -> Vec<&Car> {
        self.model_index
            .get(model_name)
            .into_iter()
            .flatten()
            .filter_map(|reg| self.cars.get(reg))
            .collect()
    }

    /// Distinct cars the driver has ever rented, resolved through the live
    /// collection (cars removed since are not reported).
    pub fn cars_by_driver(&self, license_id: u64) -> Vec<&Car> {
        self.histories
            .iter()
            .filter(|(_, records)| records.iter().any(|r| r.license_id == license_id))
            .filter_map(|(reg, _)| self.cars.get(reg))
            .collect()
    }

    /// Distinct drivers who have ever rented the car, resolved live.
    pub fn drivers_by_car(&self, reg_number: &str) -> Vec<&Driver> {
        let mut seen = HashSet::new();
        self.histories
            .get(reg_number)
            .into_iter()
            .flatten()
            .filter(|record| seen.insert(record.license_id))
            .filter_map(|record| self.drivers.get(&record.license_id))
            .collect()
    }

    /// Records whose rent date lies in `[from, to)`.
    pub fn rent_records_at(&self, from: NaiveDate, to: NaiveDate) -> Vec<&RentRecord> {
        if from > to {
            return Vec::new();
        }
        self.date_index
            .range(from..to)
            .flat_map(|(_, bucket)| bucket)
            .filter_map(|(reg, pos)| self.histories.get(reg).and_then(|h| h.get(*pos)))
            .collect()
    }
}
