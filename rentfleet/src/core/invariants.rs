//! Semantic consistency checks over a whole registry.
//!
//! Run after restoring a snapshot: a violation means the snapshot does not
//! describe a state the engine could have produced.

use crate::core::registry::Registry;

/// Check cross-collection invariants:
/// - Every car's model reference resolves
/// - Rental histories belong to known cars
/// - At most one open record per registration number
/// - `in_use` set iff an open record exists
/// - Index buckets agree with the primary collections
pub fn validate_invariants(registry: &Registry) -> Vec<String> {
    let mut errors = Vec::new();

    for (reg, car) in &registry.cars {
        if !registry.models.contains_key(&car.model_name) {
            errors.push(format!(
                "car '{}' references unknown model '{}'",
                reg, car.model_name
            ));
        }
        let indexed = registry
            .model_index
            .get(&car.model_name)
            .is_some_and(|bucket| bucket.iter().any(|entry| entry == reg));
        if !indexed {
            errors.push(format!("car '{}' missing from its model index bucket", reg));
        }
        let open = registry
            .histories
            .get(reg)
            .map_or(0, |history| history.iter().filter(|r| r.is_open()).count());
        if open > 1 {
            errors.push(format!("car '{}' has {} open rentals", reg, open));
        }
        if car.in_use != (open > 0) {
            errors.push(format!(
                "car '{}' in_use flag disagrees with its open rentals",
                reg
            ));
        }
    }

    for reg in registry.histories.keys() {
        if !registry.cars.contains_key(reg) {
            errors.push(format!("rental history for unknown car '{}'", reg));
        }
    }

    for (model, bucket) in &registry.model_index {
        for reg in bucket {
            match registry.cars.get(reg) {
                Some(car) if car.model_name == *model => {}
                Some(_) => errors.push(format!(
                    "index lists car '{}' under wrong model '{}'",
                    reg, model
                )),
                None => errors.push(format!(
                    "index lists unknown car '{}' under model '{}'",
                    reg, model
                )),
            }
        }
    }

    let indexed: usize = registry.date_index.values().map(Vec::len).sum();
    let owned: usize = registry.histories.values().map(Vec::len).sum();
    if indexed != owned {
        errors.push(format!(
            "date index covers {} records, expected {}",
            indexed, owned
        ));
    }
    for (date, bucket) in &registry.date_index {
        for (reg, pos) in bucket {
            match registry.histories.get(reg).and_then(|h| h.get(*pos)) {
                Some(record) if record.rent_date == *date => {}
                Some(_) => errors.push(format!(
                    "date index entry for '{}' under {} has a different rent date",
                    reg, date
                )),
                None => errors.push(format!(
                    "date index entry for '{}' position {} does not resolve",
                    reg, pos
                )),
            }
        }
    }

    errors
}
