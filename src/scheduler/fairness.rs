//! Sélection du candidat le moins chargé.
//!
//! Charge normalisée par la quotité (fte) d'abord, puis départage
//! déterministe par le nom : mêmes entrées, même choix.

use super::state::ScheduleState;
use crate::model::{StaffId, StaffRegistry};
use std::cmp::Ordering;

fn normalized(units: u32, fte: f64) -> f64 {
    f64::from(units) / fte
}

/// Minimise (duty/fte, duty, nom). `None` si aucun candidat.
pub fn pick_fair(
    candidates: &[StaffId],
    state: &ScheduleState,
    registry: &StaffRegistry,
) -> Option<StaffId> {
    candidates.iter().copied().min_by(|&a, &b| {
        let (fa, fb) = (registry.get(a).fte, registry.get(b).fte);
        let (da, db) = (state.duty_count(a), state.duty_count(b));
        normalized(da, fa)
            .total_cmp(&normalized(db, fb))
            .then(da.cmp(&db))
            .then_with(|| by_name(registry, a, b))
    })
}

/// Minimise (weekends/fte, duty/fte, nom). `None` si aucun candidat.
pub fn pick_fair_weekend(
    candidates: &[StaffId],
    state: &ScheduleState,
    registry: &StaffRegistry,
) -> Option<StaffId> {
    candidates.iter().copied().min_by(|&a, &b| {
        let (fa, fb) = (registry.get(a).fte, registry.get(b).fte);
        normalized(state.weekend_count(a), fa)
            .total_cmp(&normalized(state.weekend_count(b), fb))
            .then_with(|| {
                normalized(state.duty_count(a), fa).total_cmp(&normalized(state.duty_count(b), fb))
            })
            .then_with(|| by_name(registry, a, b))
    })
}

fn by_name(registry: &StaffRegistry, a: StaffId, b: StaffId) -> Ordering {
    registry.name(a).cmp(registry.name(b))
}
