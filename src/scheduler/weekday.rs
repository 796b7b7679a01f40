use super::fairness::pick_fair;
use super::types::UnfilledSlot;
use super::{util, Scheduler};
use crate::model::StaffId;
use chrono::{Datelike, Weekday};
use std::collections::BTreeSet;

/// Nuits du lundi au jeudi ; le vendredi relève du passage week-end.
pub(super) fn assign_nights(scheduler: &mut Scheduler<'_>) {
    let days = scheduler.days.clone();
    for day in days {
        if util::is_weekend(day) || day.weekday() == Weekday::Fri {
            continue;
        }
        if scheduler.state.day(day).is_some_and(|d| d.night.is_some()) {
            continue;
        }

        let candidates: Vec<StaffId> = scheduler
            .pool(|m| m.can_full_service)
            .filter(|&id| scheduler.free_on(id, &[day]))
            .collect();

        let Some(winner) = pick_fair(&candidates, &scheduler.state, scheduler.registry) else {
            scheduler.warn(day, UnfilledSlot::Night);
            continue;
        };

        scheduler.state.day_mut(day).night = Some(winner);
        scheduler.state.add_duty(winner, 1);
        scheduler.state.grant_rest(winner, day);
        scheduler.state.grant_rest(winner, util::shift(day, 1));
    }
}

/// Service de jour, lundi au vendredi : toute personne éligible est affectée.
pub(super) fn assign_day_shifts(scheduler: &mut Scheduler<'_>) {
    let days = scheduler.days.clone();
    for day in days {
        if util::is_weekend(day) {
            continue;
        }
        let previous = util::shift_back(day, 1);
        let eligible: BTreeSet<StaffId> = scheduler
            .pool(|m| m.can_day)
            .filter(|&id| scheduler.free_on(id, &[day]))
            .filter(|&id| !scheduler.state.worked_night(id, previous))
            .collect();

        for &id in &eligible {
            scheduler.state.add_duty(id, 1);
        }
        scheduler.state.day_mut(day).day = eligible;
    }
}
