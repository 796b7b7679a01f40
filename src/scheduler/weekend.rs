use super::fairness::{pick_fair, pick_fair_weekend};
use super::types::UnfilledSlot;
use super::{util, Scheduler};
use crate::model::StaffId;
use chrono::{Datelike, NaiveDate, Weekday};

/// Blocs du week-end pour chaque vendredi dont le samedi et le dimanche
/// restent dans le mois.
pub(super) fn assign_weekends(scheduler: &mut Scheduler<'_>) {
    let fridays: Vec<NaiveDate> = scheduler
        .days
        .iter()
        .copied()
        .filter(|d| d.weekday() == Weekday::Fri)
        .collect();

    for friday in fridays {
        let saturday = util::shift(friday, 1);
        let sunday = util::shift(friday, 2);
        if saturday.month() != scheduler.opts.month || sunday.month() != scheduler.opts.month {
            continue;
        }

        let night = assign_night_block(scheduler, friday, saturday, sunday);
        let day = assign_day_block(scheduler, friday, saturday, sunday, night);
        assign_visit(scheduler, friday, saturday, sunday, [night, day]);
        assign_friday_late(scheduler, friday, night);
    }
}

/// Nuit de vendredi à dimanche, engagement de 3 jours.
fn assign_night_block(
    scheduler: &mut Scheduler<'_>,
    friday: NaiveDate,
    saturday: NaiveDate,
    sunday: NaiveDate,
) -> Option<StaffId> {
    let block = [friday, saturday, sunday];
    let rest_days = u64::from(scheduler.opts.friday_night_rest_days);
    let candidates: Vec<StaffId> = scheduler
        .pool(|m| m.can_full_service)
        .filter(|&id| scheduler.free_on(id, &block))
        .filter(|&id| {
            (1..=rest_days).all(|delta| {
                !scheduler
                    .state
                    .has_assignment(id, util::shift_back(friday, delta))
            })
        })
        .filter(|&id| scheduler.below_weekend_cap(id))
        .collect();

    let Some(winner) = pick_fair_weekend(&candidates, &scheduler.state, scheduler.registry) else {
        scheduler.warn(friday, UnfilledSlot::WeekendNight);
        return None;
    };

    for date in block {
        scheduler.state.day_mut(date).night = Some(winner);
    }
    scheduler.state.add_duty(winner, 3);
    scheduler.state.add_weekend(winner);
    scheduler.state.grant_rest(winner, friday);
    scheduler.state.grant_rest(winner, util::shift(saturday, 1));
    scheduler.state.grant_rest(winner, util::shift(sunday, 1));
    Some(winner)
}

/// Journée samedi + dimanche, engagement de 2 jours.
fn assign_day_block(
    scheduler: &mut Scheduler<'_>,
    friday: NaiveDate,
    saturday: NaiveDate,
    sunday: NaiveDate,
    night: Option<StaffId>,
) -> Option<StaffId> {
    let block = [saturday, sunday];
    let candidates: Vec<StaffId> = scheduler
        .pool(|m| m.can_full_service)
        .filter(|&id| Some(id) != night)
        .filter(|&id| scheduler.free_on(id, &block))
        .filter(|&id| scheduler.below_weekend_cap(id))
        .collect();

    let Some(winner) = pick_fair_weekend(&candidates, &scheduler.state, scheduler.registry) else {
        scheduler.warn(friday, UnfilledSlot::WeekendDay);
        return None;
    };

    for date in block {
        scheduler.state.day_mut(date).weekend_day = Some(winner);
    }
    scheduler.state.add_duty(winner, 2);
    scheduler.state.add_weekend(winner);
    // repos le mercredi suivant (vendredi + 5)
    scheduler.state.grant_rest(winner, util::shift(friday, 5));
    Some(winner)
}

/// Visites du samedi et du dimanche ; ne compte pas comme week-end.
fn assign_visit(
    scheduler: &mut Scheduler<'_>,
    friday: NaiveDate,
    saturday: NaiveDate,
    sunday: NaiveDate,
    taken: [Option<StaffId>; 2],
) {
    let block = [saturday, sunday];
    let candidates: Vec<StaffId> = scheduler
        .pool(|m| m.can_visit)
        .filter(|&id| !taken.contains(&Some(id)))
        .filter(|&id| scheduler.free_on(id, &block))
        .collect();

    let Some(winner) = pick_fair(&candidates, &scheduler.state, scheduler.registry) else {
        scheduler.warn(friday, UnfilledSlot::WeekendVisit);
        return;
    };

    for date in block {
        scheduler.state.day_mut(date).visit = Some(winner);
    }
    scheduler.state.add_duty(winner, 2);
}

/// Vendredi jusqu'à 19h, distinct de la nuit.
fn assign_friday_late(scheduler: &mut Scheduler<'_>, friday: NaiveDate, night: Option<StaffId>) {
    let candidates: Vec<StaffId> = scheduler
        .pool(|m| m.can_full_service)
        .filter(|&id| Some(id) != night)
        .filter(|&id| scheduler.free_on(id, &[friday]))
        .collect();

    let Some(winner) = pick_fair(&candidates, &scheduler.state, scheduler.registry) else {
        scheduler.warn(friday, UnfilledSlot::FridayLate);
        return;
    };

    scheduler.state.day_mut(friday).friday_late = Some(winner);
    scheduler.state.add_duty(winner, 1);
}

impl Scheduler<'_> {
    fn below_weekend_cap(&self, id: StaffId) -> bool {
        self.registry
            .get(id)
            .max_weekends_per_month
            .map_or(true, |cap| self.state.weekend_count(id) < cap)
    }
}
