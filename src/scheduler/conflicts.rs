use super::state::ScheduleState;
use super::types::{Conflict, ConflictKind, SlotKind};
use super::util;
use crate::model::{AbsenceCalendar, StaffRegistry};
use chrono::NaiveDate;

/// Réexamine un état terminé. Les jours de repos accordés ne bloquent que
/// les affectations ultérieures : ils ne sont pas vérifiés ici.
pub(super) fn detect_conflicts(
    state: &ScheduleState,
    registry: &StaffRegistry,
    absences: &AbsenceCalendar,
    days: &[NaiveDate],
) -> Vec<Conflict> {
    let mut out = Vec::new();

    for (id, member) in registry.iter() {
        for &date in days {
            let Some(assigned) = state.day(date) else {
                continue;
            };
            let slots = assigned.slots_of(id);
            if slots.is_empty() {
                continue;
            }
            let mut push = |kind: ConflictKind| out.push(Conflict { staff: id, date, kind });

            if slots.len() > 1 {
                push(ConflictKind::DoubleBooking);
            }
            if absences.is_absent(id, date) {
                push(ConflictKind::AbsentAssigned);
            }
            let capable = slots.iter().all(|slot| match slot {
                SlotKind::Day => member.can_day,
                SlotKind::Visit => member.can_visit,
                SlotKind::FridayLate | SlotKind::Night | SlotKind::WeekendDay => {
                    member.can_full_service
                }
            });
            if !capable {
                push(ConflictKind::MissingCapability);
            }
            if slots.contains(&SlotKind::Day) && state.worked_night(id, util::shift_back(date, 1)) {
                push(ConflictKind::NightThenDay);
            }
        }

        if let (Some(cap), Some(&last)) = (member.max_weekends_per_month, days.last()) {
            if state.weekend_count(id) > cap {
                out.push(Conflict {
                    staff: id,
                    date: last,
                    kind: ConflictKind::WeekendCapExceeded,
                });
            }
        }
    }

    out
}
