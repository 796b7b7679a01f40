use super::types::SlotKind;
use crate::model::{AbsenceCalendar, StaffId};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Affectations d'une journée : un champ typé par créneau.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayAssignment {
    pub night: Option<StaffId>,
    pub friday_late: Option<StaffId>,
    pub weekend_day: Option<StaffId>,
    pub visit: Option<StaffId>,
    pub day: BTreeSet<StaffId>,
}

impl DayAssignment {
    pub fn holds(&self, id: StaffId) -> bool {
        !self.slots_of(id).is_empty()
    }

    /// Créneaux tenus par `id` ce jour-là (plus d'un = double réservation).
    pub fn slots_of(&self, id: StaffId) -> Vec<SlotKind> {
        let mut out = Vec::new();
        if self.day.contains(&id) {
            out.push(SlotKind::Day);
        }
        let singles = [
            (self.friday_late, SlotKind::FridayLate),
            (self.night, SlotKind::Night),
            (self.weekend_day, SlotKind::WeekendDay),
            (self.visit, SlotKind::Visit),
        ];
        out.extend(
            singles
                .into_iter()
                .filter(|(holder, _)| *holder == Some(id))
                .map(|(_, kind)| kind),
        );
        out
    }
}

/// État d'une génération : créé à chaque exécution, jamais partagé.
#[derive(Debug, Clone)]
pub struct ScheduleState {
    assignments: BTreeMap<NaiveDate, DayAssignment>,
    off_days: BTreeMap<NaiveDate, BTreeSet<StaffId>>,
    duty_count: Vec<u32>,
    weekend_count: Vec<u32>,
}

impl ScheduleState {
    pub fn new(staff_len: usize) -> Self {
        Self {
            assignments: BTreeMap::new(),
            off_days: BTreeMap::new(),
            duty_count: vec![0; staff_len],
            weekend_count: vec![0; staff_len],
        }
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayAssignment> {
        self.assignments.get(&date)
    }

    pub(super) fn day_mut(&mut self, date: NaiveDate) -> &mut DayAssignment {
        self.assignments.entry(date).or_default()
    }

    pub fn has_assignment(&self, id: StaffId, date: NaiveDate) -> bool {
        self.day(date).is_some_and(|d| d.holds(id))
    }

    pub fn is_resting(&self, id: StaffId, date: NaiveDate) -> bool {
        self.off_days.get(&date).is_some_and(|set| set.contains(&id))
    }

    /// Absent ou au repos ce jour-là.
    pub fn is_unavailable(&self, absences: &AbsenceCalendar, id: StaffId, date: NaiveDate) -> bool {
        absences.is_absent(id, date) || self.is_resting(id, date)
    }

    pub fn worked_night(&self, id: StaffId, date: NaiveDate) -> bool {
        self.day(date).is_some_and(|d| d.night == Some(id))
    }

    pub fn resting_on(&self, date: NaiveDate) -> impl Iterator<Item = StaffId> + '_ {
        self.off_days.get(&date).into_iter().flatten().copied()
    }

    pub(super) fn grant_rest(&mut self, id: StaffId, date: NaiveDate) {
        self.off_days.entry(date).or_default().insert(id);
    }

    pub fn duty_count(&self, id: StaffId) -> u32 {
        self.duty_count[id.index()]
    }

    pub fn weekend_count(&self, id: StaffId) -> u32 {
        self.weekend_count[id.index()]
    }

    pub(super) fn add_duty(&mut self, id: StaffId, units: u32) {
        self.duty_count[id.index()] += units;
    }

    pub(super) fn add_weekend(&mut self, id: StaffId) {
        self.weekend_count[id.index()] += 1;
    }
}
