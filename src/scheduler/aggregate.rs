use super::state::ScheduleState;
use super::types::Warning;
use crate::model::{AbsenceCalendar, StaffId, StaffRegistry};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Ligne du tableau mensuel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRow {
    pub date: NaiveDate,
    pub weekday: String,
    pub day_shift: Vec<String>,
    pub friday_late: Option<String>,
    pub night: Option<String>,
    pub weekend_day: Option<String>,
    pub visit: Option<String>,
    pub absent: Vec<String>,
    pub resting: Vec<String>,
}

impl PlanRow {
    pub const HEADERS: [&'static str; 9] = [
        "date",
        "weekday",
        "day_shift",
        "friday_late",
        "night",
        "weekend_day",
        "visit",
        "absent",
        "resting",
    ];

    /// Cellules texte : listes jointes par ", ", créneau vide = "".
    pub fn cells(&self) -> [String; 9] {
        let single = |slot: &Option<String>| slot.clone().unwrap_or_default();
        [
            self.date.to_string(),
            self.weekday.clone(),
            self.day_shift.join(", "),
            single(&self.friday_late),
            single(&self.night),
            single(&self.weekend_day),
            single(&self.visit),
            self.absent.join(", "),
            self.resting.join(", "),
        ]
    }

    /// Vrai si `name` tient un service de jour (semaine ou week-end).
    pub fn has_day_duty(&self, name: &str) -> bool {
        self.day_shift.iter().any(|n| n == name) || self.weekend_day.as_deref() == Some(name)
    }
}

/// Ligne de la statistique d'équité.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRow {
    pub name: String,
    pub fte: f64,
    pub duties: u32,
    pub duties_per_fte: f64,
    pub weekends: u32,
}

impl StatRow {
    pub const HEADERS: [&'static str; 5] = ["name", "fte", "duties", "duties_per_fte", "weekends"];

    pub fn cells(&self) -> [String; 5] {
        [
            self.name.clone(),
            self.fte.to_string(),
            self.duties.to_string(),
            format!("{:.2}", self.duties_per_fte),
            self.weekends.to_string(),
        ]
    }
}

/// Résultat complet d'une génération.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub year: i32,
    pub month: u32,
    pub rows: Vec<PlanRow>,
    pub stats: Vec<StatRow>,
    #[serde(serialize_with = "serialize_warnings")]
    pub warnings: Vec<Warning>,
}

impl Plan {
    pub fn row(&self, date: NaiveDate) -> Option<&PlanRow> {
        self.rows.iter().find(|r| r.date == date)
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    pub fn stat(&self, name: &str) -> Option<&StatRow> {
        self.stats.iter().find(|s| s.name == name)
    }
}

fn serialize_warnings<S: serde::Serializer>(
    warnings: &[Warning],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(warnings.iter().map(ToString::to_string))
}

pub(super) fn build_plan(
    year: i32,
    month: u32,
    days: &[NaiveDate],
    registry: &StaffRegistry,
    absences: &AbsenceCalendar,
    state: &ScheduleState,
    warnings: Vec<Warning>,
) -> Plan {
    let name = |slot: Option<StaffId>| slot.map(|id| registry.name(id).to_string());

    let rows = days
        .iter()
        .map(|&date| {
            let assigned = state.day(date).cloned().unwrap_or_default();
            PlanRow {
                date,
                weekday: date.weekday().to_string(),
                day_shift: registry.sorted_names(assigned.day.iter().copied()),
                friday_late: name(assigned.friday_late),
                night: name(assigned.night),
                weekend_day: name(assigned.weekend_day),
                visit: name(assigned.visit),
                absent: registry.sorted_names(absences.absent_on(date)),
                resting: registry.sorted_names(state.resting_on(date)),
            }
        })
        .collect();

    let mut stats: Vec<StatRow> = registry
        .iter()
        .map(|(id, member)| {
            let duties = state.duty_count(id);
            StatRow {
                name: member.name.clone(),
                fte: member.fte,
                duties,
                duties_per_fte: round2(f64::from(duties) / member.fte),
                weekends: state.weekend_count(id),
            }
        })
        .collect();
    // tri stable : à égalité, ordre du registre
    stats.sort_by(|a, b| a.duties_per_fte.total_cmp(&b.duties_per_fte));

    Plan {
        year,
        month,
        rows,
        stats,
        warnings,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
