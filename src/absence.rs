//! Saisie des absences : texte libre `AAAA-MM-JJ: nom, nom` et plages
//! structurées (congés, jours bloqués).

use crate::model::{AbsenceCalendar, StaffRegistry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Analyse un texte libre, une ligne par jour.
///
/// Les lignes fautives produisent un avertissement chacune et n'interrompent
/// pas la lecture ; les noms connus d'une ligne sont gardés même si d'autres
/// sont inconnus.
pub fn parse_absences(raw: &str, registry: &StaffRegistry) -> (AbsenceCalendar, Vec<String>) {
    let mut calendar = AbsenceCalendar::new();
    let mut warnings = Vec::new();

    let lines = raw.lines().map(str::trim).filter(|l| !l.is_empty());
    for (idx, line) in lines.enumerate() {
        let line_no = idx + 1;
        let Some((date_part, names_part)) = line.split_once(':') else {
            warnings.push(format!("line {line_no}: missing ':'"));
            continue;
        };

        let date_part = date_part.trim();
        // forme ISO stricte : `2025-11-3` est refusé
        let Some(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .ok()
            .filter(|d| d.format("%Y-%m-%d").to_string() == date_part)
        else {
            warnings.push(format!("line {line_no}: invalid date '{date_part}'"));
            continue;
        };

        let names: BTreeSet<&str> = names_part
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .collect();
        let (known, unknown): (Vec<&str>, Vec<&str>) = names
            .into_iter()
            .partition(|n| registry.find_by_name(n).is_some());
        if !unknown.is_empty() {
            warnings.push(format!("line {line_no}: unknown names: {}", unknown.join(", ")));
        }
        calendar.mark_all(date, known.into_iter().filter_map(|n| registry.find_by_name(n)));
    }

    (calendar, warnings)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceKind {
    Vacation,
    Blocked,
}

impl AbsenceKind {
    pub fn label(self) -> &'static str {
        match self {
            AbsenceKind::Vacation => "vacation",
            AbsenceKind::Blocked => "blocked",
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EntryError {
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("at least one staff member is required")]
    NoStaff,
    #[error("unknown staff member: {0}")]
    UnknownStaff(String),
}

/// Plages d'absence saisies, par type puis par jour (noms triés, sans doublon).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceEntries {
    #[serde(default)]
    pub vacation: BTreeMap<NaiveDate, BTreeSet<String>>,
    #[serde(default)]
    pub blocked: BTreeMap<NaiveDate, BTreeSet<String>>,
}

/// Ligne de l'aperçu des absences saisies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub kind: AbsenceKind,
    pub date: NaiveDate,
    pub names: Vec<String>,
}

impl AbsenceEntries {
    fn bucket_mut(&mut self, kind: AbsenceKind) -> &mut BTreeMap<NaiveDate, BTreeSet<String>> {
        match kind {
            AbsenceKind::Vacation => &mut self.vacation,
            AbsenceKind::Blocked => &mut self.blocked,
        }
    }

    fn bucket(&self, kind: AbsenceKind) -> &BTreeMap<NaiveDate, BTreeSet<String>> {
        match kind {
            AbsenceKind::Vacation => &self.vacation,
            AbsenceKind::Blocked => &self.blocked,
        }
    }

    /// Ajoute chaque jour de `[start, end]` pour les personnes données.
    /// Rien n'est ajouté si un nom est inconnu du registre.
    pub fn add_range<S: AsRef<str>>(
        &mut self,
        registry: &StaffRegistry,
        kind: AbsenceKind,
        start: NaiveDate,
        end: NaiveDate,
        staff: &[S],
    ) -> Result<(), EntryError> {
        if end < start {
            return Err(EntryError::EndBeforeStart { start, end });
        }
        if staff.is_empty() {
            return Err(EntryError::NoStaff);
        }
        if let Some(unknown) = staff
            .iter()
            .map(|s| s.as_ref())
            .find(|name| registry.find_by_name(name).is_none())
        {
            return Err(EntryError::UnknownStaff(unknown.to_string()));
        }
        let bucket = self.bucket_mut(kind);
        for day in start.iter_days().take_while(|d| *d <= end) {
            bucket
                .entry(day)
                .or_default()
                .extend(staff.iter().map(|s| s.as_ref().to_string()));
        }
        Ok(())
    }

    pub fn clear(&mut self, kind: AbsenceKind) {
        self.bucket_mut(kind).clear();
    }

    /// Union des deux types en calendrier ; les noms inconnus donnent un avertissement.
    pub fn to_calendar(&self, registry: &StaffRegistry) -> (AbsenceCalendar, Vec<String>) {
        let mut calendar = AbsenceCalendar::new();
        let mut warnings = Vec::new();
        for kind in [AbsenceKind::Vacation, AbsenceKind::Blocked] {
            for (date, names) in self.bucket(kind) {
                for name in names {
                    match registry.find_by_name(name) {
                        Some(id) => calendar.mark(*date, id),
                        None => warnings.push(format!(
                            "{date}: unknown name in {} entries: {name}",
                            kind.label()
                        )),
                    }
                }
            }
        }
        (calendar, warnings)
    }

    /// Aperçu : congés puis jours bloqués, chacun trié par date.
    pub fn overview(&self) -> Vec<EntryRow> {
        [AbsenceKind::Vacation, AbsenceKind::Blocked]
            .into_iter()
            .flat_map(|kind| {
                self.bucket(kind).iter().map(move |(date, names)| EntryRow {
                    kind,
                    date: *date,
                    names: names.iter().cloned().collect(),
                })
            })
            .collect()
    }
}
