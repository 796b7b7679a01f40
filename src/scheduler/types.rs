use crate::model::StaffId;
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Paramètres d'une génération mensuelle
#[derive(Debug, Clone, Copy)]
pub struct PlanOptions {
    pub year: i32,
    pub month: u32,
    /// Seuil souple : au-delà, un avertissement est émis, sans effet sur l'affectation.
    pub max_parallel_absent: usize,
    /// Jours sans aucune garde exigés avant un bloc de nuit du week-end.
    pub friday_night_rest_days: u32,
}

impl PlanOptions {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            ..Self::default()
        }
    }
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            year: 2025,
            month: 1,
            max_parallel_absent: 3,
            friday_night_rest_days: 3,
        }
    }
}

/// Type de créneau d'une journée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SlotKind {
    Day,
    FridayLate,
    Night,
    WeekendDay,
    Visit,
}

/// Créneau resté vide faute de candidat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnfilledSlot {
    WeekendNight,
    WeekendDay,
    WeekendVisit,
    FridayLate,
    Night,
}

impl fmt::Display for UnfilledSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnfilledSlot::WeekendNight => "Fri/Sat/Sun night block",
            UnfilledSlot::WeekendDay => "Sat/Sun day block",
            UnfilledSlot::WeekendVisit => "Sat/Sun visiting rounds",
            UnfilledSlot::FridayLate => "Friday until 19:00",
            UnfilledSlot::Night => "night duty",
        };
        f.write_str(text)
    }
}

/// Avertissement destiné à l'opérateur ; jamais bloquant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    TooManyAbsent {
        date: NaiveDate,
        count: usize,
        limit: usize,
    },
    Unfilled {
        date: NaiveDate,
        slot: UnfilledSlot,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::TooManyAbsent { date, count, limit } => {
                write!(f, "{date}: {count} marked absent (limit {limit})")
            }
            Warning::Unfilled { date, slot } => write!(f, "{date}: no candidate for {slot}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    DoubleBooking,
    AbsentAssigned,
    NightThenDay,
    MissingCapability,
    WeekendCapExceeded,
}

/// Violation détectée par l'audit d'un plan terminé.
#[derive(Debug, Clone)]
pub struct Conflict {
    pub staff: StaffId,
    pub date: NaiveDate,
    pub kind: ConflictKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),
    #[error("invalid year: {0}")]
    InvalidYear(i32),
}
