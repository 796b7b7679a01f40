use crate::scheduler::Plan;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WishKind {
    DayWanted,
    NightWanted,
    VisitWanted,
    NoDay,
    NoNight,
    NoVisit,
}

impl FromStr for WishKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day-wanted" => Ok(WishKind::DayWanted),
            "night-wanted" => Ok(WishKind::NightWanted),
            "visit-wanted" => Ok(WishKind::VisitWanted),
            "no-day" => Ok(WishKind::NoDay),
            "no-night" => Ok(WishKind::NoNight),
            "no-visit" => Ok(WishKind::NoVisit),
            other => Err(format!("unknown wish kind: {other}")),
        }
    }
}

/// Souhait d'une personne pour un jour ; n'influence jamais l'affectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wish {
    pub date: NaiveDate,
    pub staff: String,
    pub kind: WishKind,
}

/// Souhait non satisfait (voulu mais absent) ou enfreint (refusé mais affecté).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishConflict {
    pub wish: Wish,
}

impl fmt::Display for WishConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Wish { date, staff, kind } = &self.wish;
        let text = match kind {
            WishKind::DayWanted => "wish not met (no day duty)",
            WishKind::NightWanted => "wish not met (no night duty)",
            WishKind::VisitWanted => "wish not met (no visiting rounds)",
            WishKind::NoDay => "wish violated (day duty assigned)",
            WishKind::NoNight => "wish violated (night duty assigned)",
            WishKind::NoVisit => "wish violated (visiting rounds assigned)",
        };
        write!(f, "{date} ({staff}): {text}")
    }
}

/// Confronte les souhaits au plan ; les dates hors du plan sont ignorées.
pub fn wish_conflicts(plan: &Plan, wishes: &[Wish]) -> Vec<WishConflict> {
    wishes
        .iter()
        .filter(|wish| {
            let Some(row) = plan.row(wish.date) else {
                return false;
            };
            let name = wish.staff.as_str();
            let is_day = row.has_day_duty(name);
            let is_night = row.night.as_deref() == Some(name);
            let is_visit = row.visit.as_deref() == Some(name);
            match wish.kind {
                WishKind::DayWanted => !is_day,
                WishKind::NightWanted => !is_night,
                WishKind::VisitWanted => !is_visit,
                WishKind::NoDay => is_day,
                WishKind::NoNight => is_night,
                WishKind::NoVisit => is_visit,
            }
        })
        .map(|wish| WishConflict { wish: wish.clone() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wish_kind_parses_cli_labels() {
        assert_eq!("no-night".parse::<WishKind>(), Ok(WishKind::NoNight));
        assert_eq!("day-wanted".parse::<WishKind>(), Ok(WishKind::DayWanted));
        assert!("nights".parse::<WishKind>().is_err());
    }

    #[test]
    fn conflict_text_names_date_and_person() {
        let conflict = WishConflict {
            wish: Wish {
                date: NaiveDate::from_ymd_opt(2025, 11, 4).unwrap(),
                staff: "Koch".into(),
                kind: WishKind::NoNight,
            },
        };
        assert_eq!(
            conflict.to_string(),
            "2025-11-04 (Koch): wish violated (night duty assigned)"
        );
    }
}
