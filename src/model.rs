use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Identifiant fort pour un membre du registre (indice dans `StaffRegistry`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StaffId(usize);

impl StaffId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Membre de l'équipe de garde, avec ses aptitudes et sa quotité.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub name: String,
    pub can_day: bool,
    pub can_visit: bool,
    pub can_full_service: bool,
    #[serde(default = "default_fte")]
    pub fte: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_weekends_per_month: Option<u32>,
}

fn default_fte() -> f64 {
    1.0
}

impl StaffMember {
    /// Membre à temps plein, sans plafond de week-ends.
    pub fn new<N: Into<String>>(name: N, can_day: bool, can_visit: bool, can_full_service: bool) -> Self {
        Self {
            name: name.into(),
            can_day,
            can_visit,
            can_full_service,
            fte: 1.0,
            max_weekends_per_month: None,
        }
    }

    pub fn with_fte(mut self, fte: f64) -> Self {
        self.fte = fte;
        self
    }

    pub fn with_max_weekends(mut self, max: u32) -> Self {
        self.max_weekends_per_month = Some(max);
        self
    }

    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("staff name cannot be empty".to_string());
        }
        if !self.fte.is_finite() || self.fte <= 0.0 {
            return Err(format!("fte of {} must be > 0", self.name));
        }
        Ok(())
    }
}

/// Registre immuable du personnel, chargé une fois.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffRegistry {
    members: Vec<StaffMember>,
}

impl StaffRegistry {
    /// Valide les membres (nom unique et non vide, fte > 0).
    pub fn new(members: Vec<StaffMember>) -> Result<Self, String> {
        let mut seen = BTreeSet::new();
        for member in &members {
            member.validate()?;
            if !seen.insert(member.name.as_str()) {
                return Err(format!("duplicate staff name: {}", member.name));
            }
        }
        Ok(Self { members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = StaffId> + '_ {
        (0..self.members.len()).map(StaffId)
    }

    pub fn members(&self) -> &[StaffMember] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = (StaffId, &StaffMember)> + '_ {
        self.members.iter().enumerate().map(|(i, m)| (StaffId(i), m))
    }

    /// Panique si l'identifiant ne provient pas de ce registre.
    pub fn get(&self, id: StaffId) -> &StaffMember {
        &self.members[id.0]
    }

    pub fn name(&self, id: StaffId) -> &str {
        &self.members[id.0].name
    }

    pub fn find_by_name(&self, name: &str) -> Option<StaffId> {
        self.members.iter().position(|m| m.name == name).map(StaffId)
    }

    /// Noms triés, pour un affichage stable.
    pub fn sorted_names<I: IntoIterator<Item = StaffId>>(&self, ids: I) -> Vec<String> {
        let mut names: Vec<String> = ids.into_iter().map(|id| self.name(id).to_string()).collect();
        names.sort();
        names
    }
}

impl Default for StaffRegistry {
    /// Équipe de chirurgie par défaut.
    fn default() -> Self {
        let members = vec![
            StaffMember::new("Bauregger", true, true, false),
            StaffMember::new("Devasurendra", true, true, false),
            StaffMember::new("Langen", true, true, false),
            StaffMember::new("Flanter", true, true, false),
            StaffMember::new("Gumbiller", true, true, true),
            StaffMember::new("Frey", true, true, true),
            StaffMember::new("Koch", true, true, true).with_fte(0.5),
            StaffMember::new("Mettin", true, true, true).with_fte(0.5),
            StaffMember::new("Umland", true, true, true),
            StaffMember::new("Zumbusch", true, true, true),
            StaffMember::new("Horner", true, true, true),
            StaffMember::new("Fecher", true, true, true).with_max_weekends(1),
        ];
        Self { members }
    }
}

/// Absences dures : date -> personnes indisponibles ce jour-là.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbsenceCalendar {
    by_date: BTreeMap<NaiveDate, BTreeSet<StaffId>>,
}

impl AbsenceCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, date: NaiveDate, id: StaffId) {
        self.by_date.entry(date).or_default().insert(id);
    }

    pub fn mark_all<I: IntoIterator<Item = StaffId>>(&mut self, date: NaiveDate, ids: I) {
        self.by_date.entry(date).or_default().extend(ids);
    }

    pub fn is_absent(&self, id: StaffId, date: NaiveDate) -> bool {
        self.by_date.get(&date).is_some_and(|set| set.contains(&id))
    }

    pub fn absent_on(&self, date: NaiveDate) -> impl Iterator<Item = StaffId> + '_ {
        self.by_date.get(&date).into_iter().flatten().copied()
    }

    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.by_date.get(&date).map_or(0, BTreeSet::len)
    }

    /// Fusionne un autre calendrier (union par jour).
    pub fn merge(&mut self, other: &AbsenceCalendar) {
        for (date, ids) in &other.by_date {
            self.mark_all(*date, ids.iter().copied());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &BTreeSet<StaffId>)> + '_ {
        self.by_date.iter().map(|(d, ids)| (*d, ids))
    }
}
