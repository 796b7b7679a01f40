mod aggregate;
mod conflicts;
mod fairness;
mod state;
mod types;
mod util;
mod weekday;
mod weekend;

pub use aggregate::{Plan, PlanRow, StatRow};
pub use fairness::{pick_fair, pick_fair_weekend};
pub use state::{DayAssignment, ScheduleState};
pub use types::{Conflict, ConflictKind, PlanOptions, SchedError, SlotKind, UnfilledSlot, Warning};

use crate::model::{AbsenceCalendar, StaffId, StaffMember, StaffRegistry};
use chrono::NaiveDate;

/// Scheduler : une génération mensuelle terminée, avec son état propre.
///
/// Les passages s'exécutent dans un ordre fixe (week-ends, nuits de semaine,
/// service de jour), chacun lisant l'état laissé par le précédent.
#[derive(Debug)]
pub struct Scheduler<'a> {
    registry: &'a StaffRegistry,
    absences: &'a AbsenceCalendar,
    opts: PlanOptions,
    days: Vec<NaiveDate>,
    state: ScheduleState,
    warnings: Vec<Warning>,
}

impl<'a> Scheduler<'a> {
    /// Exécute tous les passages. Seul un mois invalide est une erreur.
    pub fn generate(
        registry: &'a StaffRegistry,
        absences: &'a AbsenceCalendar,
        opts: PlanOptions,
    ) -> Result<Self, SchedError> {
        let days = util::month_dates(opts.year, opts.month)?;
        let mut scheduler = Self {
            registry,
            absences,
            opts,
            days,
            state: ScheduleState::new(registry.len()),
            warnings: Vec::new(),
        };

        scheduler.check_absence_threshold();
        weekend::assign_weekends(&mut scheduler);
        #[cfg(feature = "logging")]
        tracing::debug!(warnings = scheduler.warnings.len(), "weekend pass done");
        weekday::assign_nights(&mut scheduler);
        #[cfg(feature = "logging")]
        tracing::debug!(warnings = scheduler.warnings.len(), "weekday night pass done");
        weekday::assign_day_shifts(&mut scheduler);
        #[cfg(feature = "logging")]
        tracing::debug!(
            year = opts.year,
            month = opts.month,
            warnings = scheduler.warnings.len(),
            "plan generated"
        );

        Ok(scheduler)
    }

    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Tableau mensuel, statistique d'équité et avertissements.
    pub fn plan(&self) -> Plan {
        aggregate::build_plan(
            self.opts.year,
            self.opts.month,
            &self.days,
            self.registry,
            self.absences,
            &self.state,
            self.warnings.clone(),
        )
    }

    /// Audit du résultat ; vide pour toute génération correcte.
    pub fn detect_conflicts(&self) -> Vec<Conflict> {
        conflicts::detect_conflicts(&self.state, self.registry, self.absences, &self.days)
    }

    fn check_absence_threshold(&mut self) {
        let limit = self.opts.max_parallel_absent;
        for &date in &self.days {
            let count = self.absences.count_on(date);
            if count > limit {
                self.warnings.push(Warning::TooManyAbsent { date, count, limit });
            }
        }
    }

    fn warn(&mut self, date: NaiveDate, slot: UnfilledSlot) {
        let warning = Warning::Unfilled { date, slot };
        #[cfg(feature = "logging")]
        tracing::warn!(%warning, "slot left empty");
        self.warnings.push(warning);
    }

    /// Membres du registre ayant l'aptitude requise, dans l'ordre du registre.
    fn pool(&self, capable: fn(&StaffMember) -> bool) -> impl Iterator<Item = StaffId> + '_ {
        self.registry
            .iter()
            .filter(move |(_, member)| capable(member))
            .map(|(id, _)| id)
    }

    /// Ni absent, ni au repos, ni déjà affecté sur aucune des dates.
    fn free_on(&self, id: StaffId, dates: &[NaiveDate]) -> bool {
        dates.iter().all(|&date| {
            !self.state.is_unavailable(self.absences, id, date)
                && !self.state.has_assignment(id, date)
        })
    }
}

/// Point d'entrée : génère le plan d'un mois.
pub fn generate_plan(
    registry: &StaffRegistry,
    absences: &AbsenceCalendar,
    opts: PlanOptions,
) -> Result<Plan, SchedError> {
    Scheduler::generate(registry, absences, opts).map(|s| s.plan())
}
