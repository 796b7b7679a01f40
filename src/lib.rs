#![forbid(unsafe_code)]
//! Planning de garde — génération d'un tableau de service mensuel (sans BD).
//!
//! - Registre du personnel immuable, absences fournies par l'appelant.
//! - Passages gloutons déterministes : week-ends, nuits de semaine, service de jour.
//! - Équité par charge normalisée (fte), départage par le nom.
//! - Les créneaux impossibles deviennent des avertissements, jamais des erreurs.

pub mod absence;
pub mod io;
pub mod model;
pub mod scheduler;
pub mod storage;
pub mod wishes;

pub use absence::{parse_absences, AbsenceEntries, AbsenceKind, EntryError};
pub use model::{AbsenceCalendar, StaffId, StaffMember, StaffRegistry};
pub use scheduler::{
    generate_plan, Conflict, ConflictKind, Plan, PlanOptions, PlanRow, SchedError, Scheduler,
    StatRow, UnfilledSlot, Warning,
};
pub use storage::{ConstraintBook, JsonStorage, Storage};
pub use wishes::{wish_conflicts, Wish, WishConflict, WishKind};
