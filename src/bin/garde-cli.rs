#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use planning_garde::{
    absence::{parse_absences, AbsenceKind},
    io,
    model::StaffRegistry,
    scheduler::{PlanOptions, PlanRow, Scheduler, StatRow},
    storage::{JsonStorage, Storage},
    wishes::{wish_conflicts, Wish, WishKind},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification des gardes (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Registre du personnel (CSV ou JSON) ; équipe par défaut sinon
    #[arg(long, global = true)]
    staff: Option<String>,

    /// Fichier JSON des absences et souhaits saisis
    #[arg(long, global = true, default_value = "garde.json")]
    book: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Vacation,
    Blocked,
}

impl From<KindArg> for AbsenceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Vacation => AbsenceKind::Vacation,
            KindArg::Blocked => AbsenceKind::Blocked,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Afficher le registre du personnel
    Staff,

    /// Gérer les congés et jours bloqués
    Absence {
        #[command(subcommand)]
        action: AbsenceAction,
    },

    /// Gérer les souhaits
    Wish {
        #[command(subcommand)]
        action: WishAction,
    },

    /// Générer le plan d'un mois
    Generate {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Nombre d'absents simultanés au-delà duquel on avertit
        #[arg(long, default_value_t = 3)]
        max_absent: usize,
        /// Jours libres exigés avant la nuit du week-end
        #[arg(long, default_value_t = 3)]
        rest_days: u32,
        /// Absences supplémentaires en texte libre (`AAAA-MM-JJ: nom, nom`)
        #[arg(long)]
        absences: Option<String>,
        /// Export CSV du plan ; sans valeur : `dienstplan_AAAA_MM.csv`
        #[arg(long, num_args = 0..=1)]
        out_csv: Option<Option<String>>,
        #[arg(long)]
        stats_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum AbsenceAction {
    /// Ajouter une plage (bornes incluses)
    Add {
        #[arg(long, value_enum)]
        kind: KindArg,
        /// AAAA-MM-JJ
        #[arg(long)]
        from: NaiveDate,
        /// AAAA-MM-JJ
        #[arg(long)]
        to: NaiveDate,
        /// liste "nom1,nom2,..."
        #[arg(long)]
        staff: String,
    },
    /// Vider un type, ou tout
    Clear {
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
    /// Lister les absences saisies
    List,
}

#[derive(Subcommand, Debug)]
enum WishAction {
    Add {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        staff: String,
        /// day-wanted, night-wanted, visit-wanted, no-day, no-night, no-visit
        #[arg(long)]
        wish: WishKind,
    },
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let registry = match &cli.staff {
        Some(path) => io::load_staff(path)?,
        None => StaffRegistry::default(),
    };
    let storage = JsonStorage::open(&cli.book)?;
    let mut book = storage.load_or_default()?;

    let code = match cli.cmd {
        Commands::Staff => {
            println!("name | day | visit | night/weekend | fte | max weekends");
            for row in io::staff_overview(&registry) {
                println!("{}", row.join(" | "));
            }
            0
        }
        Commands::Absence { action } => match action {
            AbsenceAction::Add {
                kind,
                from,
                to,
                staff,
            } => {
                let names = split_names(&staff);
                book.absences
                    .add_range(&registry, kind.into(), from, to, names.as_slice())?;
                storage.save(&book)?;
                0
            }
            AbsenceAction::Clear { kind } => {
                match kind {
                    Some(kind) => book.absences.clear(kind.into()),
                    None => book.absences = Default::default(),
                }
                storage.save(&book)?;
                0
            }
            AbsenceAction::List => {
                for entry in book.absences.overview() {
                    println!(
                        "{} | {} | {}",
                        entry.kind.label(),
                        entry.date,
                        entry.names.join(", ")
                    );
                }
                0
            }
        },
        Commands::Wish { action } => {
            match action {
                WishAction::Add { date, staff, wish } => {
                    if registry.find_by_name(&staff).is_none() {
                        bail!("unknown staff member: {staff}");
                    }
                    book.wishes.push(Wish {
                        date,
                        staff,
                        kind: wish,
                    });
                }
                WishAction::Clear => book.wishes.clear(),
            }
            storage.save(&book)?;
            0
        }
        Commands::Generate {
            year,
            month,
            max_absent,
            rest_days,
            absences,
            out_csv,
            stats_csv,
            out_json,
        } => {
            let (mut calendar, mut warnings) = book.absences.to_calendar(&registry);
            if let Some(path) = absences {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {path}"))?;
                let (extra, parse_warnings) = parse_absences(&raw, &registry);
                calendar.merge(&extra);
                warnings.extend(parse_warnings);
            }

            let opts = PlanOptions {
                year,
                month,
                max_parallel_absent: max_absent,
                friday_night_rest_days: rest_days,
            };
            let scheduler = Scheduler::generate(&registry, &calendar, opts)?;
            let plan = scheduler.plan();
            warnings.extend(plan.warning_messages());
            warnings.extend(
                wish_conflicts(&plan, &book.wishes)
                    .iter()
                    .map(ToString::to_string),
            );

            println!("{}", PlanRow::HEADERS.join(" | "));
            for row in &plan.rows {
                println!("{}", row.cells().join(" | "));
            }
            println!();
            println!("{}", StatRow::HEADERS.join(" | "));
            for row in &plan.stats {
                println!("{}", row.cells().join(" | "));
            }

            if let Some(path) = out_csv {
                let path = path.unwrap_or_else(|| io::default_plan_file_name(year, month));
                io::export_plan_csv(path, &plan)?;
            }
            if let Some(path) = stats_csv {
                io::export_stats_csv(path, &plan)?;
            }
            if let Some(path) = out_json {
                io::export_plan_json(path, &plan)?;
            }

            let conflicts = scheduler.detect_conflicts();
            if !conflicts.is_empty() {
                bail!("generated plan has {} conflict(s)", conflicts.len());
            }

            if warnings.is_empty() {
                0
            } else {
                eprintln!("Found {} warning(s)", warnings.len());
                for warning in &warnings {
                    eprintln!("- {warning}");
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
    };

    std::process::exit(code);
}

fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
