use crate::model::{StaffMember, StaffRegistry};
use crate::scheduler::{Plan, PlanRow, StatRow};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import du personnel depuis CSV:
/// header `name,can_day,can_visit,can_full_service[,fte][,max_weekends]`
pub fn import_staff_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<StaffRegistry> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid staff row (empty name)");
        }
        let flag = |idx: usize, field: &str| -> anyhow::Result<bool> {
            let raw = rec
                .get(idx)
                .with_context(|| format!("missing {field} for {name}"))?;
            parse_bool(raw.trim()).with_context(|| format!("invalid {field} value for {name}"))
        };
        let mut member = StaffMember::new(
            name,
            flag(1, "can_day")?,
            flag(2, "can_visit")?,
            flag(3, "can_full_service")?,
        );
        if let Some(fte) = rec.get(4).map(str::trim).filter(|s| !s.is_empty()) {
            member.fte = fte
                .parse()
                .with_context(|| format!("invalid fte value for {name}"))?;
        }
        if let Some(max) = rec.get(5).map(str::trim).filter(|s| !s.is_empty()) {
            member.max_weekends_per_month = Some(
                max.parse()
                    .with_context(|| format!("invalid max_weekends value for {name}"))?,
            );
        }
        out.push(member);
    }
    StaffRegistry::new(out).map_err(anyhow::Error::msg)
}

/// Import JSON: tableau de `StaffMember`.
pub fn import_staff_json<P: AsRef<Path>>(path: P) -> anyhow::Result<StaffRegistry> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let members: Vec<StaffMember> =
        serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))?;
    StaffRegistry::new(members).map_err(anyhow::Error::msg)
}

/// Choisit le format d'après l'extension (`.json`, sinon CSV).
pub fn load_staff<P: AsRef<Path>>(path: P) -> anyhow::Result<StaffRegistry> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => import_staff_json(path),
        _ => import_staff_csv(path),
    }
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Nom de fichier proposé pour l'export du plan.
pub fn default_plan_file_name(year: i32, month: u32) -> String {
    format!("dienstplan_{year}_{month:02}.csv")
}

/// Export CSV du plan: header `date,weekday,day_shift,...,resting`
pub fn export_plan_csv<P: AsRef<Path>>(path: P, plan: &Plan) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(PlanRow::HEADERS)?;
    for row in &plan.rows {
        w.write_record(row.cells())?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV de la statistique d'équité.
pub fn export_stats_csv<P: AsRef<Path>>(path: P, plan: &Plan) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(StatRow::HEADERS)?;
    for row in &plan.stats {
        w.write_record(row.cells())?;
    }
    w.flush()?;
    Ok(())
}

/// Export JSON du plan complet (jolie mise en forme)
pub fn export_plan_json<P: AsRef<Path>>(path: P, plan: &Plan) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(plan)?;
    fs::write(path, s)?;
    Ok(())
}

/// Aperçu du registre : `[nom, jour, visite, nuit/week-end, fte, max week-ends]`.
pub fn staff_overview(registry: &StaffRegistry) -> Vec<[String; 6]> {
    registry
        .members()
        .iter()
        .map(|m| {
            [
                m.name.clone(),
                m.can_day.to_string(),
                m.can_visit.to_string(),
                m.can_full_service.to_string(),
                m.fte.to_string(),
                m.max_weekends_per_month
                    .map_or_else(|| "-".to_string(), |max| max.to_string()),
            ]
        })
        .collect()
}
