#![forbid(unsafe_code)]
use chrono::{Datelike, NaiveDate, Weekday};
use planning_garde::{
    generate_plan, AbsenceCalendar, PlanOptions, Scheduler, StaffMember, StaffRegistry,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn full(name: &str) -> StaffMember {
    StaffMember::new(name, true, true, true)
}

#[test]
fn full_month_without_absences_has_no_warnings() {
    // novembre 2025 : 30 jours, commence un samedi
    let registry = StaffRegistry::default();
    let absences = AbsenceCalendar::new();
    let plan = generate_plan(&registry, &absences, PlanOptions::new(2025, 11)).unwrap();

    assert_eq!(plan.rows.len(), 30);
    assert!(plan.warnings.is_empty(), "{:?}", plan.warning_messages());

    for row in &plan.rows {
        match row.date.weekday() {
            Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu => {
                assert!(row.night.is_some(), "no night on {}", row.date);
            }
            _ => {}
        }
    }

    for friday in [7, 14, 21, 28] {
        let fri = plan.row(date(2025, 11, friday)).unwrap();
        let sat = plan.row(date(2025, 11, friday + 1)).unwrap();
        let sun = plan.row(date(2025, 11, friday + 2)).unwrap();
        assert!(fri.night.is_some() && fri.friday_late.is_some());
        assert_eq!(fri.night, sat.night);
        assert_eq!(sat.night, sun.night);
        assert!(sat.weekend_day.is_some() && sat.weekend_day == sun.weekend_day);
        assert!(sat.visit.is_some() && sat.visit == sun.visit);
    }

    // le premier week-end suit un vendredi du mois précédent : rien d'affecté
    let first = plan.row(date(2025, 11, 1)).unwrap();
    assert_eq!(first.weekday, "Sat");
    assert!(first.night.is_none() && first.weekend_day.is_none() && first.visit.is_none());
}

#[test]
fn weekend_without_full_service_staff_leaves_slots_empty() {
    let registry = StaffRegistry::default();
    let mut absences = AbsenceCalendar::new();
    for (id, member) in registry.iter() {
        if member.can_full_service {
            for day in 7..=9 {
                absences.mark(date(2025, 11, day), id);
            }
        }
    }
    let mut opts = PlanOptions::new(2025, 11);
    opts.max_parallel_absent = 8;
    let plan = generate_plan(&registry, &absences, opts).unwrap();

    insta::assert_snapshot!(plan.warning_messages().join("\n"), @r###"
    2025-11-07: no candidate for Fri/Sat/Sun night block
    2025-11-07: no candidate for Sat/Sun day block
    2025-11-07: no candidate for Friday until 19:00
    "###);

    let fri = plan.row(date(2025, 11, 7)).unwrap().cells();
    assert_eq!(fri[3], "");
    assert_eq!(fri[4], "");
    let sat = plan.row(date(2025, 11, 8)).unwrap();
    assert!(sat.night.is_none() && sat.weekend_day.is_none());
    // les visites restent possibles pour le personnel sans service complet
    let visitor = sat.visit.as_deref().unwrap();
    let visitor = registry.get(registry.find_by_name(visitor).unwrap());
    assert!(!visitor.can_full_service);
}

#[test]
fn weekend_cap_excludes_otherwise_fairest_candidate() {
    let registry = StaffRegistry::new(vec![
        full("Aaron").with_max_weekends(1),
        full("Bert"),
        full("Carl"),
    ])
    .unwrap();
    let absences = AbsenceCalendar::new();
    let scheduler = Scheduler::generate(&registry, &absences, PlanOptions::new(2025, 11)).unwrap();
    let plan = scheduler.plan();

    // à charge nulle, Aaron gagne au départage par le nom
    assert_eq!(plan.row(date(2025, 11, 7)).unwrap().night.as_deref(), Some("Aaron"));

    for friday in [14, 21, 28] {
        for offset in 0..=2 {
            let row = plan.row(date(2025, 11, friday + offset)).unwrap();
            assert_ne!(row.night.as_deref(), Some("Aaron"), "{}", row.date);
            assert_ne!(row.weekend_day.as_deref(), Some("Aaron"), "{}", row.date);
        }
    }
    let aaron = registry.find_by_name("Aaron").unwrap();
    assert_eq!(scheduler.state().weekend_count(aaron), 1);
    assert_eq!(plan.stat("Aaron").unwrap().weekends, 1);
    assert!(scheduler.detect_conflicts().is_empty());
}

#[test]
fn rest_days_before_weekend_night_block() {
    let registry = StaffRegistry::new(vec![full("Aaron"), full("Bert")]).unwrap();
    let absences = AbsenceCalendar::new();
    let unfilled = "2025-11-14: no candidate for Fri/Sat/Sun night block".to_string();

    let plan = generate_plan(&registry, &absences, PlanOptions::new(2025, 11)).unwrap();
    assert!(!plan.warning_messages().contains(&unfilled));

    // 5 jours de repos exigés : le dimanche 9 compte, tous deux y travaillent
    let mut opts = PlanOptions::new(2025, 11);
    opts.friday_night_rest_days = 5;
    let plan = generate_plan(&registry, &absences, opts).unwrap();
    assert!(plan.warning_messages().contains(&unfilled));
    assert!(plan.row(date(2025, 11, 14)).unwrap().night.is_none());
}

#[test]
fn rest_is_granted_after_weekend_blocks() {
    let registry = StaffRegistry::default();
    let plan = generate_plan(&registry, &AbsenceCalendar::new(), PlanOptions::new(2025, 11)).unwrap();

    let night = plan.row(date(2025, 11, 7)).unwrap().night.clone().unwrap();
    for day in [7, 9, 10] {
        assert!(plan.row(date(2025, 11, day)).unwrap().resting.contains(&night));
    }
    let weekend_day = plan.row(date(2025, 11, 8)).unwrap().weekend_day.clone().unwrap();
    // vendredi + 5 = mercredi
    assert!(plan.row(date(2025, 11, 12)).unwrap().resting.contains(&weekend_day));
    assert!(!plan.row(date(2025, 11, 12)).unwrap().has_day_duty(&weekend_day));
}

#[test]
fn weekday_night_rests_same_and_next_day() {
    let registry = StaffRegistry::default();
    let plan = generate_plan(&registry, &AbsenceCalendar::new(), PlanOptions::new(2025, 11)).unwrap();

    let night = plan.row(date(2025, 11, 4)).unwrap().night.clone().unwrap();
    for day in [4, 5] {
        let row = plan.row(date(2025, 11, day)).unwrap();
        assert!(row.resting.contains(&night), "{} not resting on {}", night, row.date);
    }
    assert!(!plan.row(date(2025, 11, 5)).unwrap().has_day_duty(&night));
}

#[test]
fn friday_before_next_month_weekend_is_left_alone() {
    // 31 octobre 2025 : le samedi suivant tombe en novembre
    let registry = StaffRegistry::default();
    let plan = generate_plan(&registry, &AbsenceCalendar::new(), PlanOptions::new(2025, 10)).unwrap();

    let friday = plan.row(date(2025, 10, 31)).unwrap();
    assert_eq!(friday.weekday, "Fri");
    assert!(friday.night.is_none());
    assert!(friday.friday_late.is_none());
    assert!(plan.warnings.is_empty(), "{:?}", plan.warning_messages());
}

#[test]
fn visits_do_not_count_as_weekends() {
    let registry = StaffRegistry::new(vec![
        full("Aaron"),
        full("Bert"),
        StaffMember::new("Vera", false, true, false).with_max_weekends(1),
    ])
    .unwrap();
    let absences = AbsenceCalendar::new();
    let scheduler =
        Scheduler::generate(&registry, &absences, PlanOptions::new(2025, 11)).unwrap();
    let plan = scheduler.plan();

    // Aaron et Bert tiennent nuit et journée, Vera a toutes les visites malgré le plafond
    for saturday in [8, 15, 22, 29] {
        let row = plan.row(date(2025, 11, saturday)).unwrap();
        assert_eq!(row.visit.as_deref(), Some("Vera"), "{}", row.date);
    }
    let vera = plan.stat("Vera").unwrap();
    assert_eq!(vera.duties, 8);
    assert_eq!(vera.weekends, 0);
    assert_eq!(scheduler.state().weekend_count(registry.find_by_name("Vera").unwrap()), 0);
}

#[test]
fn equal_duties_weigh_more_for_part_time() {
    let registry = StaffRegistry::new(vec![
        StaffMember::new("Full", true, false, false),
        StaffMember::new("Half", true, false, false).with_fte(0.5),
    ])
    .unwrap();
    // février 2026 : 4 semaines pleines, 20 jours ouvrés
    let plan = generate_plan(&registry, &AbsenceCalendar::new(), PlanOptions::new(2026, 2)).unwrap();

    let full = plan.stat("Full").unwrap();
    let half = plan.stat("Half").unwrap();
    assert_eq!(full.duties, 20);
    assert_eq!(half.duties, 20);
    assert_eq!(full.duties_per_fte, 20.0);
    assert_eq!(half.duties_per_fte, 40.0);
    assert_eq!(plan.stats[0].name, "Full");

    // 3 week-ends x 4 créneaux + 16 nuits de semaine
    assert_eq!(plan.warnings.len(), 28);
    assert_eq!(
        plan.warning_messages()[0],
        "2026-02-06: no candidate for Fri/Sat/Sun night block"
    );
}

#[test]
fn absence_threshold_only_warns() {
    let registry = StaffRegistry::default();
    let mut absences = AbsenceCalendar::new();
    let day = date(2025, 11, 4);
    for name in ["Bauregger", "Langen", "Flanter", "Devasurendra"] {
        absences.mark(day, registry.find_by_name(name).unwrap());
    }

    let plan = generate_plan(&registry, &absences, PlanOptions::new(2025, 11)).unwrap();
    assert_eq!(
        plan.warning_messages(),
        vec!["2025-11-04: 4 marked absent (limit 3)".to_string()]
    );
    let row = plan.row(day).unwrap();
    assert_eq!(row.absent, vec!["Bauregger", "Devasurendra", "Flanter", "Langen"]);
    assert!(row.night.is_some());
}

#[test]
fn invalid_month_is_rejected() {
    let registry = StaffRegistry::default();
    let err = generate_plan(&registry, &AbsenceCalendar::new(), PlanOptions::new(2025, 13)).unwrap_err();
    assert_eq!(err.to_string(), "invalid month: 13 (expected 1-12)");
}
