//! Seed loading against the bundled demo data

use nu_records::core::models::OverallStatus;
use nu_records::core::seed::{load_seed, Seed, SeedError};
use nu_records::core::RecordsError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn demo_seed() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("samples/seeds/demo.toml")
}

#[test]
fn demo_seed_loads() {
    let registry = load_seed(&demo_seed()).expect("demo seed should load");

    let stats = registry.dashboard();
    assert_eq!((stats.students, stats.instructors, stats.courses), (4, 3, 5));
    assert!(registry.validate_links().is_ok());

    assert_eq!(registry.overall_status("S1").unwrap(), OverallStatus::Passed);
    assert_eq!(registry.overall_status("S2").unwrap(), OverallStatus::Failed);
    assert_eq!(registry.overall_status("S3").unwrap(), OverallStatus::Incomplete);
    assert_eq!(registry.overall_status("S4").unwrap(), OverallStatus::NoSubjects);

    assert!(registry.progression("S1").unwrap().can_proceed);
    assert_eq!(
        registry.progression("S2").unwrap().message,
        "Not all subjects have been graded"
    );

    let unassigned: Vec<&str> = registry
        .unassigned_courses()
        .iter()
        .map(|c| c.code.as_str())
        .collect();
    assert_eq!(unassigned, vec!["CS102"]);
}

#[test]
fn text_and_numeric_grades_agree() {
    let registry = load_seed(&demo_seed()).unwrap();
    let student = registry.student("S1").unwrap();
    assert_eq!(student.grade("CS102"), Some(Some(78.0)));
    assert_eq!(student.grade("CS101"), Some(Some(92.0)));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_seed(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, SeedError::Io { .. }));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[[students]]\nid = \"S1\"\n").unwrap();
    assert!(matches!(load_seed(&path), Err(SeedError::Parse(_))));
}

#[test]
fn rule_violations_surface_as_records_errors() {
    let seed = Seed::from_toml(
        r#"
[[students]]
id = "S1"
name = "Ana"
year_level = 1

[[grades]]
student = "S1"
course = "CS101"
grade = 90
"#,
    )
    .unwrap();

    let err = seed.build_registry().unwrap_err();
    assert!(matches!(
        err,
        SeedError::Records(RecordsError::NotEnrolled { .. })
    ));
}

#[test]
fn non_finite_grade_is_rejected() {
    let seed = Seed::from_toml(
        r#"
[[courses]]
code = "CS101"
name = "Intro"
units = 3
year_level = 1

[[students]]
id = "S1"
name = "Ana"
year_level = 1
subjects = ["CS101"]

[[grades]]
student = "S1"
course = "CS101"
grade = nan
"#,
    )
    .unwrap();

    let err = seed.build_registry().unwrap_err();
    assert!(matches!(
        err,
        SeedError::Records(RecordsError::InvalidGrade(_))
    ));

    let mut registry = nu_records::core::Registry::new();
    seed.courses.iter().for_each(|c| {
        registry
            .add_course(&c.code, &c.name, c.units, c.year_level, None)
            .unwrap();
    });
    registry.register_student("S1", "Ana", 1, &["CS101"]).unwrap();
    assert!(registry.set_grade("S1", "CS101", f64::INFINITY).is_err());
    assert_eq!(registry.overall_status("S1").unwrap(), OverallStatus::Incomplete);
    assert!(!registry.progression("S1").unwrap().can_proceed);
}
