//! Report rendering over the bundled demo data

use nu_records::config::DEFAULT_TIME_FORMAT;
use nu_records::core::report::{ReportContext, ReportFormat};
use nu_records::core::seed::load_seed;
use nu_records::core::Registry;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn demo_context() -> ReportContext {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("samples/seeds/demo.toml");
    let registry = load_seed(&path).expect("demo seed should load");
    ReportContext::from_registry(&registry, "Demo Records", DEFAULT_TIME_FORMAT)
}

#[test]
fn context_rows_follow_registry() {
    let ctx = demo_context();
    assert_eq!(ctx.students.len(), 4);
    assert_eq!(ctx.instructors.len(), 3);
    assert_eq!(ctx.courses.len(), 5);

    let ana = ctx.students.iter().find(|s| s.id == "S1").unwrap();
    assert_eq!(ana.subjects, "CS101, MATH101, CS102");
    assert_eq!(ana.status, "PASSED");
    assert_eq!(ana.progression, "Can proceed to Year 2");

    let cs102 = ctx.courses.iter().find(|c| c.code == "CS102").unwrap();
    assert_eq!(cs102.instructor, "Not assigned");
    assert_eq!(cs102.enrolled, 1);

    assert!(!ctx.activity.is_empty());
}

#[test]
fn markdown_report_renders() {
    let ctx = demo_context();
    let text = ReportFormat::Markdown.generator().render(&ctx).unwrap();
    assert!(text.contains("Demo Records"));
    assert!(text.contains("Ana Cruz"));
    assert!(text.contains("Dr. Maria Reyes"));
    assert!(text.contains("Computer Organization"));
}

#[test]
fn html_report_renders_and_escapes() {
    let mut registry = Registry::new();
    registry.add_student("S1", "<Ana & Co>", 1).unwrap();
    let ctx = ReportContext::from_registry(&registry, "Escaping", DEFAULT_TIME_FORMAT);

    let html = ReportFormat::Html.generator().render(&ctx).unwrap();
    assert!(html.contains("<html"));
    assert!(html.contains("&lt;Ana &amp; Co&gt;"));
    assert!(!html.contains("<Ana & Co>"));
}

#[test]
fn empty_registry_report_mentions_no_activity() {
    let ctx = ReportContext::from_registry(&Registry::new(), "Empty", DEFAULT_TIME_FORMAT);
    let text = ReportFormat::Markdown.generator().render(&ctx).unwrap();
    assert!(text.contains("No recent activity"));
}

#[test]
fn generate_writes_into_new_directory() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("nested/records.html");

    ReportFormat::Html
        .generator()
        .generate(&demo_context(), &output)
        .unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("Carla Mendoza"));
}
