//! Load command handler
//!
//! Builds a registry from a seed file and prints either a plain summary or the
//! full JSON snapshot.

use super::open_seed;
use nu_records::config::Config;
use nu_records::core::Registry;
use nu_records::{error, info, verbose};
use std::path::Path;

/// Run the load command. Returns `false` on failure.
pub fn run(seed: &Path, json: bool, config: &Config) -> bool {
    let registry = match open_seed(seed, config) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Failed to load seed {}: {e}", seed.display());
            eprintln!("✗ Failed to load {}: {e}", seed.display());
            return false;
        }
    };
    info!("Seed loaded: {}", seed.display());

    if json {
        match serde_json::to_string_pretty(&registry.snapshot()) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("✗ Failed to serialize registry: {e}");
                return false;
            }
        }
    } else {
        print!("{}", summary(&registry, config.time_format()));
    }
    true
}

/// Plain text summary: counts, per-student standing, then the activity feed
pub fn summary(registry: &Registry, time_format: &str) -> String {
    use std::fmt::Write;

    let stats = registry.dashboard();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Students: {}  Instructors: {}  Courses: {}",
        stats.students, stats.instructors, stats.courses
    );
    for student in registry.students() {
        verbose!("  {} subjects: {}", student.id, student.subjects().collect::<Vec<_>>().join(", "));
        let _ = writeln!(
            out,
            "  {:<8} {:<24} Year {}  {:<12} GPA {:.2}",
            student.id,
            student.name,
            student.year_level(),
            student.overall_status().label(),
            student.gpa()
        );
    }
    let unassigned = registry.unassigned_courses();
    if !unassigned.is_empty() {
        let codes: Vec<&str> = unassigned.iter().map(|c| c.code.as_str()).collect();
        let _ = writeln!(out, "Unassigned courses: {}", codes.join(", "));
    }
    let _ = writeln!(out, "Recent activity:");
    for activity in registry.activity().iter() {
        let _ = writeln!(out, "  {}  {}", activity.formatted_time(time_format), activity.message);
    }
    out
}
