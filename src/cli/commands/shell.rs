//! Interactive records shell
//!
//! Each input line is split into words (single or double quotes group words
//! with spaces) and parsed with clap, so the shell grammar gets the same help
//! and error messages as the outer CLI.

use super::open_seed;
use clap::{Parser, Subcommand};
use nu_records::config::Config;
use nu_records::core::models::OverallStatus;
use nu_records::core::query::{CourseFilter, InstructorFilter, StudentFilter};
use nu_records::core::registry::format_grade;
use nu_records::core::{RecordsResult, Registry};
use nu_records::{debug, error, info};
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::path::Path;

const PROMPT: &str = "records> ";

/// One parsed shell line
#[derive(Parser, Debug)]
#[command(name = "records", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    /// Add a student, instructor or course
    Add {
        #[command(subcommand)]
        target: AddTarget,
    },
    /// Delete a student, instructor or course
    Delete {
        #[command(subcommand)]
        target: DeleteTarget,
    },
    /// Enroll a student in a course
    Enroll { student: String, course: String },
    /// Enter a grade for an enrolled course
    Grade {
        student: String,
        course: String,
        /// Numeric grade; values outside 0-100 are kept as entered
        #[arg(allow_negative_numbers = true)]
        grade: String,
    },
    /// Assign an instructor to a course, replacing any current one
    Assign { course: String, instructor: String },
    /// Remove the instructor from a course
    Unassign { course: String },
    /// Move a student up one year level
    Promote { student: String },
    /// Show a student's details
    Show { student: String },
    /// List students, instructors or courses
    List {
        #[command(subcommand)]
        target: ListTarget,
    },
    /// List the students enrolled in a course
    Roster { course: String },
    /// Show entity counts
    Dashboard,
    /// Show recent activity
    Activity,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Subcommand)]
pub enum AddTarget {
    /// Add a student with up to three course codes
    Student {
        id: String,
        name: String,
        year: u8,
        courses: Vec<String>,
    },
    /// Add an instructor, taking over any listed unassigned courses
    Instructor {
        id: String,
        name: String,
        department: String,
        courses: Vec<String>,
    },
    /// Add a course
    Course {
        code: String,
        name: String,
        units: u32,
        year: u8,
        /// Instructor id to assign
        #[arg(long)]
        instructor: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum DeleteTarget {
    /// Delete a student
    Student { id: String },
    /// Delete an instructor and unassign their courses
    Instructor { id: String },
    /// Delete a course and drop it from every student
    Course { code: String },
}

#[derive(Debug, Subcommand)]
pub enum ListTarget {
    /// List students
    Students {
        /// Name contains (case-insensitive)
        #[arg(long)]
        search: Option<String>,
        /// Year level
        #[arg(long)]
        year: Option<u8>,
        /// Overall status: passed, failed, incomplete, none
        #[arg(long)]
        status: Option<OverallStatus>,
    },
    /// List instructors
    Instructors {
        /// Name contains (case-insensitive)
        #[arg(long)]
        search: Option<String>,
        /// Exact department
        #[arg(long)]
        department: Option<String>,
    },
    /// List courses
    Courses {
        /// Name contains (case-insensitive)
        #[arg(long)]
        search: Option<String>,
        /// Year level
        #[arg(long)]
        year: Option<u8>,
        /// Only courses without an instructor
        #[arg(long)]
        unassigned: bool,
    },
}

/// What the loop should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print the text and keep reading
    Output(String),
    /// Print the text as an error and keep reading
    Failure(String),
    /// Leave the shell
    Quit,
}

/// Split a line into words, honoring single and double quotes
///
/// # Errors
/// Returns an error when a quote is left open.
pub fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("Unterminated {q} quote"));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Parse and run one line against the registry
pub fn execute_line(registry: &mut Registry, line: &str, time_format: &str) -> Reply {
    let words = match tokenize(line) {
        Ok(words) if words.is_empty() => return Reply::Output(String::new()),
        Ok(words) => words,
        Err(e) => return Reply::Failure(e),
    };

    let parsed = match ShellLine::try_parse_from(&words) {
        Ok(parsed) => parsed,
        Err(e) => {
            let text = e.render().to_string();
            return if e.use_stderr() {
                Reply::Failure(text)
            } else {
                Reply::Output(text)
            };
        }
    };

    debug!("Shell command: {:?}", parsed.command);
    match execute(registry, parsed.command, time_format) {
        Ok(Some(text)) => Reply::Output(text),
        Ok(None) => Reply::Quit,
        Err(e) => Reply::Failure(format!("✗ {e}")),
    }
}

/// Run a parsed command. `Ok(None)` means quit.
fn execute(
    registry: &mut Registry,
    command: ShellCommand,
    time_format: &str,
) -> RecordsResult<Option<String>> {
    let text = match command {
        ShellCommand::Add { target } => add(registry, target)?,
        ShellCommand::Delete { target } => match target {
            DeleteTarget::Student { id } => {
                let student = registry.delete_student(&id)?;
                format!("✓ Student {} deleted", student.name)
            }
            DeleteTarget::Instructor { id } => {
                let instructor = registry.delete_instructor(&id)?;
                format!("✓ Instructor {} deleted", instructor.name)
            }
            DeleteTarget::Course { code } => {
                let course = registry.delete_course(&code)?;
                format!("✓ Course {} deleted", course.name)
            }
        },
        ShellCommand::Enroll { student, course } => {
            registry.enroll(&student, &course)?;
            format!("✓ {student} enrolled in {course}")
        }
        ShellCommand::Grade {
            student,
            course,
            grade,
        } => {
            let value = registry.enter_grade(&student, &course, &grade)?;
            format!("✓ Grade for {student} in {course} set to {}", format_grade(value))
        }
        ShellCommand::Assign { course, instructor } => {
            registry.assign_instructor(&course, Some(&instructor))?;
            format!("✓ {instructor} assigned to {course}")
        }
        ShellCommand::Unassign { course } => {
            registry.assign_instructor(&course, None)?;
            format!("✓ Instructor removed from {course}")
        }
        ShellCommand::Promote { student } => {
            let year = registry.promote_student(&student)?;
            format!("✓ {student} promoted to Year {year}")
        }
        ShellCommand::Show { student } => show_student(registry, &student)?,
        ShellCommand::List { target } => list(registry, target),
        ShellCommand::Roster { course } => {
            let students = registry.enrolled_students(&course)?;
            if students.is_empty() {
                format!("No students enrolled in {course}")
            } else {
                students
                    .iter()
                    .map(|s| format!("{:<8} {}", s.id, s.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        ShellCommand::Dashboard => {
            let stats = registry.dashboard();
            format!(
                "Students: {}\nInstructors: {}\nCourses: {}",
                stats.students, stats.instructors, stats.courses
            )
        }
        ShellCommand::Activity => {
            if registry.activity().is_empty() {
                "No recent activity".to_string()
            } else {
                registry
                    .activity()
                    .iter()
                    .map(|a| format!("{}  {}", a.formatted_time(time_format), a.message))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        ShellCommand::Quit => return Ok(None),
    };
    Ok(Some(text))
}

fn add(registry: &mut Registry, target: AddTarget) -> RecordsResult<String> {
    Ok(match target {
        AddTarget::Student {
            id,
            name,
            year,
            courses,
        } => {
            let codes: Vec<&str> = courses.iter().map(String::as_str).collect();
            let enrolled = registry.register_student(&id, &name, year, &codes)?;
            if enrolled.is_empty() {
                format!("✓ Student {name} added to Year {year}")
            } else {
                format!("✓ Student {name} added to Year {year}: {}", enrolled.join(", "))
            }
        }
        AddTarget::Instructor {
            id,
            name,
            department,
            courses,
        } => {
            let codes: Vec<&str> = courses.iter().map(String::as_str).collect();
            let assigned = registry.add_instructor(&id, &name, &department, &codes)?;
            if assigned.is_empty() {
                format!("✓ Instructor {name} added to {department}")
            } else {
                format!("✓ Instructor {name} added to {department}: {}", assigned.join(", "))
            }
        }
        AddTarget::Course {
            code,
            name,
            units,
            year,
            instructor,
        } => {
            registry.add_course(&code, &name, units, year, instructor.as_deref())?;
            format!("✓ Course {name} added for Year {year}")
        }
    })
}

fn show_student(registry: &Registry, id: &str) -> RecordsResult<String> {
    let details = registry.student_details(id)?;
    let mut out = String::new();
    let _ = writeln!(out, "{} ({}) Year {}", details.name, details.id, details.year_level);
    for row in &details.subjects {
        let grade = row.grade.map_or_else(|| "-".to_string(), |g| format!("{g:.2}"));
        let instructor = row.instructor.as_deref().unwrap_or("Not assigned");
        let _ = writeln!(
            out,
            "  {:<8} {:<28} {:<20} {:>6}  {}",
            row.code, row.name, instructor, grade, row.status
        );
    }
    let _ = writeln!(out, "Status: {}", details.status);
    let _ = writeln!(out, "GPA: {:.2}", details.gpa);
    let _ = write!(out, "{}", details.progression.message);
    Ok(out)
}

fn list(registry: &Registry, target: ListTarget) -> String {
    let lines: Vec<String> = match target {
        ListTarget::Students {
            search,
            year,
            status,
        } => {
            let filter = StudentFilter {
                search,
                year_level: year,
                status,
            };
            registry
                .filter_students(&filter)
                .iter()
                .map(|s| {
                    format!(
                        "{:<8} {:<24} Year {}  {:<12} GPA {:.2}",
                        s.id,
                        s.name,
                        s.year_level(),
                        s.overall_status().label(),
                        s.gpa()
                    )
                })
                .collect()
        }
        ListTarget::Instructors { search, department } => {
            let filter = InstructorFilter { search, department };
            registry
                .filter_instructors(&filter)
                .iter()
                .map(|i| {
                    format!(
                        "{:<8} {:<24} {:<20} {}",
                        i.id,
                        i.name,
                        i.department,
                        i.subjects().join(", ")
                    )
                })
                .collect()
        }
        ListTarget::Courses {
            search,
            year,
            unassigned,
        } => {
            let filter = CourseFilter {
                search,
                year_level: year,
            };
            registry
                .filter_courses(&filter)
                .iter()
                .filter(|c| !unassigned || !c.has_instructor())
                .map(|c| {
                    let instructor = c
                        .instructor()
                        .and_then(|id| registry.instructor(id))
                        .map_or("Not assigned", |i| i.name.as_str());
                    format!(
                        "{:<8} {:<28} {} units  Year {}  {}",
                        c.code, c.name, c.units, c.year_level, instructor
                    )
                })
                .collect()
        }
    };

    if lines.is_empty() {
        "No matching records".to_string()
    } else {
        lines.join("\n")
    }
}

/// Run the interactive shell. Returns `false` if the starting seed fails to load.
pub fn run(seed: Option<&Path>, config: &Config) -> bool {
    let mut registry = match seed {
        Some(path) => match open_seed(path, config) {
            Ok(registry) => {
                info!("Shell started from seed {}", path.display());
                registry
            }
            Err(e) => {
                error!("Failed to load seed {}: {e}", path.display());
                eprintln!("✗ Failed to load {}: {e}", path.display());
                return false;
            }
        },
        None => Registry::new(),
    };

    println!("NuRecords shell. Type 'help' for commands, 'quit' to leave.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("{PROMPT}");
        stdout.flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!("Failed to read input: {e}");
                return false;
            }
        }

        match execute_line(&mut registry, &line, config.time_format()) {
            Reply::Output(text) if text.is_empty() => {}
            Reply::Output(text) => println!("{}", text.trim_end()),
            Reply::Failure(text) => eprintln!("{}", text.trim_end()),
            Reply::Quit => break,
        }
    }
    true
}
