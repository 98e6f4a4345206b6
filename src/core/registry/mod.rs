//! In-memory registry of students, instructors and courses
//!
//! The registry is the aggregate root: every mutation that touches more than one
//! entity goes through it, so both sides of a link change in the same call and
//! deletions cascade without leaving dangling ids behind. Each mutation also
//! appends a line to the activity feed.

pub mod views;

pub use views::{DashboardStats, RegistrySnapshot, StudentDetails, SubjectRow};

use crate::core::activity::ActivityLog;
use crate::core::error::{RecordsError, RecordsResult};
use crate::core::models::{
    validate_year_level, Course, Instructor, OverallStatus, Progression, Student, SubjectStatus,
    MAX_SUBJECTS_PER_STUDENT,
};
use crate::core::query::{CourseFilter, InstructorFilter, StudentFilter};
use crate::{debug, info};
use std::collections::{BTreeMap, BTreeSet};

/// Identifier-keyed store for all records plus the activity feed
#[derive(Debug, Clone, Default)]
pub struct Registry {
    students: BTreeMap<String, Student>,
    instructors: BTreeMap<String, Instructor>,
    courses: BTreeMap<String, Course>,
    /// Course code -> ids of enrolled students
    rosters: BTreeMap<String, BTreeSet<String>>,
    activity: ActivityLog,
}

/// Parse grade text into a finite number
///
/// # Errors
/// `InvalidGrade` if the text is not a finite number
pub fn parse_grade(raw: &str) -> RecordsResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|g| g.is_finite())
        .ok_or_else(|| RecordsError::InvalidGrade(raw.to_string()))
}

/// Render a grade for messages: whole numbers keep one decimal (`90.0`),
/// anything else prints as-is (`88.5`)
#[must_use]
#[allow(clippy::float_cmp)]
pub fn format_grade(grade: f64) -> String {
    if grade.fract() == 0.0 && grade.abs() < 1e15 {
        format!("{grade:.1}")
    } else {
        grade.to_string()
    }
}

impl Registry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&mut self, message: String) {
        info!("{message}");
        self.activity.record(message);
    }

    // ----- Students -------------------------------------------------------

    fn insert_student(&mut self, id: &str, name: &str, year_level: u8) -> RecordsResult<()> {
        if self.students.contains_key(id) {
            return Err(RecordsError::DuplicateStudent(id.to_string()));
        }
        validate_year_level(year_level)?;
        self.students
            .insert(id.to_string(), Student::new(id, name, year_level));
        Ok(())
    }

    /// Add a student with no enrollments
    ///
    /// # Errors
    /// `DuplicateStudent` or `InvalidYearLevel`
    pub fn add_student(&mut self, id: &str, name: &str, year_level: u8) -> RecordsResult<()> {
        self.insert_student(id, name, year_level)?;
        self.log(format!("Student {name} enrolled in Year {year_level}"));
        Ok(())
    }

    /// Add a student and enroll them in up to three courses in one step
    ///
    /// Unknown course codes are skipped. Returns the codes actually enrolled.
    ///
    /// # Errors
    /// `TooManySubjects` (nothing is created), `DuplicateStudent` or `InvalidYearLevel`
    pub fn register_student(
        &mut self,
        id: &str,
        name: &str,
        year_level: u8,
        course_codes: &[&str],
    ) -> RecordsResult<Vec<String>> {
        if course_codes.len() > MAX_SUBJECTS_PER_STUDENT {
            return Err(RecordsError::TooManySubjects {
                requested: course_codes.len(),
                max: MAX_SUBJECTS_PER_STUDENT,
            });
        }
        self.insert_student(id, name, year_level)?;

        let mut enrolled = Vec::new();
        for code in course_codes {
            match self.link_enrollment(id, code) {
                Ok(()) => enrolled.push((*code).to_string()),
                Err(e) => debug!("Skipping {code} while registering {id}: {e}"),
            }
        }
        self.log(format!("Student {name} enrolled in Year {year_level}"));
        Ok(enrolled)
    }

    fn link_enrollment(&mut self, student_id: &str, course_code: &str) -> RecordsResult<()> {
        let course = self
            .courses
            .get(course_code)
            .ok_or_else(|| RecordsError::UnknownCourse(course_code.to_string()))?;
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| RecordsError::UnknownStudent(student_id.to_string()))?;
        student.enroll(course)?;
        self.rosters
            .entry(course_code.to_string())
            .or_default()
            .insert(student_id.to_string());
        Ok(())
    }

    /// Enroll an existing student in an existing course
    ///
    /// # Errors
    /// `UnknownStudent`, `UnknownCourse`, `CapacityReached` or `AlreadyEnrolled`
    pub fn enroll(&mut self, student_id: &str, course_code: &str) -> RecordsResult<()> {
        if let Err(e) = self.link_enrollment(student_id, course_code) {
            debug!("Enrollment of {student_id} in {course_code} rejected: {e}");
            return Err(e);
        }
        let message = format!(
            "{} enrolled in {}",
            self.students[student_id].name, self.courses[course_code].name
        );
        self.log(message);
        Ok(())
    }

    /// Record a numeric grade
    ///
    /// # Errors
    /// `UnknownStudent`, `InvalidGrade` (non-finite) or `NotEnrolled`
    pub fn set_grade(&mut self, student_id: &str, course_code: &str, grade: f64) -> RecordsResult<()> {
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| RecordsError::UnknownStudent(student_id.to_string()))?;
        student.set_grade(course_code, grade)?;
        let course_name = self
            .courses
            .get(course_code)
            .map_or(course_code, |c| c.name.as_str());
        let message = format!(
            "Grade for {} in {course_name} set to {}",
            student.name,
            format_grade(grade)
        );
        self.log(message);
        Ok(())
    }

    /// Parse grade text and record it. Returns the stored value.
    ///
    /// # Errors
    /// `InvalidGrade`, `UnknownStudent` or `NotEnrolled`
    pub fn enter_grade(&mut self, student_id: &str, course_code: &str, raw: &str) -> RecordsResult<f64> {
        let grade = parse_grade(raw)?;
        self.set_grade(student_id, course_code, grade)?;
        Ok(grade)
    }

    /// Advance a student one year after a passing progression check
    ///
    /// Returns the new year level.
    ///
    /// # Errors
    /// `UnknownStudent`, or `NotEligible` carrying the progression message
    pub fn promote_student(&mut self, student_id: &str) -> RecordsResult<u8> {
        let progression = self.progression(student_id)?;
        if !progression.can_proceed {
            debug!("Promotion of {student_id} refused: {}", progression.message);
            return Err(RecordsError::NotEligible(progression.message));
        }
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| RecordsError::UnknownStudent(student_id.to_string()))?;
        let year = student.promote();
        let message = format!("{} promoted to Year {year}", student.name);
        self.log(message);
        Ok(year)
    }

    /// Delete a student; they drop out of every course roster
    ///
    /// # Errors
    /// `UnknownStudent`
    pub fn delete_student(&mut self, student_id: &str) -> RecordsResult<Student> {
        let student = self
            .students
            .remove(student_id)
            .ok_or_else(|| RecordsError::UnknownStudent(student_id.to_string()))?;
        for code in student.subjects() {
            if let Some(roster) = self.rosters.get_mut(code) {
                roster.remove(student_id);
            }
        }
        self.log(format!("Student {} deleted", student.name));
        Ok(student)
    }

    // ----- Instructors ----------------------------------------------------

    /// Add an instructor, optionally taking over courses that have no instructor yet
    ///
    /// Codes that are unknown or already taught by someone else are skipped.
    /// Returns the codes actually assigned.
    ///
    /// # Errors
    /// `DuplicateInstructor`
    pub fn add_instructor(
        &mut self,
        id: &str,
        name: &str,
        department: &str,
        course_codes: &[&str],
    ) -> RecordsResult<Vec<String>> {
        if self.instructors.contains_key(id) {
            return Err(RecordsError::DuplicateInstructor(id.to_string()));
        }
        self.instructors
            .insert(id.to_string(), Instructor::new(id, name, department));

        let mut assigned = Vec::new();
        for code in course_codes {
            match self.courses.get(*code) {
                Some(course) if !course.has_instructor() => {
                    self.link_instructor(code, Some(id));
                    assigned.push((*code).to_string());
                }
                Some(_) => debug!("Skipping {code} for {id}: already has an instructor"),
                None => debug!("Skipping {code} for {id}: no such course"),
            }
        }
        self.log(format!("Instructor {name} added to department {department}"));
        Ok(assigned)
    }

    /// Delete an instructor; their courses become unassigned
    ///
    /// # Errors
    /// `UnknownInstructor`
    pub fn delete_instructor(&mut self, instructor_id: &str) -> RecordsResult<Instructor> {
        let instructor = self
            .instructors
            .remove(instructor_id)
            .ok_or_else(|| RecordsError::UnknownInstructor(instructor_id.to_string()))?;
        for code in instructor.subjects() {
            if let Some(course) = self.courses.get_mut(code) {
                course.set_instructor(None);
            }
        }
        self.log(format!("Instructor {} deleted", instructor.name));
        Ok(instructor)
    }

    // ----- Courses --------------------------------------------------------

    /// Add a course, optionally bound to an instructor
    ///
    /// An instructor id that does not exist is ignored and the course is left
    /// unassigned.
    ///
    /// # Errors
    /// `DuplicateCourse` or `InvalidYearLevel`
    pub fn add_course(
        &mut self,
        code: &str,
        name: &str,
        units: u32,
        year_level: u8,
        instructor_id: Option<&str>,
    ) -> RecordsResult<()> {
        if self.courses.contains_key(code) {
            return Err(RecordsError::DuplicateCourse(code.to_string()));
        }
        validate_year_level(year_level)?;
        self.courses
            .insert(code.to_string(), Course::new(code, name, units, year_level));

        if let Some(id) = instructor_id {
            if self.instructors.contains_key(id) {
                self.link_instructor(code, Some(id));
            } else {
                debug!("Course {code} created unassigned: instructor {id} not found");
            }
        }
        self.log(format!("Course {name} added for Year {year_level}"));
        Ok(())
    }

    /// Delete a course, removing it from its instructor and from every enrolled student
    ///
    /// # Errors
    /// `UnknownCourse`
    pub fn delete_course(&mut self, course_code: &str) -> RecordsResult<Course> {
        let mut course = self
            .courses
            .remove(course_code)
            .ok_or_else(|| RecordsError::UnknownCourse(course_code.to_string()))?;

        if let Some(previous) = course.set_instructor(None) {
            if let Some(instructor) = self.instructors.get_mut(&previous) {
                instructor.release_subject(course_code);
            }
            // Keep the returned value describing who taught it
            course.set_instructor(Some(previous));
        }
        for student_id in self.rosters.remove(course_code).unwrap_or_default() {
            if let Some(student) = self.students.get_mut(&student_id) {
                student.withdraw(course_code);
            }
        }
        self.log(format!("Course {} deleted", course.name));
        Ok(course)
    }

    /// Point a course at `instructor_id` (or at nobody) and mirror the change on
    /// both instructors' lists. The course must exist.
    fn link_instructor(&mut self, course_code: &str, instructor_id: Option<&str>) {
        let Some(course) = self.courses.get_mut(course_code) else {
            return;
        };
        let previous = course.set_instructor(instructor_id.map(str::to_string));
        if previous.as_deref() == instructor_id {
            return;
        }
        if let Some(old) = previous {
            if let Some(instructor) = self.instructors.get_mut(&old) {
                instructor.release_subject(course_code);
            }
        }
        if let Some(id) = instructor_id {
            if let Some(instructor) = self.instructors.get_mut(id) {
                instructor.assign_subject(course_code);
            }
        }
    }

    /// Assign a course to an instructor, or unassign it with `None`
    ///
    /// Any previous instructor is detached in the same step.
    ///
    /// # Errors
    /// `UnknownCourse` or `UnknownInstructor`
    pub fn assign_instructor(
        &mut self,
        course_code: &str,
        instructor_id: Option<&str>,
    ) -> RecordsResult<()> {
        let course_name = self
            .courses
            .get(course_code)
            .map(|c| c.name.clone())
            .ok_or_else(|| RecordsError::UnknownCourse(course_code.to_string()))?;

        match instructor_id {
            Some(id) => {
                let instructor_name = self
                    .instructors
                    .get(id)
                    .map(|i| i.name.clone())
                    .ok_or_else(|| RecordsError::UnknownInstructor(id.to_string()))?;
                self.link_instructor(course_code, Some(id));
                self.log(format!("{instructor_name} assigned to {course_name}"));
            }
            None => {
                let had_instructor = self.courses[course_code].has_instructor();
                self.link_instructor(course_code, None);
                if had_instructor {
                    self.log(format!("Instructor removed from {course_name}"));
                }
            }
        }
        Ok(())
    }

    // ----- Queries --------------------------------------------------------

    /// Look up a student
    #[must_use]
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.get(id)
    }

    /// Look up an instructor
    #[must_use]
    pub fn instructor(&self, id: &str) -> Option<&Instructor> {
        self.instructors.get(id)
    }

    /// Look up a course
    #[must_use]
    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    /// All students ordered by id
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    /// All instructors ordered by id
    pub fn instructors(&self) -> impl Iterator<Item = &Instructor> {
        self.instructors.values()
    }

    /// All courses ordered by code
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// The course catalog keyed by code
    #[must_use]
    pub const fn course_catalog(&self) -> &BTreeMap<String, Course> {
        &self.courses
    }

    fn require_student(&self, id: &str) -> RecordsResult<&Student> {
        self.students
            .get(id)
            .ok_or_else(|| RecordsError::UnknownStudent(id.to_string()))
    }

    /// Overall standing of a student
    ///
    /// # Errors
    /// `UnknownStudent`
    pub fn overall_status(&self, student_id: &str) -> RecordsResult<OverallStatus> {
        self.require_student(student_id).map(Student::overall_status)
    }

    /// GPA of a student
    ///
    /// # Errors
    /// `UnknownStudent`
    pub fn gpa(&self, student_id: &str) -> RecordsResult<f64> {
        self.require_student(student_id).map(Student::gpa)
    }

    /// Progression decision for a student
    ///
    /// # Errors
    /// `UnknownStudent`
    pub fn progression(&self, student_id: &str) -> RecordsResult<Progression> {
        self.require_student(student_id)
            .map(|s| s.can_proceed_to_next_year(&self.courses))
    }

    /// Students enrolled in a course, ordered by id
    ///
    /// # Errors
    /// `UnknownCourse`
    pub fn enrolled_students(&self, course_code: &str) -> RecordsResult<Vec<&Student>> {
        if !self.courses.contains_key(course_code) {
            return Err(RecordsError::UnknownCourse(course_code.to_string()));
        }
        Ok(self
            .rosters
            .get(course_code)
            .into_iter()
            .flatten()
            .filter_map(|id| self.students.get(id))
            .collect())
    }

    /// Courses taught by an instructor, in assignment order
    ///
    /// # Errors
    /// `UnknownInstructor`
    pub fn assigned_courses(&self, instructor_id: &str) -> RecordsResult<Vec<&Course>> {
        let instructor = self
            .instructors
            .get(instructor_id)
            .ok_or_else(|| RecordsError::UnknownInstructor(instructor_id.to_string()))?;
        Ok(instructor
            .subjects()
            .iter()
            .filter_map(|code| self.courses.get(code))
            .collect())
    }

    /// Courses offered to a year level
    #[must_use]
    pub fn available_courses(&self, year_level: u8) -> Vec<&Course> {
        self.courses
            .values()
            .filter(|c| c.year_level == year_level)
            .collect()
    }

    /// Courses with no instructor
    #[must_use]
    pub fn unassigned_courses(&self) -> Vec<&Course> {
        self.courses
            .values()
            .filter(|c| !c.has_instructor())
            .collect()
    }

    /// Entity counts
    #[must_use]
    pub fn dashboard(&self) -> DashboardStats {
        DashboardStats {
            students: self.students.len(),
            instructors: self.instructors.len(),
            courses: self.courses.len(),
        }
    }

    /// The activity feed
    #[must_use]
    pub const fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Full details of one student
    ///
    /// # Errors
    /// `UnknownStudent`
    pub fn student_details(&self, student_id: &str) -> RecordsResult<StudentDetails> {
        let student = self.require_student(student_id)?;
        let subjects = student
            .enrollments()
            .iter()
            .map(|e| {
                let course = self.courses.get(&e.course);
                SubjectRow {
                    code: e.course.clone(),
                    name: course.map_or_else(|| e.course.clone(), |c| c.name.clone()),
                    instructor: course
                        .and_then(Course::instructor)
                        .and_then(|id| self.instructors.get(id))
                        .map(|i| i.name.clone()),
                    grade: e.grade,
                    status: SubjectStatus::from_grade(e.grade),
                }
            })
            .collect();

        Ok(StudentDetails {
            id: student.id.clone(),
            name: student.name.clone(),
            year_level: student.year_level(),
            status: student.overall_status(),
            gpa: student.gpa(),
            subjects,
            progression: student.can_proceed_to_next_year(&self.courses),
        })
    }

    /// Students matching a filter
    #[must_use]
    pub fn filter_students(&self, filter: &StudentFilter) -> Vec<&Student> {
        self.students.values().filter(|s| filter.matches(s)).collect()
    }

    /// Instructors matching a filter
    #[must_use]
    pub fn filter_instructors(&self, filter: &InstructorFilter) -> Vec<&Instructor> {
        self.instructors
            .values()
            .filter(|i| filter.matches(i))
            .collect()
    }

    /// Courses matching a filter
    #[must_use]
    pub fn filter_courses(&self, filter: &CourseFilter) -> Vec<&Course> {
        self.courses.values().filter(|c| filter.matches(c)).collect()
    }

    /// Distinct departments, sorted
    #[must_use]
    pub fn departments(&self) -> Vec<&str> {
        self.instructors
            .values()
            .map(|i| i.department.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Serializable picture of everything held
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot<'_> {
        RegistrySnapshot {
            dashboard: self.dashboard(),
            students: self.students.values().collect(),
            instructors: self.instructors.values().collect(),
            courses: self.courses.values().collect(),
            activity: &self.activity,
        }
    }

    /// Check that every cross-reference resolves and both sides of each link agree
    ///
    /// # Errors
    /// Returns `Err` with one message per broken link
    pub fn validate_links(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        for course in self.courses.values() {
            if let Some(id) = course.instructor() {
                match self.instructors.get(id) {
                    Some(i) if i.teaches(&course.code) => {}
                    Some(_) => problems.push(format!(
                        "Course '{}': instructor '{id}' does not list it",
                        course.code
                    )),
                    None => problems.push(format!(
                        "Course '{}': missing instructor '{id}'",
                        course.code
                    )),
                }
            }
        }
        for instructor in self.instructors.values() {
            for code in instructor.subjects() {
                if self.courses.get(code).and_then(Course::instructor) != Some(instructor.id.as_str()) {
                    problems.push(format!(
                        "Instructor '{}': lists '{code}' but is not its instructor",
                        instructor.id
                    ));
                }
            }
        }
        for student in self.students.values() {
            for code in student.subjects() {
                if !self.courses.contains_key(code) {
                    problems.push(format!("Student '{}': missing course '{code}'", student.id));
                }
                if !self.rosters.get(code).is_some_and(|r| r.contains(&student.id)) {
                    problems.push(format!(
                        "Student '{}': absent from roster of '{code}'",
                        student.id
                    ));
                }
            }
        }
        for (code, roster) in &self.rosters {
            for id in roster {
                if !self.students.get(id).is_some_and(|s| s.is_enrolled(code)) {
                    problems.push(format!("Roster '{code}': stale student '{id}'"));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
