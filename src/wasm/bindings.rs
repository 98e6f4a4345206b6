//! WASM bindings exported to JavaScript/TypeScript
//!
//! Mutations return `Err(message)` on a rejected operation; queries hand back
//! JSON strings so the page can re-render straight from them.

use crate::config::DEFAULT_TIME_FORMAT;
use crate::core::query::{CourseFilter, InstructorFilter, StudentFilter};
use crate::core::report::{HtmlReporter, ReportContext, ReportGenerator};
use crate::core::seed::Seed;
use crate::core::{RecordsError, Registry};
use crate::get_version;
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js(err: &RecordsError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn non_empty(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

/// Returns the current `NuRecords` version for the WASM build.
#[wasm_bindgen]
pub fn get_wasm_version() -> String {
    format!("NuRecords WASM v{}", get_version())
}

/// A records session owned by the page
#[wasm_bindgen]
pub struct RecordsApp {
    registry: Registry,
}

#[wasm_bindgen]
impl RecordsApp {
    /// Start with an empty registry
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Start from seed TOML
    #[wasm_bindgen(js_name = fromSeed)]
    pub fn from_seed(seed_toml: &str) -> Result<RecordsApp, JsValue> {
        let registry = Seed::from_toml(seed_toml)
            .and_then(|seed| seed.build_registry())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { registry })
    }

    /// Register a student with up to three course codes
    #[wasm_bindgen(js_name = enrollStudent)]
    pub fn enroll_student(
        &mut self,
        id: &str,
        name: &str,
        year_level: u8,
        course_codes: Vec<String>,
    ) -> Result<(), JsValue> {
        let codes: Vec<&str> = course_codes.iter().map(String::as_str).collect();
        self.registry
            .register_student(id, name, year_level, &codes)
            .map(|_| ())
            .map_err(|e| to_js(&e))
    }

    /// Enroll an existing student in a course
    pub fn enroll(&mut self, student_id: &str, course_code: &str) -> Result<(), JsValue> {
        self.registry
            .enroll(student_id, course_code)
            .map_err(|e| to_js(&e))
    }

    /// Delete a student
    #[wasm_bindgen(js_name = deleteStudent)]
    pub fn delete_student(&mut self, id: &str) -> Result<(), JsValue> {
        self.registry
            .delete_student(id)
            .map(|_| ())
            .map_err(|e| to_js(&e))
    }

    /// Enter a grade from form text
    #[wasm_bindgen(js_name = enterGrade)]
    pub fn enter_grade(&mut self, student_id: &str, course_code: &str, grade: &str) -> Result<f64, JsValue> {
        self.registry
            .enter_grade(student_id, course_code, grade)
            .map_err(|e| to_js(&e))
    }

    /// Promote a student; returns the new year level
    #[wasm_bindgen(js_name = promoteStudent)]
    pub fn promote_student(&mut self, id: &str) -> Result<u8, JsValue> {
        self.registry.promote_student(id).map_err(|e| to_js(&e))
    }

    /// Add an instructor, taking over any listed unassigned courses
    #[wasm_bindgen(js_name = addInstructor)]
    pub fn add_instructor(
        &mut self,
        id: &str,
        name: &str,
        department: &str,
        course_codes: Vec<String>,
    ) -> Result<(), JsValue> {
        let codes: Vec<&str> = course_codes.iter().map(String::as_str).collect();
        self.registry
            .add_instructor(id, name, department, &codes)
            .map(|_| ())
            .map_err(|e| to_js(&e))
    }

    /// Delete an instructor
    #[wasm_bindgen(js_name = deleteInstructor)]
    pub fn delete_instructor(&mut self, id: &str) -> Result<(), JsValue> {
        self.registry
            .delete_instructor(id)
            .map(|_| ())
            .map_err(|e| to_js(&e))
    }

    /// Add a course; pass an empty instructor id for none
    #[wasm_bindgen(js_name = addCourse)]
    pub fn add_course(
        &mut self,
        code: &str,
        name: &str,
        units: u32,
        year_level: u8,
        instructor_id: &str,
    ) -> Result<(), JsValue> {
        let instructor = non_empty(instructor_id);
        self.registry
            .add_course(code, name, units, year_level, instructor.as_deref())
            .map_err(|e| to_js(&e))
    }

    /// Delete a course
    #[wasm_bindgen(js_name = deleteCourse)]
    pub fn delete_course(&mut self, code: &str) -> Result<(), JsValue> {
        self.registry
            .delete_course(code)
            .map(|_| ())
            .map_err(|e| to_js(&e))
    }

    /// Assign an instructor; an empty id unassigns
    #[wasm_bindgen(js_name = assignInstructor)]
    pub fn assign_instructor(&mut self, course_code: &str, instructor_id: &str) -> Result<(), JsValue> {
        let instructor = non_empty(instructor_id);
        self.registry
            .assign_instructor(course_code, instructor.as_deref())
            .map_err(|e| to_js(&e))
    }

    /// Dashboard counts as JSON
    pub fn dashboard(&self) -> Result<String, JsValue> {
        to_json(&self.registry.dashboard())
    }

    /// Student details panel as JSON
    #[wasm_bindgen(js_name = studentDetails)]
    pub fn student_details(&self, id: &str) -> Result<String, JsValue> {
        let details = self.registry.student_details(id).map_err(|e| to_js(&e))?;
        to_json(&details)
    }

    /// Filtered student table as JSON; empty strings mean "any"
    #[wasm_bindgen(js_name = filterStudents)]
    pub fn filter_students(&self, search: &str, year_level: &str, status: &str) -> Result<String, JsValue> {
        let filter = StudentFilter {
            search: non_empty(search),
            year_level: year_level.parse().ok(),
            status: status.parse().ok(),
        };
        to_json(&self.registry.filter_students(&filter))
    }

    /// Filtered instructor table as JSON; empty strings mean "any"
    #[wasm_bindgen(js_name = filterInstructors)]
    pub fn filter_instructors(&self, search: &str, department: &str) -> Result<String, JsValue> {
        let filter = InstructorFilter {
            search: non_empty(search),
            department: non_empty(department),
        };
        to_json(&self.registry.filter_instructors(&filter))
    }

    /// Filtered course table as JSON; empty strings mean "any"
    #[wasm_bindgen(js_name = filterCourses)]
    pub fn filter_courses(&self, search: &str, year_level: &str) -> Result<String, JsValue> {
        let filter = CourseFilter {
            search: non_empty(search),
            year_level: year_level.parse().ok(),
        };
        to_json(&self.registry.filter_courses(&filter))
    }

    /// Whole registry as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        to_json(&self.registry.snapshot())
    }

    /// HTML report of the current state
    #[wasm_bindgen(js_name = renderReport)]
    pub fn render_report(&self) -> Result<String, JsValue> {
        let ctx = ReportContext::from_registry(&self.registry, "Academic Records", DEFAULT_TIME_FORMAT);
        HtmlReporter::new()
            .render(&ctx)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for RecordsApp {
    fn default() -> Self {
        Self::new()
    }
}
