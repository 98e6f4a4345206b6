//! Markdown report generator
//!
//! Plain pipe tables that render in GitHub, GitLab and VS Code previews.

use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;

#[derive(Template)]
#[template(path = "records.md")]
struct MarkdownTemplate<'a> {
    ctx: &'a ReportContext,
}

/// Markdown report generator
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(MarkdownTemplate { ctx }.render()?)
    }
}
