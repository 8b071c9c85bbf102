use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for students, as issued by the registrar.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One completed course on a transcript. The grade is kept as the raw symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub course_id: String,
    pub grade: String,
}

impl CourseRecord {
    pub fn new(course_id: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            grade: grade.into(),
        }
    }
}

/// Read-only academic snapshot consumed by the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicProfile {
    pub id: StudentId,
    pub gpax: f64,
    pub study_year: u32,
    #[serde(default)]
    pub transcript: Vec<CourseRecord>,
}

impl AcademicProfile {
    /// First transcript entry for the course. Later duplicates are ignored.
    pub fn course(&self, course_id: &str) -> Option<&CourseRecord> {
        self.transcript
            .iter()
            .find(|record| record.course_id == course_id)
    }

    pub fn has_completed(&self, course_id: &str) -> bool {
        self.course(course_id).is_some()
    }
}
