use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use super::domain::StudentRecord;
use crate::eligibility::{AcademicProfile, CourseRecord, StudentId};

/// Registrar CSV export with one row per completed course.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<StudentRecord>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Students are returned in first-seen order with transcripts in row order.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<StudentRecord>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let mut students: Vec<StudentRecord> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for result in csv_reader.records() {
            let record = result?;
            let line = record.position().map(|position| position.line()).unwrap_or(0);
            let row: RosterRow = record.deserialize(Some(&headers))?;

            let index = match positions.get(&row.student_id) {
                Some(index) => {
                    let existing = &students[*index];
                    if (existing.profile.gpax - row.gpax).abs() > f64::EPSILON
                        || existing.profile.study_year != row.study_year
                    {
                        return Err(RosterImportError::Conflicting {
                            student_id: row.student_id,
                            line,
                        });
                    }
                    *index
                }
                None => {
                    positions.insert(row.student_id.clone(), students.len());
                    students.push(row.student());
                    students.len() - 1
                }
            };

            if let Some(course_id) = row.course_id {
                students[index]
                    .profile
                    .transcript
                    .push(CourseRecord::new(course_id, row.grade.unwrap_or_default()));
            }
        }

        Ok(students)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    student_id: String,
    name: String,
    faculty: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    major: Option<String>,
    gpax: f64,
    study_year: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    course_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    grade: Option<String>,
}

impl RosterRow {
    fn student(&self) -> StudentRecord {
        StudentRecord {
            profile: AcademicProfile {
                id: StudentId(self.student_id.clone()),
                gpax: self.gpax,
                study_year: self.study_year,
                transcript: Vec::new(),
            },
            name: self.name.clone(),
            faculty: self.faculty.clone(),
            major: self.major.clone(),
            avatar_url: None,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Conflicting { student_id: String, line: u64 },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::Conflicting { student_id, line } => write!(
                f,
                "roster line {} disagrees with earlier GPAX or study year for student {}",
                line, student_id
            ),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::Conflicting { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}
