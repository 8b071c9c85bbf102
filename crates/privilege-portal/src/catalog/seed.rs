use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use super::domain::{Privilege, PrivilegeId, StaffId, StaffMember, StudentRecord};
use crate::eligibility::{AcademicProfile, CourseRecord, CriteriaSet, StudentId, StudyYearRange};

/// Initial catalog contents: privileges with criteria, students with transcripts,
/// and the staff directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub privileges: Vec<Privilege>,
    #[serde(default)]
    pub students: Vec<StudentRecord>,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
}

impl SeedData {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SeedError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SeedError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Replace students that share an id with an incoming record, append the rest.
    pub fn merge_students(&mut self, students: Vec<StudentRecord>) {
        let positions: HashMap<StudentId, usize> = self
            .students
            .iter()
            .enumerate()
            .map(|(index, student)| (student.id().clone(), index))
            .collect();

        for student in students {
            match positions.get(student.id()) {
                Some(index) => self.students[*index] = student,
                None => self.students.push(student),
            }
        }
    }

    /// The faculty's standing privileges and a small registrar sample.
    pub fn standard() -> Self {
        let now = Utc::now();
        let privilege = |id: u32,
                         title: &str,
                         kind: &str,
                         description: &str,
                         reward: &str,
                         criteria: CriteriaSet| Privilege {
            id: PrivilegeId(id),
            title: title.to_string(),
            kind: kind.to_string(),
            description: description.to_string(),
            reward: reward.to_string(),
            criteria: Some(criteria),
            updated_at: now,
        };

        let privileges = vec![
            privilege(
                1,
                "Academic Excellence Scholarship",
                "University-wide",
                "Scholarship for students with outstanding academic results",
                "20,000 THB scholarship",
                CriteriaSet::default()
                    .with_min_gpa(3.75)
                    .with_study_years(StudyYearRange::between(2, 4)),
            ),
            privilege(
                2,
                "Exchange Program in Japan",
                "Occasional",
                "Study and cultural exchange at a partner university in Tokyo",
                "Return flights and accommodation",
                CriteriaSet::default()
                    .with_min_gpa(3.50)
                    .with_required_courses(["GEN101"])
                    .with_study_years(StudyYearRange::between(3, 3)),
            ),
            privilege(
                3,
                "CPE101 Teaching Assistant",
                "Faculty",
                "Join the teaching team of a core foundation course",
                "Hourly stipend",
                CriteriaSet::default()
                    .with_min_gpa(3.25)
                    .with_course_grade("CPE101", "A"),
            ),
            privilege(
                4,
                "Zone A Parking Reservation",
                "University-wide",
                "Reserved parking close to the lecture buildings",
                "Zone A parking sticker",
                CriteriaSet::default().with_study_years(StudyYearRange::between(4, 4)),
            ),
        ];

        #[rustfmt::skip]
        let students = vec![
            student("66010001", "Somchai Riandee", "Engineering", "Computer Engineering", 3.85, 4, &[("CPE101", "A"), ("GEN101", "B+")]),
            student("66010002", "Somsri Meechai", "Engineering", "Electrical Engineering", 3.92, 4, &[("CPE101", "A"), ("GEN101", "A")]),
            student("65020011", "Mana Odthon", "Science", "Computer Science", 3.76, 3, &[("GEN101", "B")]),
            student("64030025", "Piti Yindee", "Business Administration", "Marketing", 3.45, 2, &[("GEN101", "C+")]),
            student("66010005", "Weera Klahan", "Engineering", "Civil Engineering", 3.15, 4, &[("CPE101", "C")]),
            student("65020015", "Suda Jaingam", "Science", "Chemistry", 3.88, 3, &[("GEN101", "A")]),
            student("64040030", "Manee Chujai", "Humanities", "English", 3.60, 2, &[]),
            student("66010008", "Arthit Tangjai", "Engineering", "Computer Engineering", 3.20, 4, &[("CPE101", "B"), ("GEN101", "B")]),
            student("63050040", "Chantra Jamsai", "Fine Arts", "Visual Communication Design", 3.95, 3, &[("GEN101", "A")]),
            student("65020022", "Ekkarat Mankong", "Science", "Physics", 2.90, 3, &[("GEN101", "C")]),
        ];

        let staff = vec![
            StaffMember {
                id: StaffId("staff001".to_string()),
                name: "Jaidee Meemetta".to_string(),
                role: "Engineering faculty officer".to_string(),
                avatar_url: "https://placehold.co/100x100/9f7aea/ffffff?text=JD".to_string(),
                email: Some("jaidee.m@uni.ac.th".to_string()),
            },
            StaffMember {
                id: StaffId("admin01".to_string()),
                name: "System Administrator".to_string(),
                role: "Chief administrator".to_string(),
                avatar_url: "https://placehold.co/100x100/718096/ffffff?text=AD".to_string(),
                email: Some("admin@uni.ac.th".to_string()),
            },
        ];

        Self {
            privileges,
            students,
            staff,
        }
    }
}

fn student(
    id: &str,
    name: &str,
    faculty: &str,
    major: &str,
    gpax: f64,
    study_year: u32,
    transcript: &[(&str, &str)],
) -> StudentRecord {
    StudentRecord {
        profile: AcademicProfile {
            id: StudentId(id.to_string()),
            gpax,
            study_year,
            transcript: transcript
                .iter()
                .map(|(course_id, grade)| CourseRecord::new(*course_id, *grade))
                .collect(),
        },
        name: name.to_string(),
        faculty: faculty.to_string(),
        major: Some(major.to_string()),
        avatar_url: None,
    }
}

/// Failure while loading a seed document.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid seed data: {0}")]
    Json(#[from] serde_json::Error),
}
