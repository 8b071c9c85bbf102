use crate::eligibility::{AcademicProfile, CourseRecord, CriteriaSet, StudentId, StudyYearRange};

pub(super) fn profile(gpax: f64, study_year: u32, transcript: &[(&str, &str)]) -> AcademicProfile {
    AcademicProfile {
        id: StudentId("66010001".to_string()),
        gpax,
        study_year,
        transcript: transcript
            .iter()
            .map(|(course_id, grade)| CourseRecord::new(*course_id, *grade))
            .collect(),
    }
}

/// Fourth-year computer engineering student from the seeded registrar data.
pub(super) fn honours_student() -> AcademicProfile {
    profile(3.85, 4, &[("CPE101", "A"), ("GEN101", "B+")])
}

pub(super) fn merit_scholarship() -> CriteriaSet {
    CriteriaSet::default()
        .with_min_gpa(3.75)
        .with_study_years(StudyYearRange::between(2, 4))
}

pub(super) fn exchange_program() -> CriteriaSet {
    CriteriaSet::default()
        .with_min_gpa(3.50)
        .with_required_courses(["GEN101"])
        .with_study_years(StudyYearRange::between(3, 3))
}

pub(super) fn teaching_assistant() -> CriteriaSet {
    CriteriaSet::default()
        .with_min_gpa(3.25)
        .with_course_grade("CPE101", "A")
}

pub(super) fn parking_permit() -> CriteriaSet {
    CriteriaSet::default().with_study_years(StudyYearRange::between(4, 4))
}
