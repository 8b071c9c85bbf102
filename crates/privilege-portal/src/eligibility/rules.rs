use super::criteria::{CourseGradeRequirement, CriteriaSet, CriterionKind, StudyYearRange};
use super::grade::grade_points;
use super::profile::AcademicProfile;
use super::CriterionCheck;

/// Check every criterion present in `criteria`, in `CriterionKind` order.
pub(crate) fn check_criteria(
    profile: &AcademicProfile,
    criteria: &CriteriaSet,
) -> Vec<CriterionCheck> {
    let mut checks = Vec::with_capacity(4);

    if let Some(min_gpa) = criteria.min_gpa {
        checks.push(check_gpax(profile, min_gpa));
    }

    if let Some(range) = &criteria.study_year {
        checks.push(check_study_year(profile, range));
    }

    if !criteria.required_courses.is_empty() {
        checks.push(check_required_courses(profile, &criteria.required_courses));
    }

    if let Some(requirement) = &criteria.specific_course_grade {
        checks.push(check_course_grade(profile, requirement));
    }

    checks
}

fn check_gpax(profile: &AcademicProfile, min_gpa: f64) -> CriterionCheck {
    CriterionCheck {
        criterion: CriterionKind::Gpax,
        passed: profile.gpax >= min_gpa,
        requirement: format!("GPAX of at least {:.2}", min_gpa),
        observed: format!("GPAX {:.2}", profile.gpax),
    }
}

fn check_study_year(profile: &AcademicProfile, range: &StudyYearRange) -> CriterionCheck {
    let requirement = match (range.min, range.max) {
        (Some(min), Some(max)) if min == max => format!("year {min} students"),
        (Some(min), Some(max)) => format!("years {min} to {max}"),
        (Some(min), None) => format!("year {min} or above"),
        (None, Some(max)) => format!("year {max} or below"),
        (None, None) => "any study year".to_string(),
    };

    CriterionCheck {
        criterion: CriterionKind::StudyYear,
        passed: range.contains(profile.study_year),
        requirement,
        observed: format!("year {}", profile.study_year),
    }
}

fn check_required_courses(profile: &AcademicProfile, courses: &[String]) -> CriterionCheck {
    let missing: Vec<&str> = courses
        .iter()
        .map(String::as_str)
        .filter(|course_id| !profile.has_completed(course_id))
        .collect();

    let observed = if missing.is_empty() {
        "all completed".to_string()
    } else {
        format!("missing {}", missing.join(", "))
    };

    CriterionCheck {
        criterion: CriterionKind::RequiredCourses,
        passed: missing.is_empty(),
        requirement: format!("completed {}", courses.join(", ")),
        observed,
    }
}

fn check_course_grade(
    profile: &AcademicProfile,
    requirement: &CourseGradeRequirement,
) -> CriterionCheck {
    let record = profile.course(&requirement.course_id);
    let passed = record
        .map(|record| grade_points(&record.grade) >= grade_points(&requirement.grade))
        .unwrap_or(false);
    let observed = match record {
        Some(record) => format!("{} grade {}", record.course_id, record.grade),
        None => format!("{} not taken", requirement.course_id),
    };

    CriterionCheck {
        criterion: CriterionKind::SpecificCourseGrade,
        passed,
        requirement: format!(
            "{} grade {} or better",
            requirement.course_id, requirement.grade
        ),
        observed,
    }
}
