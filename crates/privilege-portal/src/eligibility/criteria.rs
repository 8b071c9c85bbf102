use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Stable keys for the criteria a privilege can impose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CriterionKind {
    Gpax,
    StudyYear,
    RequiredCourses,
    SpecificCourseGrade,
}

/// Inclusive study-year bounds. A missing `min` means year 0, a missing `max` is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyYearRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

impl StudyYearRange {
    pub const fn between(min: u32, max: u32) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn lower(&self) -> u32 {
        self.min.unwrap_or(0)
    }

    pub fn upper(&self) -> u32 {
        self.max.unwrap_or(u32::MAX)
    }

    pub fn contains(&self, year: u32) -> bool {
        self.lower() <= year && year <= self.upper()
    }
}

/// Minimum grade required in one named course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseGradeRequirement {
    pub course_id: String,
    #[serde(alias = "minGrade")]
    pub grade: String,
}

/// Typed eligibility criteria for a privilege. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaSet {
    #[serde(
        rename = "gpax",
        alias = "minGpa",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub min_gpa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_year: Option<StudyYearRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_courses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_course_grade: Option<CourseGradeRequirement>,
}

impl CriteriaSet {
    pub fn with_min_gpa(mut self, min_gpa: f64) -> Self {
        self.min_gpa = Some(min_gpa);
        self
    }

    pub fn with_study_years(mut self, range: StudyYearRange) -> Self {
        self.study_year = Some(range);
        self
    }

    pub fn with_required_courses<I, S>(mut self, courses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_courses = courses.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_course_grade(
        mut self,
        course_id: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        self.specific_course_grade = Some(CourseGradeRequirement {
            course_id: course_id.into(),
            grade: grade.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.min_gpa.is_none()
            && self.study_year.is_none()
            && self.required_courses.is_empty()
            && self.specific_course_grade.is_none()
    }

    /// Normalise a loosely typed criteria document as stored alongside a privilege.
    ///
    /// Returns `None` when the document is not an object. Fields with the wrong
    /// shape, blank strings, and non-positive numbers are dropped as if absent.
    pub fn from_document(document: &Value) -> Option<Self> {
        let object = document.as_object()?;

        let min_gpa = field(object, &["gpax", "minGpa"])
            .and_then(number)
            .filter(|gpa| gpa.is_finite() && *gpa > 0.0);

        let study_year = field(object, &["studyYear", "studyYearRange"])
            .and_then(Value::as_object)
            .map(|range| StudyYearRange {
                min: range.get("min").and_then(year),
                max: range.get("max").and_then(year),
            })
            .filter(|range| range.min.is_some() || range.max.is_some());

        let required_courses = field(object, &["requiredCourses", "requiredCourseIds"])
            .map(course_list)
            .unwrap_or_default();

        let specific_course_grade = field(object, &["specificCourseGrade"])
            .and_then(Value::as_object)
            .and_then(|requirement| {
                let course_id = requirement.get("courseId").and_then(non_blank)?;
                let grade = requirement
                    .get("grade")
                    .or_else(|| requirement.get("minGrade"))
                    .and_then(non_blank)?;
                Some(CourseGradeRequirement { course_id, grade })
            });

        Some(Self {
            min_gpa,
            study_year,
            required_courses,
            specific_course_grade,
        })
    }
}

/// Serde adapter for criteria stored as free-form JSON next to a privilege.
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<CriteriaSet>, D::Error>
where
    D: Deserializer<'de>,
{
    let document = Option::<Value>::deserialize(deserializer)?;
    Ok(document
        .as_ref()
        .and_then(CriteriaSet::from_document)
        .filter(|criteria| !criteria.is_empty()))
}

fn field<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| object.get(*key))
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}

fn year(value: &Value) -> Option<u32> {
    let parsed = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }?;
    u32::try_from(parsed).ok().filter(|year| *year > 0)
}

fn non_blank(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn course_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(non_blank).collect(),
        Value::String(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|course| !course.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
