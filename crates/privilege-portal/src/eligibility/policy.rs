use super::criteria::CriteriaSet;
use super::profile::AcademicProfile;
use super::QualificationResult;
use serde::{Deserialize, Serialize};

/// Where a privilege lands on a student's dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "bucket", rename_all = "camelCase")]
pub enum ClassificationBucket {
    Achieved,
    NearlyAchieved { reason: String },
    NotAchieved,
}

impl ClassificationBucket {
    pub fn summary(&self) -> String {
        match self {
            ClassificationBucket::Achieved => "achieved".to_string(),
            ClassificationBucket::NearlyAchieved { reason } => format!("nearly achieved: {reason}"),
            ClassificationBucket::NotAchieved => "not achieved".to_string(),
        }
    }
}

/// One encouragement rule. Rules only look at GPA and study year; course
/// requirements never produce a near miss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum NearMissRule {
    /// GPAX below the floor by no more than `margin`.
    GpaShortfall { margin: f64 },
    /// Exactly `years` below the minimum study year.
    YearsAway { years: u32 },
}

impl NearMissRule {
    pub fn reason(&self, profile: &AcademicProfile, criteria: &CriteriaSet) -> Option<String> {
        match *self {
            NearMissRule::GpaShortfall { margin } => {
                let min_gpa = criteria.min_gpa?;
                let within = profile.gpax >= min_gpa - margin && profile.gpax < min_gpa;
                within.then(|| format!("short by {:.2} GPA points", min_gpa - profile.gpax))
            }
            NearMissRule::YearsAway { years } => {
                let min = criteria.study_year.as_ref()?.min?;
                let target = min.checked_sub(years)?;
                (profile.study_year == target).then(|| years_away(years))
            }
        }
    }
}

fn years_away(years: u32) -> String {
    match years {
        1 => "one academic year away".to_string(),
        n => format!("{n} academic years away"),
    }
}

/// Ordered near-miss rules; the first rule that yields a reason wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearMissPolicy {
    rules: Vec<NearMissRule>,
}

impl NearMissPolicy {
    pub fn new(rules: Vec<NearMissRule>) -> Self {
        Self { rules }
    }

    /// 0.1 GPA points, then exactly one year below the minimum.
    pub fn standard() -> Self {
        Self::new(vec![
            NearMissRule::GpaShortfall { margin: 0.1 },
            NearMissRule::YearsAway { years: 1 },
        ])
    }

    pub fn rules(&self) -> &[NearMissRule] {
        &self.rules
    }

    pub fn first_match(
        &self,
        profile: &AcademicProfile,
        criteria: Option<&CriteriaSet>,
    ) -> Option<String> {
        let criteria = criteria?;
        self.rules
            .iter()
            .find_map(|rule| rule.reason(profile, criteria))
    }
}

impl Default for NearMissPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

pub(crate) fn decide_bucket(
    policy: &NearMissPolicy,
    profile: &AcademicProfile,
    criteria: Option<&CriteriaSet>,
    result: &QualificationResult,
) -> ClassificationBucket {
    if result.is_qualified {
        return ClassificationBucket::Achieved;
    }

    match policy.first_match(profile, criteria) {
        Some(reason) => ClassificationBucket::NearlyAchieved { reason },
        None => ClassificationBucket::NotAchieved,
    }
}

/// A privilege the student nearly qualifies for, with the encouragement text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearMiss<K> {
    pub id: K,
    pub reason: String,
}

/// Stable three-way partition of privileges for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification<K> {
    pub achieved: Vec<K>,
    pub nearly_achieved: Vec<NearMiss<K>>,
    pub not_achieved: Vec<K>,
}

impl<K> Classification<K> {
    pub fn push(&mut self, id: K, bucket: ClassificationBucket) {
        match bucket {
            ClassificationBucket::Achieved => self.achieved.push(id),
            ClassificationBucket::NearlyAchieved { reason } => {
                self.nearly_achieved.push(NearMiss { id, reason })
            }
            ClassificationBucket::NotAchieved => self.not_achieved.push(id),
        }
    }

    pub fn len(&self) -> usize {
        self.achieved.len() + self.nearly_achieved.len() + self.not_achieved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn map<U, F>(self, mut f: F) -> Classification<U>
    where
        F: FnMut(K) -> U,
    {
        Classification {
            achieved: self.achieved.into_iter().map(&mut f).collect(),
            nearly_achieved: self
                .nearly_achieved
                .into_iter()
                .map(|near| NearMiss {
                    id: f(near.id),
                    reason: near.reason,
                })
                .collect(),
            not_achieved: self.not_achieved.into_iter().map(&mut f).collect(),
        }
    }
}

impl<K> Default for Classification<K> {
    fn default() -> Self {
        Self {
            achieved: Vec::new(),
            nearly_achieved: Vec::new(),
            not_achieved: Vec::new(),
        }
    }
}
