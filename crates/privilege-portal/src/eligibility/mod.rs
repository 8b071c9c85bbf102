//! Eligibility evaluation for student privileges.
//!
//! `evaluate` checks one academic profile against one criteria set and reports
//! every present criterion individually; `classify` buckets a list of privileges
//! into achieved, nearly achieved, and not achieved for a single student. Both
//! are pure and never fail: malformed input degrades to a failed criterion.

mod criteria;
mod grade;
mod policy;
mod profile;
mod rules;

#[cfg(test)]
mod tests;

pub use criteria::{CourseGradeRequirement, CriteriaSet, CriterionKind, StudyYearRange};
pub(crate) use criteria::deserialize_lenient;
pub use grade::{grade_points, LetterGrade};
pub use policy::{Classification, ClassificationBucket, NearMiss, NearMissPolicy, NearMissRule};
pub use profile::{AcademicProfile, CourseRecord, StudentId};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Verdict for one profile against one criteria set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationResult {
    pub is_qualified: bool,
    pub per_criterion: BTreeMap<CriterionKind, bool>,
}

impl QualificationResult {
    /// Result for a privilege with no requirements at all.
    pub fn vacuous() -> Self {
        Self {
            is_qualified: true,
            per_criterion: BTreeMap::new(),
        }
    }

    pub fn from_checks(checks: &[CriterionCheck]) -> Self {
        let per_criterion: BTreeMap<CriterionKind, bool> = checks
            .iter()
            .map(|check| (check.criterion, check.passed))
            .collect();
        let is_qualified = per_criterion.values().all(|passed| *passed);

        Self {
            is_qualified,
            per_criterion,
        }
    }

    pub fn failed(&self) -> impl Iterator<Item = CriterionKind> + '_ {
        self.per_criterion
            .iter()
            .filter(|(_, passed)| !**passed)
            .map(|(criterion, _)| *criterion)
    }
}

/// Itemised line of a privilege checklist, suitable for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionCheck {
    pub criterion: CriterionKind,
    pub passed: bool,
    pub requirement: String,
    pub observed: String,
}

/// Checklist for every criterion present in `criteria`.
pub fn explain(profile: &AcademicProfile, criteria: Option<&CriteriaSet>) -> Vec<CriterionCheck> {
    criteria
        .map(|criteria| rules::check_criteria(profile, criteria))
        .unwrap_or_default()
}

pub fn evaluate(profile: &AcademicProfile, criteria: Option<&CriteriaSet>) -> QualificationResult {
    match criteria {
        Some(criteria) => QualificationResult::from_checks(&rules::check_criteria(profile, criteria)),
        None => QualificationResult::vacuous(),
    }
}

/// Classify with the standard near-miss policy.
pub fn classify<'c, K, I>(profile: &AcademicProfile, privileges: I) -> Classification<K>
where
    I: IntoIterator<Item = (K, Option<&'c CriteriaSet>)>,
{
    EligibilityEngine::default().classify(profile, privileges)
}

/// Evaluator bound to a near-miss policy. Stateless apart from the policy, so a
/// single engine can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    policy: NearMissPolicy,
}

impl EligibilityEngine {
    pub fn new(policy: NearMissPolicy) -> Self {
        Self { policy }
    }

    pub fn evaluate(
        &self,
        profile: &AcademicProfile,
        criteria: Option<&CriteriaSet>,
    ) -> QualificationResult {
        evaluate(profile, criteria)
    }

    pub fn bucket(
        &self,
        profile: &AcademicProfile,
        criteria: Option<&CriteriaSet>,
    ) -> ClassificationBucket {
        let result = evaluate(profile, criteria);
        policy::decide_bucket(&self.policy, profile, criteria, &result)
    }

    pub fn classify<'c, K, I>(&self, profile: &AcademicProfile, privileges: I) -> Classification<K>
    where
        I: IntoIterator<Item = (K, Option<&'c CriteriaSet>)>,
    {
        let mut classification = Classification::default();
        for (id, criteria) in privileges {
            classification.push(id, self.bucket(profile, criteria));
        }
        classification
    }
}
