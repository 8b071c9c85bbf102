use serde::{Deserialize, Serialize};

use super::domain::{Privilege, StudentSummary};
use crate::eligibility::{Classification, ClassificationBucket, CriterionCheck, QualificationResult};

/// Privilege the student nearly qualifies for, with the encouragement message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearlyAchievedPrivilege {
    #[serde(flatten)]
    pub privilege: Privilege,
    pub reason: String,
}

/// Student dashboard: every privilege in catalog order, split into three buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboard {
    pub student: StudentSummary,
    pub achieved: Vec<Privilege>,
    pub nearly_achieved: Vec<NearlyAchievedPrivilege>,
    pub not_achieved: Vec<Privilege>,
}

impl StudentDashboard {
    pub fn new(student: StudentSummary, classification: Classification<&Privilege>) -> Self {
        Self {
            student,
            achieved: classification.achieved.into_iter().cloned().collect(),
            nearly_achieved: classification
                .nearly_achieved
                .into_iter()
                .map(|near| NearlyAchievedPrivilege {
                    privilege: near.id.clone(),
                    reason: near.reason,
                })
                .collect(),
            not_achieved: classification.not_achieved.into_iter().cloned().collect(),
        }
    }
}

/// Per-criterion checklist for one student and one privilege.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivilegeChecklist {
    pub privilege: Privilege,
    pub student: StudentSummary,
    #[serde(flatten)]
    pub result: QualificationResult,
    pub checks: Vec<CriterionCheck>,
    pub classification: ClassificationBucket,
}
