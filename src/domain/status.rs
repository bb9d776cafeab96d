//! Lifecycle states of job postings and applications.

use super::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publication state of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobPostingStatus {
    Draft,
    Active,
    Closed,
}

impl JobPostingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Active => "Active",
            Self::Closed => "Closed",
        }
    }

    pub fn is_draft(self) -> bool {
        self == Self::Draft
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }

    pub fn is_closed(self) -> bool {
        self == Self::Closed
    }
}

impl FromStr for JobPostingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "closed" => Ok(Self::Closed),
            other => Err(DomainError::validation(format!(
                "The job posting status provided is not valid: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for JobPostingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of an application through hiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobApplicationStatus {
    Draft,
    Submitted,
    Reviewed,
    Interviewing,
    /// An offer was extended.
    Selected,
    Hired,
    Declined,
    /// Pulled by the applicant.
    Withdrawn,
}

impl JobApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Reviewed => "reviewed",
            Self::Interviewing => "interviewing",
            Self::Selected => "selected",
            Self::Hired => "hired",
            Self::Declined => "declined",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Label shown to applicants.
    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Applied",
            Self::Reviewed => "Under Review",
            Self::Interviewing => "Interviewing",
            Self::Selected => "Job offer extended",
            Self::Hired => "Hired",
            Self::Declined => "Not Selected",
            Self::Withdrawn => "Withdrawn",
        }
    }

    pub fn is_draft(self) -> bool {
        self == Self::Draft
    }

    pub fn is_submitted(self) -> bool {
        self == Self::Submitted
    }

    pub fn is_reviewed(self) -> bool {
        self == Self::Reviewed
    }

    pub fn is_interviewing(self) -> bool {
        self == Self::Interviewing
    }

    pub fn is_selected(self) -> bool {
        self == Self::Selected
    }

    pub fn was_hired(self) -> bool {
        self == Self::Hired
    }

    pub fn is_declined(self) -> bool {
        self == Self::Declined
    }

    pub fn is_withdrawn(self) -> bool {
        self == Self::Withdrawn
    }
}

impl FromStr for JobApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "reviewed" => Ok(Self::Reviewed),
            "interviewing" => Ok(Self::Interviewing),
            "selected" => Ok(Self::Selected),
            "hired" => Ok(Self::Hired),
            "declined" => Ok(Self::Declined),
            "withdrawn" => Ok(Self::Withdrawn),
            other => Err(DomainError::validation(format!(
                "The job application status provided is not valid: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for JobApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_status() {
        let status: JobPostingStatus = "active".parse().unwrap();
        assert!(status.is_active());
        assert_eq!(status.label(), "Active");
        assert!("open".parse::<JobPostingStatus>().is_err());
    }

    #[test]
    fn test_application_labels() {
        assert_eq!(JobApplicationStatus::Submitted.label(), "Applied");
        assert_eq!(JobApplicationStatus::Selected.label(), "Job offer extended");
        assert_eq!(JobApplicationStatus::Declined.label(), "Not Selected");
        assert!(JobApplicationStatus::Hired.was_hired());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&JobApplicationStatus::Interviewing).unwrap(),
            r#""interviewing""#
        );
        let status: JobApplicationStatus = serde_json::from_str(r#""withdrawn""#).unwrap();
        assert!(status.is_withdrawn());
    }
}
