//! Validated proposal text

use crate::core::error::DomainError;
use crate::core::string::has_content;
use serde::{Deserialize, Serialize};

/// Title and description of a proposal, checked at submission time (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSubmission {
    title: String,
    description: String,
}

impl ProposalSubmission {
    /// Validate and build a submission.
    ///
    /// Both fields must contain non-whitespace text. The text itself is
    /// stored as given; only the emptiness check ignores whitespace.
    pub fn try_new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        let description = description.into();

        if !has_content(&title) {
            return Err(DomainError::EmptyTitle);
        }
        if !has_content(&description) {
            return Err(DomainError::EmptyDescription);
        }

        Ok(Self { title, description })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn into_parts(self) -> (String, String) {
        (self.title, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_submission() {
        let s = ProposalSubmission::try_new("Fund audits", "Allocate 10k for audits").unwrap();
        assert_eq!(s.title(), "Fund audits");
        assert_eq!(s.description(), "Allocate 10k for audits");
    }

    #[test]
    fn test_empty_title_rejected() {
        assert_eq!(
            ProposalSubmission::try_new("  ", "body"),
            Err(DomainError::EmptyTitle)
        );
    }

    #[test]
    fn test_empty_description_rejected() {
        assert_eq!(
            ProposalSubmission::try_new("title", ""),
            Err(DomainError::EmptyDescription)
        );
    }
}
