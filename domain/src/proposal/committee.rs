//! DAO committee reference data

use serde::{Deserialize, Serialize};

/// A DAO committee that a drafted proposal can be routed to.
///
/// Committees are owned by the DAO backend; this subsystem only reads the
/// list the caller hands in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committee {
    pub id: String,
    pub committee_type: String,
    #[serde(default)]
    pub responsibilities: String,
}

impl Committee {
    pub fn new(
        id: impl Into<String>,
        committee_type: impl Into<String>,
        responsibilities: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            committee_type: committee_type.into(),
            responsibilities: responsibilities.into(),
        }
    }

    /// Find a committee by exact id match.
    pub fn find<'a>(committees: &'a [Committee], id: &str) -> Option<&'a Committee> {
        committees.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_exact_match_only() {
        let committees = vec![
            Committee::new("1", "Treasury", "Budgets"),
            Committee::new("12", "Technical", ""),
        ];
        assert_eq!(Committee::find(&committees, "12").unwrap().committee_type, "Technical");
        assert!(Committee::find(&committees, "2").is_none());
        assert!(Committee::find(&committees, " 1").is_none());
    }

    #[test]
    fn test_responsibilities_default_when_missing() {
        let c: Committee =
            serde_json::from_str(r#"{"id":"3","committee_type":"Grants"}"#).unwrap();
        assert_eq!(c.responsibilities, "");
    }
}
