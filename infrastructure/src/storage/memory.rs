//! In-memory proposal repository for single-session use.

use async_trait::async_trait;
use govmind_application::{ProposalRepository, RepositoryError};
use govmind_domain::{ProposalId, ProposalRecord};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryProposalRepository {
    records: RwLock<HashMap<ProposalId, ProposalRecord>>,
}

impl InMemoryProposalRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProposalRepository for InMemoryProposalRepository {
    async fn get(&self, id: &ProposalId) -> Result<Option<ProposalRecord>, RepositoryError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn insert_if_absent(&self, record: ProposalRecord) -> Result<bool, RepositoryError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Ok(false);
        }
        records.insert(record.id.clone(), record);
        Ok(true)
    }

    async fn replace(&self, record: ProposalRecord) -> Result<(), RepositoryError> {
        self.records.write().await.insert(record.id.clone(), record);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ProposalRecord>, RepositoryError> {
        Ok(self.records.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use govmind_domain::ProposalSubmission;

    fn record(id: &str, title: &str) -> ProposalRecord {
        ProposalRecord::new(
            ProposalId::new(id).unwrap(),
            ProposalSubmission::try_new(title, "Description").unwrap(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_insert_if_absent_never_overwrites() {
        let repo = InMemoryProposalRepository::new();
        assert!(repo.insert_if_absent(record("a", "First")).await.unwrap());
        assert!(!repo.insert_if_absent(record("a", "Second")).await.unwrap());

        let stored = repo.get(&ProposalId::new("a").unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.title, "First");
    }

    #[tokio::test]
    async fn test_replace_and_list() {
        let repo = InMemoryProposalRepository::new();
        repo.insert_if_absent(record("a", "A")).await.unwrap();
        let analyzing = record("a", "A").start_analysis(Utc::now()).unwrap();
        repo.replace(analyzing).await.unwrap();
        repo.insert_if_absent(record("b", "B")).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        let a = repo.get(&ProposalId::new("a").unwrap()).await.unwrap().unwrap();
        assert_eq!(a.attempts, 1);
    }
}
