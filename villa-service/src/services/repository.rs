//! Villa storage.
//!
//! Handlers talk to [`VillaRepository`]; the process owns a single
//! [`InMemoryVillaRepository`] created at startup and shared through
//! `AppState`. Each call is atomic on its own; nothing spans calls.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::models::{Villa, VillaDto};

#[async_trait]
pub trait VillaRepository: Send + Sync {
    /// All villas ordered by id.
    async fn list(&self) -> anyhow::Result<Vec<Villa>>;

    async fn get(&self, id: i64) -> anyhow::Result<Option<Villa>>;

    /// Whether a villa other than `except_id` already uses `name`, ignoring case.
    async fn name_taken(&self, name: &str, except_id: Option<i64>) -> anyhow::Result<bool>;

    /// Store a new villa under `max(id) + 1` (1 for an empty store).
    async fn insert(&self, villa: VillaDto) -> anyhow::Result<Villa>;

    /// Overwrite the stored villa with the same id. Returns false if absent.
    async fn replace(&self, villa: Villa) -> anyhow::Result<bool>;

    async fn remove(&self, id: i64) -> anyhow::Result<Option<Villa>>;
}

#[derive(Debug, Default)]
pub struct InMemoryVillaRepository {
    villas: RwLock<BTreeMap<i64, Villa>>,
}

impl InMemoryVillaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_villas(villas: impl IntoIterator<Item = Villa>) -> Self {
        Self {
            villas: RwLock::new(villas.into_iter().map(|v| (v.id, v)).collect()),
        }
    }

    /// Store preloaded with the demo villas.
    pub fn seeded() -> Self {
        Self::with_villas(demo_villas())
    }
}

pub fn demo_villas() -> Vec<Villa> {
    vec![
        Villa {
            id: 1,
            name: "Pool View".to_string(),
            occupancy: 4,
            sqft: 100.0,
        },
        Villa {
            id: 2,
            name: "Beach View".to_string(),
            occupancy: 3,
            sqft: 300.0,
        },
    ]
}

#[async_trait]
impl VillaRepository for InMemoryVillaRepository {
    async fn list(&self) -> anyhow::Result<Vec<Villa>> {
        Ok(self.villas.read().await.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Villa>> {
        Ok(self.villas.read().await.get(&id).cloned())
    }

    async fn name_taken(&self, name: &str, except_id: Option<i64>) -> anyhow::Result<bool> {
        Ok(self
            .villas
            .read()
            .await
            .values()
            .any(|v| Some(v.id) != except_id && v.has_name(name)))
    }

    async fn insert(&self, villa: VillaDto) -> anyhow::Result<Villa> {
        let mut villas = self.villas.write().await;
        let id = villas.keys().next_back().map_or(1, |max| max + 1);
        let villa = villa.into_villa(id);
        villas.insert(id, villa.clone());
        Ok(villa)
    }

    async fn replace(&self, villa: Villa) -> anyhow::Result<bool> {
        let mut villas = self.villas.write().await;
        match villas.get_mut(&villa.id) {
            Some(existing) => {
                *existing = villa;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: i64) -> anyhow::Result<Option<Villa>> {
        Ok(self.villas.write().await.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str) -> VillaDto {
        VillaDto {
            id: 0,
            name: name.to_string(),
            occupancy: 2,
            sqft: 500.0,
        }
    }

    #[tokio::test]
    async fn ids_start_at_one_and_follow_max() {
        let repo = InMemoryVillaRepository::new();

        let mut ids = Vec::new();
        for name in ["A", "B", "C"] {
            ids.push(repo.insert(dto(name)).await.unwrap().id);
        }
        assert_eq!(ids, vec![1, 2, 3]);

        // Removing a middle record does not reuse ids; removing the max does.
        repo.remove(2).await.unwrap();
        assert_eq!(repo.insert(dto("D")).await.unwrap().id, 4);
        repo.remove(4).await.unwrap();
        assert_eq!(repo.insert(dto("E")).await.unwrap().id, 4);
    }

    #[tokio::test]
    async fn seeded_store_continues_after_demo_ids() {
        let repo = InMemoryVillaRepository::seeded();
        assert_eq!(repo.list().await.unwrap().len(), 2);
        assert_eq!(repo.insert(dto("Garden View")).await.unwrap().id, 3);
    }

    #[tokio::test]
    async fn name_lookup_is_case_insensitive_and_can_exclude_self() {
        let repo = InMemoryVillaRepository::seeded();

        assert!(repo.name_taken("pool view", None).await.unwrap());
        assert!(repo.name_taken("BEACH VIEW", Some(1)).await.unwrap());
        assert!(!repo.name_taken("beach view", Some(2)).await.unwrap());
        assert!(!repo.name_taken("Lake View", None).await.unwrap());
    }

    #[tokio::test]
    async fn replace_and_remove_report_missing_records() {
        let repo = InMemoryVillaRepository::seeded();

        let mut villa = repo.get(1).await.unwrap().unwrap();
        villa.occupancy = 8;
        assert!(repo.replace(villa.clone()).await.unwrap());
        assert_eq!(repo.get(1).await.unwrap(), Some(villa));

        let ghost = Villa {
            id: 99,
            ..demo_villas()[0].clone()
        };
        assert!(!repo.replace(ghost).await.unwrap());

        assert!(repo.remove(2).await.unwrap().is_some());
        assert!(repo.remove(2).await.unwrap().is_none());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
