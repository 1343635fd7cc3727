//! CRUD and search orchestration. Stateless: every operation runs against the
//! store passed in, and absence is always a clean `None`/`false`, never an
//! error.

use crate::error::AppError;
use crate::filter::ProductFilter;
use crate::product::{Product, ProductDraft};
use crate::store::ProductStore;

pub struct ProductService;

impl ProductService {
    pub async fn get_all(store: &dyn ProductStore) -> Result<Vec<Product>, AppError> {
        store.list().await
    }

    pub async fn get_by_id(
        store: &dyn ProductStore,
        id: i64,
    ) -> Result<Option<Product>, AppError> {
        store.fetch(id).await
    }

    /// Persist a new product. Identity is assigned by the store; a
    /// caller-supplied id on the draft is cleared first.
    pub async fn add(store: &dyn ProductStore, mut draft: ProductDraft) -> Result<Product, AppError> {
        draft.id = None;
        store.create(&draft).await
    }

    /// Full replace of an existing record. Confirms existence first and
    /// returns `None` without mutating anything when the id is absent.
    pub async fn update(
        store: &dyn ProductStore,
        id: i64,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, AppError> {
        if store.fetch(id).await?.is_none() {
            return Ok(None);
        }
        store.update(id, draft).await
    }

    /// Delete by id. Returns whether a deletion occurred; a missing id is a
    /// normal `false`, not a fault.
    pub async fn delete(store: &dyn ProductStore, id: i64) -> Result<bool, AppError> {
        if store.fetch(id).await?.is_none() {
            return Ok(false);
        }
        store.delete(id).await
    }

    /// Criteria search. An empty filter is equivalent to `get_all`; no match
    /// yields an empty vec.
    pub async fn search(
        store: &dyn ProductStore,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, AppError> {
        if filter.is_empty() {
            return store.list().await;
        }
        store.query(filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryProductStore;

    fn draft(name: &str, category: &str, price: f64, stock: i32) -> ProductDraft {
        ProductDraft {
            id: None,
            name: name.into(),
            category: category.into(),
            price,
            stock,
        }
    }

    async fn seeded() -> MemoryProductStore {
        let store = MemoryProductStore::new();
        ProductService::add(&store, draft("Laptop", "Electronics", 999.99, 10))
            .await
            .unwrap();
        ProductService::add(&store, draft("Mouse", "Electronics", 29.99, 50))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn get_all_returns_every_record() {
        let store = seeded().await;
        let all = ProductService::get_all(&store).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn get_by_id_distinguishes_absence_from_failure() {
        let store = seeded().await;
        assert!(ProductService::get_by_id(&store, 1).await.unwrap().is_some());
        assert!(ProductService::get_by_id(&store, 99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn add_ignores_a_caller_supplied_id() {
        let store = MemoryProductStore::new();
        let mut candidate = draft("Keyboard", "Electronics", 79.99, 25);
        candidate.id = Some(777);
        let saved = ProductService::add(&store, candidate.clone()).await.unwrap();
        assert_eq!(saved.id, 1);
        let fetched = ProductService::get_by_id(&store, saved.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, candidate.with_id(saved.id));
    }

    #[tokio::test]
    async fn update_replaces_every_field() {
        let store = seeded().await;
        let updated = ProductService::update(
            &store,
            1,
            &draft("Gaming Laptop", "Electronics", 1499.99, 5),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.name, "Gaming Laptop");
        assert_eq!(updated.price, 1499.99);
        assert_eq!(updated.stock, 5);
    }

    #[tokio::test]
    async fn update_missing_id_leaves_the_store_untouched() {
        let store = seeded().await;
        let result = ProductService::update(&store, 99, &draft("Ghost", "Nothing", 1.0, 1))
            .await
            .unwrap();
        assert!(result.is_none());
        assert_eq!(ProductService::get_all(&store).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_returns_true_exactly_once() {
        let store = seeded().await;
        assert!(ProductService::delete(&store, 1).await.unwrap());
        assert!(!ProductService::delete(&store, 1).await.unwrap());
        assert!(ProductService::get_by_id(&store, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn search_with_empty_criteria_equals_get_all() {
        let store = seeded().await;
        let all = ProductService::get_all(&store).await.unwrap();
        let searched = ProductService::search(&store, &ProductFilter::default())
            .await
            .unwrap();
        assert_eq!(searched, all);
    }

    #[tokio::test]
    async fn search_combines_category_and_price_ceiling() {
        let store = seeded().await;
        let filter = ProductFilter {
            category: Some("Electronics".into()),
            max_price: Some(50.0),
            ..Default::default()
        };
        let hits = ProductService::search(&store, &filter).await.unwrap();
        let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Mouse"]);
    }

    #[tokio::test]
    async fn search_on_empty_store_is_an_empty_sequence() {
        let store = MemoryProductStore::new();
        let hits = ProductService::search(&store, &ProductFilter::default())
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn search_no_match_is_an_empty_sequence() {
        let store = seeded().await;
        let filter = ProductFilter {
            name: Some("Projector".into()),
            ..Default::default()
        };
        let hits = ProductService::search(&store, &filter).await.unwrap();
        assert!(hits.is_empty());
    }
}
