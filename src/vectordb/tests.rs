use super::error::VectorDbError;
use super::memory::InMemoryProductStore;
use super::model::cosine_similarity;
use super::store::ProductStore;
use crate::product::ProductRecord;

const TEST_VECTOR_SIZE: usize = 8;

fn store() -> InMemoryProductStore {
    InMemoryProductStore::new(TEST_VECTOR_SIZE)
}

fn product(title: &str, price: f64, brand: &str) -> ProductRecord {
    ProductRecord::new(title, format!("{} description", title), Some(price), brand)
}

/// Unit vector with a 1.0 in the given component.
fn axis_vector(axis: usize) -> Vec<f32> {
    let mut v = vec![0.0; TEST_VECTOR_SIZE];
    v[axis] = 1.0;
    v
}

#[tokio::test]
async fn test_insert_assigns_increasing_ids() {
    let store = store();
    let vector = axis_vector(0);

    let id1 = store
        .insert(&product("A", 10.0, "Acme"), &vector, 0.1, false)
        .await
        .unwrap();
    let id2 = store
        .insert(&product("B", 11.0, "Acme"), &vector, 0.2, false)
        .await
        .unwrap();
    let id3 = store
        .insert(&product("C", 12.0, "Acme"), &vector, 0.3, false)
        .await
        .unwrap();

    assert!(id1 < id2 && id2 < id3);
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn test_insert_rejects_wrong_dimension() {
    let store = store();

    let result = store
        .insert(&product("A", 10.0, "Acme"), &[0.1; 3], 0.1, false)
        .await;

    assert!(matches!(
        result,
        Err(VectorDbError::InvalidDimension {
            expected: TEST_VECTOR_SIZE,
            actual: 3
        })
    ));
    assert!(store.is_empty(), "rejected insert must not leave a row");
}

#[tokio::test]
async fn test_search_rejects_wrong_dimension() {
    let store = store();

    let result = store.search_similar(&[0.1; 3], 5).await;

    assert!(matches!(
        result,
        Err(VectorDbError::InvalidDimension { .. })
    ));
}

#[tokio::test]
async fn test_search_empty_catalog() {
    let store = store();

    let results = store.search_similar(&axis_vector(0), 5).await.unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_search_sorted_by_similarity_descending() {
    let store = store();

    // Three stored vectors at decreasing angles to the query axis.
    let close = {
        let mut v = axis_vector(0);
        v[1] = 0.1;
        v
    };
    let mid = {
        let mut v = axis_vector(0);
        v[1] = 1.0;
        v
    };
    let far = axis_vector(1);

    store
        .insert(&product("far", 1.0, "A"), &far, 0.1, false)
        .await
        .unwrap();
    store
        .insert(&product("close", 1.0, "A"), &close, 0.1, false)
        .await
        .unwrap();
    store
        .insert(&product("mid", 1.0, "A"), &mid, 0.1, false)
        .await
        .unwrap();

    let results = store.search_similar(&axis_vector(0), 3).await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].title, "close");
    assert_eq!(results[1].title, "mid");
    assert_eq!(results[2].title, "far");
    for pair in results.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
}

#[tokio::test]
async fn test_search_ties_broken_by_insertion_order() {
    let store = store();
    let vector = axis_vector(0);

    // Identical vectors: equal similarity, so ordering falls back to id.
    let first = store
        .insert(&product("first", 1.0, "A"), &vector, 0.1, false)
        .await
        .unwrap();
    let second = store
        .insert(&product("second", 1.0, "A"), &vector, 0.1, false)
        .await
        .unwrap();
    let third = store
        .insert(&product("third", 1.0, "A"), &vector, 0.1, false)
        .await
        .unwrap();

    let results = store.search_similar(&vector, 3).await.unwrap();

    assert_eq!(
        results.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![first, second, third]
    );
}

#[tokio::test]
async fn test_search_respects_limit() {
    let store = store();

    for i in 0..10 {
        store
            .insert(
                &product(&format!("p{}", i), 1.0, "A"),
                &axis_vector(i % TEST_VECTOR_SIZE),
                0.1,
                false,
            )
            .await
            .unwrap();
    }

    let results = store.search_similar(&axis_vector(0), 4).await.unwrap();
    assert_eq!(results.len(), 4);

    let results = store.search_similar(&axis_vector(0), 1).await.unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_search_carries_product_metadata() {
    let store = store();

    store
        .insert(&product("Widget", 19.99, "Acme"), &axis_vector(0), 0.42, true)
        .await
        .unwrap();

    let results = store.search_similar(&axis_vector(0), 1).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Widget");
    assert_eq!(results[0].brand.as_deref(), Some("Acme"));
    assert_eq!(results[0].price, Some(19.99));
    assert!(results[0].verified);
    assert!((results[0].score.unwrap() - 0.42).abs() < 1e-6);
    assert!((results[0].similarity - 1.0).abs() < 1e-5);
}

#[tokio::test]
async fn test_get_returns_stored_row() {
    let store = store();

    let id = store
        .insert(&product("Widget", 19.99, "Acme"), &axis_vector(0), 0.42, false)
        .await
        .unwrap();

    let row = store.get(id).await.unwrap();

    assert_eq!(row.id, id);
    assert_eq!(row.title, "Widget");
    assert!(!row.verified);
}

#[tokio::test]
async fn test_get_unknown_id() {
    let store = store();

    let result = store.get(999).await;

    assert!(matches!(result, Err(VectorDbError::NotFound { id: 999 })));
}

#[tokio::test]
async fn test_update_verification() {
    let store = store();

    let id = store
        .insert(&product("Widget", 19.99, "Acme"), &axis_vector(0), 0.42, false)
        .await
        .unwrap();

    store.update_verification(id, true, 0.05).await.unwrap();

    let row = store.get(id).await.unwrap();
    assert!(row.verified);
    assert!((row.score.unwrap() - 0.05).abs() < 1e-6);
}

#[tokio::test]
async fn test_update_verification_unknown_id() {
    let store = store();

    let result = store.update_verification(42, true, 0.1).await;

    assert!(matches!(result, Err(VectorDbError::NotFound { id: 42 })));
}

#[tokio::test]
async fn test_recent_verified_filters_and_orders() {
    let store = store();
    let vector = axis_vector(0);

    let a = store
        .insert(&product("a", 1.0, "A"), &vector, 0.1, true)
        .await
        .unwrap();
    let _unverified = store
        .insert(&product("b", 1.0, "A"), &vector, 0.9, false)
        .await
        .unwrap();
    let c = store
        .insert(&product("c", 1.0, "A"), &vector, 0.1, true)
        .await
        .unwrap();

    let recent = store.recent_verified(10).await.unwrap();

    // Newest first; the unverified row never appears.
    assert_eq!(recent.iter().map(|p| p.id).collect::<Vec<_>>(), vec![c, a]);
    assert!(recent.iter().all(|p| p.verified));

    let limited = store.recent_verified(1).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, c);
}

#[test]
fn test_cosine_similarity_identical() {
    let v = vec![1.0, 2.0, 3.0];
    assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-4);
}

#[test]
fn test_cosine_similarity_orthogonal() {
    assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-4);
}

#[test]
fn test_cosine_similarity_opposite() {
    assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-4);
}

#[test]
fn test_cosine_similarity_mismatched_lengths() {
    assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
}

#[test]
fn test_cosine_similarity_zero_vector() {
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
}
