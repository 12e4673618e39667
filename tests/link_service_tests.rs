//! Link service tests
//!
//! Tests for LinkService over SeaOrmStorage using temporary SQLite databases:
//! creation, ordered listing, delete semantics, and the transactional reorder
//! contract (all-or-nothing, ownership validation, dense 0..N-1 order).

use std::sync::Arc;

use linkdeck::config::init_config;
use linkdeck::errors::LinkdeckError;
use linkdeck::services::LinkService;
use linkdeck::storage::{Link, SeaOrmStorage};
use tempfile::TempDir;

/// 创建临时 SQLite 数据库的存储实例
async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    init_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    (Arc::new(storage), temp_dir)
}

async fn create_service() -> (LinkService, Arc<SeaOrmStorage>, TempDir) {
    let (storage, temp_dir) = create_temp_storage().await;
    (LinkService::new(storage.clone()), storage, temp_dir)
}

fn ids(links: &[Link]) -> Vec<i64> {
    links.iter().map(|link| link.id).collect()
}

fn orders(links: &[Link]) -> Vec<i32> {
    links.iter().map(|link| link.order).collect()
}

// =============================================================================
// Create / List
// =============================================================================

#[tokio::test]
async fn test_create_then_list_contains_new_link() {
    let (service, _storage, _dir) = create_service().await;

    let created = service
        .create_link("user_a", "Blog", "https://a.example")
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.order, 0);

    let links = service.list_links("user_a").await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].id, created.id);
    assert_eq!(links[0].title, "Blog");
    assert_eq!(links[0].url, "https://a.example");
}

#[tokio::test]
async fn test_create_appends_at_end_of_sequence() {
    let (service, _storage, _dir) = create_service().await;

    for n in 0..4 {
        let link = service
            .create_link("user_a", &format!("Link {}", n), "https://example.com")
            .await
            .unwrap();
        assert_eq!(link.order, n);
    }

    let links = service.list_links("user_a").await.unwrap();
    assert_eq!(orders(&links), vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_create_rejects_empty_title() {
    let (service, _storage, _dir) = create_service().await;

    let err = service
        .create_link("user_a", "   ", "https://a.example")
        .await
        .unwrap_err();
    assert!(matches!(err, LinkdeckError::Validation(_)));
}

#[tokio::test]
async fn test_create_rejects_invalid_url() {
    let (service, _storage, _dir) = create_service().await;

    for bad in ["", "not a url", "ftp://example.com", "javascript:alert(1)"] {
        let err = service.create_link("user_a", "Bad", bad).await.unwrap_err();
        assert!(
            matches!(err, LinkdeckError::Validation(_)),
            "expected validation error for {:?}",
            bad
        );
    }

    assert!(service.list_links("user_a").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_is_scoped_to_owner() {
    let (service, _storage, _dir) = create_service().await;

    service
        .create_link("user_a", "Mine", "https://a.example")
        .await
        .unwrap();
    service
        .create_link("user_b", "Theirs", "https://b.example")
        .await
        .unwrap();

    let links_a = service.list_links("user_a").await.unwrap();
    assert_eq!(links_a.len(), 1);
    assert_eq!(links_a[0].title, "Mine");

    let links_b = service.list_links("user_b").await.unwrap();
    assert_eq!(links_b.len(), 1);
    assert_eq!(links_b[0].title, "Theirs");
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_own_link() {
    let (service, _storage, _dir) = create_service().await;

    let link = service
        .create_link("user_a", "Blog", "https://a.example")
        .await
        .unwrap();

    service.delete_link("user_a", link.id).await.unwrap();
    assert!(service.list_links("user_a").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_nonexistent_id_is_typed_not_found() {
    let (service, _storage, _dir) = create_service().await;

    let err = service.delete_link("user_a", 9999).await.unwrap_err();
    assert!(matches!(err, LinkdeckError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_foreign_link_is_typed_forbidden_and_leaves_data() {
    let (service, _storage, _dir) = create_service().await;

    let foreign = service
        .create_link("user_b", "Theirs", "https://b.example")
        .await
        .unwrap();

    let err = service.delete_link("user_a", foreign.id).await.unwrap_err();
    assert!(matches!(err, LinkdeckError::Forbidden(_)));

    // 别人的数据不受影响
    let links_b = service.list_links("user_b").await.unwrap();
    assert_eq!(ids(&links_b), vec![foreign.id]);
}

// =============================================================================
// Reorder
// =============================================================================

#[tokio::test]
async fn test_reorder_applies_submitted_permutation() {
    let (service, _storage, _dir) = create_service().await;

    let mut created = Vec::new();
    for n in 0..3 {
        created.push(
            service
                .create_link("user_a", &format!("Link {}", n), "https://example.com")
                .await
                .unwrap(),
        );
    }

    let permutation = vec![created[2].id, created[0].id, created[1].id];
    service.reorder_links("user_a", &permutation).await.unwrap();

    let links = service.list_links("user_a").await.unwrap();
    assert_eq!(ids(&links), permutation);
    assert_eq!(orders(&links), vec![0, 1, 2]);
}

#[tokio::test]
async fn test_reorder_foreign_id_rejected_and_nothing_changes() {
    let (service, _storage, _dir) = create_service().await;

    let mine_1 = service
        .create_link("user_a", "One", "https://example.com/1")
        .await
        .unwrap();
    let mine_2 = service
        .create_link("user_a", "Two", "https://example.com/2")
        .await
        .unwrap();
    let foreign = service
        .create_link("user_b", "Theirs", "https://b.example")
        .await
        .unwrap();

    let err = service
        .reorder_links("user_a", &[mine_2.id, foreign.id, mine_1.id])
        .await
        .unwrap_err();
    assert!(matches!(err, LinkdeckError::Validation(_)));

    // 整个操作被拒绝，所有 order 保持原状
    let links = service.list_links("user_a").await.unwrap();
    assert_eq!(ids(&links), vec![mine_1.id, mine_2.id]);
    assert_eq!(orders(&links), vec![0, 1]);

    let links_b = service.list_links("user_b").await.unwrap();
    assert_eq!(orders(&links_b), vec![0]);
}

#[tokio::test]
async fn test_reorder_duplicate_id_rejected() {
    let (service, _storage, _dir) = create_service().await;

    let link = service
        .create_link("user_a", "One", "https://example.com/1")
        .await
        .unwrap();

    let err = service
        .reorder_links("user_a", &[link.id, link.id])
        .await
        .unwrap_err();
    assert!(matches!(err, LinkdeckError::Validation(_)));
}

#[tokio::test]
async fn test_reorder_omitted_links_appended_in_prior_order() {
    let (service, _storage, _dir) = create_service().await;

    let mut created = Vec::new();
    for n in 0..4 {
        created.push(
            service
                .create_link("user_a", &format!("Link {}", n), "https://example.com")
                .await
                .unwrap(),
        );
    }

    // 只提交最后一条，其余保持相对顺序跟在后面
    service
        .reorder_links("user_a", &[created[3].id])
        .await
        .unwrap();

    let links = service.list_links("user_a").await.unwrap();
    assert_eq!(
        ids(&links),
        vec![created[3].id, created[0].id, created[1].id, created[2].id]
    );
    assert_eq!(orders(&links), vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_reorder_closes_gap_left_by_delete() {
    let (service, _storage, _dir) = create_service().await;

    let mut created = Vec::new();
    for n in 0..3 {
        created.push(
            service
                .create_link("user_a", &format!("Link {}", n), "https://example.com")
                .await
                .unwrap(),
        );
    }

    // 删除中间一条，order 出现空洞 (0, 2)
    service.delete_link("user_a", created[1].id).await.unwrap();

    service
        .reorder_links("user_a", &[created[2].id, created[0].id])
        .await
        .unwrap();

    let links = service.list_links("user_a").await.unwrap();
    assert_eq!(ids(&links), vec![created[2].id, created[0].id]);
    assert_eq!(orders(&links), vec![0, 1]);
}

// =============================================================================
// Profiles
// =============================================================================

#[tokio::test]
async fn test_profile_and_public_profile() {
    let (service, storage, _dir) = create_service().await;

    storage
        .ensure_user("user_a", "alice@example.com", "alice")
        .await
        .unwrap();
    service
        .create_link("user_a", "Blog", "https://a.example")
        .await
        .unwrap();

    let (profile, links) = service.profile("user_a").await.unwrap();
    assert_eq!(profile.username, "alice");
    assert_eq!(profile.email, "alice@example.com");
    assert_eq!(links.len(), 1);

    let (public, links) = service.public_profile("alice").await.unwrap();
    assert_eq!(public.identity_id, "user_a");
    assert_eq!(links.len(), 1);
}

#[tokio::test]
async fn test_public_profile_unknown_handle_is_not_found() {
    let (service, _storage, _dir) = create_service().await;

    let err = service.public_profile("nobody").await.unwrap_err();
    assert!(matches!(err, LinkdeckError::NotFound(_)));
}

#[tokio::test]
async fn test_ensure_user_is_idempotent_and_keeps_first_profile() {
    let (_service, storage, _dir) = create_service().await;

    storage
        .ensure_user("user_a", "alice@example.com", "alice")
        .await
        .unwrap();
    // 第二次认证带了变化的 email，档案不被本子系统改写
    storage
        .ensure_user("user_a", "changed@example.com", "alice")
        .await
        .unwrap();

    let profile = storage
        .find_user_by_identity("user_a")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.email, "alice@example.com");
}

// =============================================================================
// Scenario（端到端顺序语义）
// =============================================================================

#[tokio::test]
async fn test_full_scenario_create_reorder_delete() {
    let (service, _storage, _dir) = create_service().await;

    let l1 = service
        .create_link("user_a", "Blog", "https://a.example")
        .await
        .unwrap();
    let l2 = service
        .create_link("user_a", "Shop", "https://b.example")
        .await
        .unwrap();

    // 创建顺序
    let links = service.list_links("user_a").await.unwrap();
    assert_eq!(ids(&links), vec![l1.id, l2.id]);

    // 反转
    service
        .reorder_links("user_a", &[l2.id, l1.id])
        .await
        .unwrap();
    let links = service.list_links("user_a").await.unwrap();
    assert_eq!(ids(&links), vec![l2.id, l1.id]);
    assert_eq!(orders(&links), vec![0, 1]);

    // 删除后只剩一条
    service.delete_link("user_a", l1.id).await.unwrap();
    let links = service.list_links("user_a").await.unwrap();
    assert_eq!(ids(&links), vec![l2.id]);
}
