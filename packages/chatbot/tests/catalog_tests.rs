//! Integration tests for the catalog store.

mod common;

use crate::common::*;
use chatbot_core::domains::catalog::{CatalogError, CatalogStore, CATEGORIES};
use std::collections::BTreeSet;
use test_context::test_context;

fn set(urls: &[&str]) -> BTreeSet<String> {
    urls.iter().map(|u| u.to_string()).collect()
}

#[test_context(TestHarness)]
#[tokio::test]
async fn same_url_in_two_categories(ctx: &TestHarness) {
    let store = &ctx.catalog;

    let first = store
        .add_resource("https://example.com/a", "crypto")
        .await
        .unwrap();
    assert_eq!(first.get(), 1);

    let duplicate = store.add_resource("https://example.com/a", "crypto").await;
    assert!(matches!(duplicate, Err(CatalogError::DuplicateResource { .. })));

    let second = store
        .add_resource("https://example.com/a", "pwn")
        .await
        .unwrap();
    assert_eq!(second.get(), 2);

    let all = store.list_all_resources().await.unwrap();
    let named: Vec<(String, BTreeSet<String>)> = {
        let mut named = Vec::new();
        for (id, urls) in all {
            named.push((store.resolve_category_name(id).await.unwrap().unwrap(), urls));
        }
        named
    };
    assert_eq!(
        named,
        vec![
            ("crypto".to_string(), set(&["https://example.com/a"])),
            ("pwn".to_string(), set(&["https://example.com/a"])),
        ]
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn listing_ignores_insertion_order(ctx: &TestHarness) {
    let store = &ctx.catalog;
    store.add_resource("https://r2.example", "forensics").await.unwrap();
    store.add_resource("https://r1.example", "forensics").await.unwrap();

    let listed: BTreeSet<String> = store
        .list_resources_by_category("forensics")
        .await
        .unwrap()
        .into_iter()
        .collect();

    assert_eq!(listed, set(&["https://r1.example", "https://r2.example"]));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn racing_identical_inserts_admit_one(ctx: &TestHarness) {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = ctx.catalog.clone();
            tokio::spawn(async move { store.add_resource("https://race.example", "web").await })
        })
        .collect();

    let mut added = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => added += 1,
            Err(CatalogError::DuplicateResource { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(added, 1);
    assert_eq!(
        ctx.catalog.list_resources_by_category("web").await.unwrap(),
        vec!["https://race.example".to_string()]
    );
}

#[tokio::test]
async fn file_catalog_survives_reopen() {
    let dir = std::env::temp_dir().join(format!("chatbot-catalog-{}", std::process::id()));
    let path = dir.join("nested").join("resources.db");
    let _ = std::fs::remove_dir_all(&dir);

    {
        let store = CatalogStore::connect(&path).await.unwrap();
        store.add_resource("https://kept.example", "osint").await.unwrap();
        store.pool().close().await;
    }

    let reopened = CatalogStore::connect(&path).await.unwrap();
    let categories: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(reopened.pool())
        .await
        .unwrap();
    assert_eq!(categories, CATEGORIES.len() as i64);
    assert_eq!(
        reopened.list_resources_by_category("osint").await.unwrap(),
        vec!["https://kept.example".to_string()]
    );

    let again = reopened.add_resource("https://kept.example", "osint").await;
    assert!(matches!(again, Err(CatalogError::DuplicateResource { .. })));

    reopened.pool().close().await;
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn legacy_duplicate_category_names_resolve_to_lowest_id() {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    // Layout written by the previous bot, which re-seeded on every start
    sqlx::query(
        r#"
        CREATE TABLE categories (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
        CREATE TABLE resources (
            id INTEGER PRIMARY KEY,
            url TEXT NOT NULL,
            category_id INTEGER REFERENCES categories(id)
        );
        INSERT INTO categories (name) VALUES ('crypto'), ('web'), ('crypto');
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let store = CatalogStore::from_pool(pool).await.unwrap();

    let crypto = store.resolve_category_id("crypto").await.unwrap().unwrap();
    assert_eq!(crypto.get(), 1);

    store.add_resource("https://legacy.example", "crypto").await.unwrap();
    let again = store.add_resource("https://legacy.example", "crypto").await;
    assert!(matches!(again, Err(CatalogError::DuplicateResource { .. })));
}
