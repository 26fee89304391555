// tests/listing.rs

//! Paginated listing: rating order, nulls last, page windows.

mod common;

use common::{FIXTURES, ids, setup_recipe_db};
use cookbook::{Nutrients, db, query};
use std::collections::HashSet;

#[test]
fn test_first_page_in_rating_order() {
    let (_temp, db_path) = setup_recipe_db();
    let conn = db::open(&db_path).unwrap();

    let page = query::list(&conn, 1, 10).unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 10);
    assert_eq!(page.total, FIXTURES.len() as i64);

    // 4.8, 4.7, 4.6 (id 2), 4.6 (id 5), 4.2, 3.9, then the unrated rows
    assert_eq!(ids(&page.data), vec![1, 3, 2, 5, 8, 7, 4, 6]);
}

#[test]
fn test_unrated_never_precede_rated() {
    let (_temp, db_path) = setup_recipe_db();
    let conn = db::open(&db_path).unwrap();

    for limit in 1..=4 {
        let mut seen_unrated = false;
        let mut page_no = 1;
        loop {
            let page = query::list(&conn, page_no, limit).unwrap();
            if page.data.is_empty() {
                break;
            }
            for record in &page.data {
                if record.rating.is_none() {
                    seen_unrated = true;
                } else {
                    assert!(!seen_unrated, "rated row {} after an unrated one", record.id);
                }
            }
            page_no += 1;
        }
    }
}

#[test]
fn test_pages_cover_every_row_once() {
    let (_temp, db_path) = setup_recipe_db();
    let conn = db::open(&db_path).unwrap();

    let full = ids(&query::list(&conn, 1, 100).unwrap().data);

    for limit in 1..=9 {
        let mut collected = Vec::new();
        let mut page_no = 1;
        loop {
            let page = query::list(&conn, page_no, limit).unwrap();
            assert!(page.data.len() <= limit as usize);
            assert_eq!(page.total, 8);
            if page.data.is_empty() {
                break;
            }
            collected.extend(ids(&page.data));
            page_no += 1;
        }

        assert_eq!(collected, full, "limit {limit}");
        let unique: HashSet<_> = collected.iter().collect();
        assert_eq!(unique.len(), collected.len());
    }
}

#[test]
fn test_page_past_the_end_is_empty() {
    let (_temp, db_path) = setup_recipe_db();
    let conn = db::open(&db_path).unwrap();

    let page = query::list(&conn, 3, 4).unwrap();
    assert_eq!(page.total, 8);
    assert!(page.data.is_empty());
}

#[test]
fn test_listing_decodes_nutrients_per_row() {
    let (_temp, db_path) = setup_recipe_db();
    let conn = db::open(&db_path).unwrap();

    let page = query::list(&conn, 1, 10).unwrap();

    let pie = page.data.iter().find(|r| r.id == 1).unwrap();
    assert_eq!(pie.nutrients.text("calories").as_deref(), Some("389 kcal"));
    assert_eq!(pie.nutrients.text("fatContent").as_deref(), Some("21 g"));

    let casserole = page.data.iter().find(|r| r.id == 6).unwrap();
    assert_eq!(casserole.nutrients, Nutrients::default());
}

#[test]
fn test_empty_store() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("empty.db");
    db::init(&db_path).unwrap();
    let conn = db::open(&db_path).unwrap();

    let page = query::list(&conn, 1, 10).unwrap();
    assert_eq!(page.total, 0);
    assert!(page.data.is_empty());
}
