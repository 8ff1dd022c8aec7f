use proptest::prelude::*;
use rust_decimal::Decimal;
use time::macros::{date, datetime};

use bookshop_app::modules::catalog::{query_books, BookQuery};
use bookshop_db::models::{Author, Book, BookEntry, Category};

fn author(id: i32) -> Author {
    Author {
        id,
        first_name: format!("First{}", id),
        last_name: format!("Last{}", id),
        biography: None,
        active: true,
        created_at: datetime!(2024-01-01 0:00 UTC),
        modified_at: datetime!(2024-01-01 0:00 UTC),
    }
}

fn category(id: i32) -> Category {
    Category {
        id,
        name: format!("Category{}", id),
        description: None,
        active: true,
        created_at: datetime!(2024-01-01 0:00 UTC),
        modified_at: datetime!(2024-01-01 0:00 UTC),
    }
}

/// (title, active, author id, category id) per book; ids follow position
fn build(rows: Vec<(String, bool, i32, i32)>) -> Vec<BookEntry> {
    rows.into_iter()
        .zip(1..)
        .map(|((title, active, author_id, category_id), id)| BookEntry {
            book: Book {
                id,
                title,
                isbn: format!("isbn-{}", id),
                description: None,
                price: Decimal::new(999, 2),
                stock_quantity: 1,
                publication_date: date!(2020 - 01 - 01),
                image_url: None,
                active,
                author_id,
                category_id,
                created_at: datetime!(2024-01-01 0:00 UTC),
                modified_at: datetime!(2024-01-01 0:00 UTC),
            },
            author: Some(author(author_id)),
            category: Some(category(category_id)),
        })
        .collect()
}

fn catalog() -> impl Strategy<Value = Vec<BookEntry>> {
    prop::collection::vec(
        ("[a-c]{1,3}", any::<bool>(), 1..4i32, 1..4i32),
        0..40,
    )
    .prop_map(build)
}

fn query() -> impl Strategy<Value = BookQuery> {
    (
        prop::option::of(1..4i32),
        prop::option::of(1..4i32),
        prop::option::of(prop_oneof!["[a-c]{1,2}", " ", "LAST1", "category2"]),
    )
        .prop_map(|(category_id, author_id, search_term)| BookQuery {
            category_id,
            author_id,
            search_term,
            page: 1,
            page_size: 10,
        })
}

fn ids(entries: &[BookEntry]) -> Vec<i32> {
    entries.iter().map(|entry| entry.book.id).collect()
}

proptest! {
    #[test]
    fn inactive_books_never_match(entries in catalog(), filters in query(), page in 1..5i32, page_size in 1..8i32) {
        let request = BookQuery { page, page_size, ..filters };
        let result = query_books(entries, &request).unwrap();
        prop_assert!(result.items.iter().all(|entry| entry.book.active));
    }

    #[test]
    fn total_count_ignores_paging(entries in catalog(), filters in query(), page in 1..6i32, page_size in 1..8i32) {
        let everything = query_books(entries.clone(), &BookQuery { page: 1, page_size: 1000, ..filters.clone() }).unwrap();
        let one_page = query_books(entries, &BookQuery { page, page_size, ..filters }).unwrap();

        prop_assert_eq!(one_page.total_count, everything.total_count);
        prop_assert_eq!(everything.items.len(), everything.total_count);
    }

    #[test]
    fn pages_partition_the_sorted_result(entries in catalog(), filters in query(), page_size in 1..8i32) {
        let everything = query_books(entries.clone(), &BookQuery { page: 1, page_size: 1000, ..filters.clone() }).unwrap();
        let first = query_books(entries.clone(), &BookQuery { page: 1, page_size, ..filters.clone() }).unwrap();
        let total_pages = first.paging().total_pages();

        let mut stitched = Vec::new();
        for page in 1..=total_pages {
            let page = i32::try_from(page).unwrap();
            let result = query_books(entries.clone(), &BookQuery { page, page_size, ..filters.clone() }).unwrap();
            prop_assert!(!result.items.is_empty());
            stitched.extend(result.items);
        }

        prop_assert_eq!(ids(&stitched), ids(&everything.items));

        let sorted = everything.items.windows(2).all(|pair| {
            (&pair[0].book.title, pair[0].book.id) < (&pair[1].book.title, pair[1].book.id)
        });
        prop_assert!(sorted);
    }

    #[test]
    fn pages_past_the_end_are_empty(entries in catalog(), filters in query(), page_size in 1..8i32, beyond in 1..4i32) {
        let first = query_books(entries.clone(), &BookQuery { page: 1, page_size, ..filters.clone() }).unwrap();
        let total_pages = i32::try_from(first.paging().total_pages()).unwrap();

        let past = query_books(entries, &BookQuery { page: total_pages + beyond, page_size, ..filters }).unwrap();
        prop_assert!(past.items.is_empty());
        prop_assert_eq!(past.total_count, first.total_count);
    }
}
