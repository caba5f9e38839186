//! End-to-end pagination scenarios.
//!
//! Each test drives the engine the way a web host would: build a request
//! target from a URL, paginate, follow one of the generated links.

use hybrid_page::prelude::*;
use serde_json::{Value as Json, json};

const PER_PAGE: usize = 10;

fn users(count: i64) -> MemorySource<Json> {
    let rows = (1..=count).map(|id| json!({"id": id, "name": format!("user {id}")}));
    MemorySource::new(rows, vec![SortField::new("id", SortDir::Asc)]).unwrap()
}

fn visit(source: &mut MemorySource<Json>, url: &str) -> HybridPaginator<Json> {
    source
        .hybrid_paginate(
            PaginateArgs::new().per_page(PER_PAGE),
            &RequestTarget::parse(url),
        )
        .unwrap()
}

fn ids(page: &HybridPaginator<Json>) -> Vec<i64> {
    page.iter().filter_map(|row| row["id"].as_i64()).collect()
}

fn url_for(page: &HybridPaginator<Json>, target: u64) -> String {
    page.get_url_range(target, target)
        .pop()
        .map(|(_, url)| url)
        .unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn first_page() {
    let mut source = users(25);
    let page = visit(&mut source, "/users");

    assert_eq!(page.total(), Some(25));
    assert_eq!(page.last_page(), Some(3));
    assert!(page.has_more_pages());
    assert_eq!(page.previous_page_url(), None);
    assert!(page.next_page_url().is_some());
    assert_eq!(ids(&page), (1..=10).collect::<Vec<_>>());
}

#[test]
fn discontinuous_jump_backward() {
    let mut source = users(25);
    let third = visit(&mut source, "/users?page=3");
    assert_eq!(ids(&third), (21..=25).collect::<Vec<_>>());

    let anchor = third.previous_cursor().unwrap();
    let plan = FetchPlan::new(1, Some(3), Some(&anchor), PER_PAGE);
    assert_eq!(plan.strategy(), Strategy::CursorWithOffset { offset: 10 });

    let first = visit(&mut source, &url_for(&third, 1));
    assert_eq!(first.current_page(), 1);
    assert_eq!(first.prev_page(), Some(3));
    assert_eq!(ids(&first), (1..=10).collect::<Vec<_>>());
}

#[test]
fn discontinuous_jump_forward() {
    let mut source = users(100);
    let first = visit(&mut source, "/users");
    let seventh = visit(&mut source, &url_for(&first, 7));

    assert_eq!(seventh.current_page(), 7);
    assert_eq!(ids(&seventh), (61..=70).collect::<Vec<_>>());
}

#[test]
fn malformed_cursor_is_ignored() {
    assert_eq!(Cursor::from_encoded("this is not a cursor"), None);

    let mut source = users(25);
    let page = visit(&mut source, "/users?page=2&prev=1&cursor=not-a-cursor");

    assert!(page.cursor().is_none());
    assert_eq!(ids(&page), (11..=20).collect::<Vec<_>>());
}

#[test]
fn last_page_has_no_next_url() {
    let mut source = users(25);
    let second = visit(&mut source, "/users?page=2");
    let third = visit(&mut source, &second.next_page_url().unwrap());

    assert_eq!(third.current_page(), 3);
    assert!(!third.has_more_pages());
    assert_eq!(third.next_page_url(), None);
    assert!(third.previous_page_url().is_some());
}

#[test]
fn last_page_reached_backward_has_no_next_url() {
    let mut source = users(30);
    let args = PaginateArgs::new()
        .per_page(PER_PAGE)
        .page(3)
        .prev_page(4)
        .cursor(Cursor::backward().int("id", 31));
    let third = source.hybrid_paginate(args, &RequestTarget::parse("/users")).unwrap();

    assert_eq!(ids(&third), (21..=30).collect::<Vec<_>>());
    assert!(third.next_cursor().is_some());
    assert!(!third.has_more_pages());
    assert_eq!(third.next_page_url(), None);
}

// =============================================================================
// Navigation
// =============================================================================

#[test]
fn walking_forward_visits_every_row_once() {
    let mut source = users(47);
    let mut page = visit(&mut source, "/users");
    let mut seen = ids(&page);

    while let Some(next) = page.next_page_url() {
        page = visit(&mut source, &next);
        seen.extend(ids(&page));
    }

    assert_eq!(page.current_page(), 5);
    assert_eq!(seen, (1..=47).collect::<Vec<_>>());
}

#[test]
fn walking_backward_keeps_ascending_order() {
    let mut source = users(50);
    let fifth = visit(&mut source, "/users?page=5");
    let fourth = visit(&mut source, &fifth.previous_page_url().unwrap());
    let third = visit(&mut source, &fourth.previous_page_url().unwrap());

    assert_eq!(ids(&fourth), (31..=40).collect::<Vec<_>>());
    assert_eq!(ids(&third), (21..=30).collect::<Vec<_>>());
    assert!(third.cursor().is_some_and(Cursor::points_to_previous_items));
    // arrived backward: the page after this one is still reachable
    assert!(third.next_cursor().is_some());
}

#[test]
fn inserts_before_the_anchor_do_not_shift_the_next_page() {
    let mut source = users(30);
    let first = visit(&mut source, "/users");
    let next = first.next_page_url().unwrap();

    for id in [-3, -2, -1] {
        source.insert(json!({"id": id, "name": "late"})).unwrap();
    }

    let second = visit(&mut source, &next);
    assert_eq!(ids(&second), (11..=20).collect::<Vec<_>>());
    assert_eq!(second.total(), Some(33));
}

#[test]
fn deletes_before_the_anchor_do_not_shift_the_next_page() {
    let mut source = users(30);
    let second = visit(&mut source, "/users?page=2");
    let next = second.next_page_url().unwrap();

    source.remove_where(|row| row["id"].as_i64().is_some_and(|id| id <= 5));

    let third = visit(&mut source, &next);
    assert_eq!(ids(&third), (21..=30).collect::<Vec<_>>());
}

#[test]
fn descending_order_across_two_keys() {
    let rows = (1..=30).map(|id| json!({"id": id, "score": id % 3}));
    let order = SortField::parse_sort_string("-score,id", &["score", "id"]).unwrap();
    let mut source = MemorySource::new(rows, order).unwrap();

    let first = visit(&mut source, "/scores");
    let second = visit(&mut source, &first.next_page_url().unwrap());

    let expected: Vec<i64> = (1..=30)
        .filter(|id| id % 3 == 2)
        .chain((1..=30).filter(|id| id % 3 == 1))
        .chain((1..=30).filter(|id| id % 3 == 0))
        .collect();
    assert_eq!(ids(&first), expected[..10]);
    assert_eq!(ids(&second), expected[10..20]);
    assert_eq!(
        second.next_cursor().map(|cursor| cursor.keys().map(str::to_string).collect::<Vec<_>>()),
        Some(vec!["score".to_string(), "id".to_string()])
    );
}

#[test]
fn query_string_survives_navigation() {
    let mut source = users(30);
    let first = visit(&mut source, "/users?filter=active&page=1")
        .with_query_string(&RequestTarget::parse("/users?filter=active&page=1"));

    let next = first.next_page_url().unwrap();
    assert!(next.starts_with("/users?filter=active&page=2&prev=1&cursor="));
}

#[test]
fn rendered_links() {
    let mut source = users(200);
    let page = visit(&mut source, "/users?page=2");

    let rendered = page.render(&|view: View<'_, Json>| {
        view.elements
            .iter()
            .map(|element| match element {
                Element::Pages(pages) => pages
                    .iter()
                    .map(|(number, _)| {
                        if *number == view.paginator.current_page() {
                            format!("[{number}]")
                        } else {
                            number.to_string()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" "),
                Element::Ellipsis => "...".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    });

    insta::assert_snapshot!(rendered, @"1 [2] 3 4 5 6 7 8 9 10 ... 19 20");
}

#[test]
fn json_response() {
    let mut source = users(25);
    let page = visit(&mut source, "/users?page=3");
    let value = page.to_value().unwrap();

    assert_eq!(value["current_page"], 3);
    assert_eq!(value["from"], 21);
    assert_eq!(value["to"], 25);
    assert_eq!(value["last_page_url"], "/users?page=3&prev=3");
    assert_eq!(value["next_page_url"], Json::Null);
    assert_eq!(value["links"].as_array().map(Vec::len), Some(5));
}
