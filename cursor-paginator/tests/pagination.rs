//! End-to-end pagination over an in-memory post/author collection.

use cursor_paginator::{
    CursorCodec, CursorError, DEFAULT_MAX_CURSOR_LEN, Error, Field, MemoryError, MemorySource,
    OrderingSpec, Page, PageRequest, Paginator, PaginatorConfig, Position, Record,
};

const NOW: i64 = 1_700_000_000;
const HOUR: i64 = 3600;

#[derive(Debug, Clone, PartialEq)]
struct Author {
    id: i64,
    name: String,
    age: Option<i64>,
    created: i64,
}

#[derive(Debug, Clone, PartialEq)]
struct Post {
    id: i64,
    name: String,
    created: i64,
    author: Option<Author>,
}

impl Record for Author {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "id" => Some(Field::Value(self.id.into())),
            "name" => Some(Field::Value(self.name.as_str().into())),
            "age" => Some(Field::Value(self.age.into())),
            "created" => Some(Field::Value(self.created.into())),
            _ => None,
        }
    }
}

impl Record for Post {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "id" => Some(Field::Value(self.id.into())),
            "name" => Some(Field::Value(self.name.as_str().into())),
            "created" => Some(Field::Value(self.created.into())),
            "author" => self
                .author
                .as_ref()
                .map(|author| Field::Related(author as &dyn Record)),
            _ => None,
        }
    }
}

fn author(id: i64, name: &str, age: Option<i64>, created: i64) -> Author {
    Author {
        id,
        name: name.to_string(),
        age,
        created,
    }
}

fn post(id: i64, name: &str, created: i64, author: Option<Author>) -> Post {
    Post {
        id,
        name: name.to_string(),
        created,
        author,
    }
}

fn ids<T: HasId>(items: &[T]) -> Vec<i64> {
    items.iter().map(HasId::id).collect()
}

trait HasId {
    fn id(&self) -> i64;
}

impl HasId for Post {
    fn id(&self) -> i64 {
        self.id
    }
}

impl HasId for Author {
    fn id(&self) -> i64 {
        self.id
    }
}

fn assert_page<T: HasId>(page: &Page<T>, expected: &[i64], has_next: bool, has_previous: bool) {
    assert_eq!(ids(page), expected, "page items");
    assert_eq!(page.has_next(), has_next, "has_next");
    assert_eq!(page.has_previous(), has_previous, "has_previous");
}

/// Twenty posts, post `i` created `i` hours before `NOW`; ids are `i`.
fn hourly_posts() -> Paginator<MemorySource<Post>> {
    let posts = (0..20)
        .map(|i| post(i, &format!("Name {i}"), NOW - i * HOUR, None))
        .collect();
    Paginator::try_new(MemorySource::new(posts), &["-created"]).unwrap()
}

// =============================================================================
// No arguments
// =============================================================================

mod no_args {
    use super::*;

    #[test]
    fn empty() {
        let paginator = Paginator::try_new(MemorySource::<Post>::default(), &["id"]).unwrap();
        let page = paginator.page(PageRequest::new()).unwrap();
        assert_page(&page, &[], false, false);
    }

    #[tokio::test]
    async fn async_empty() {
        let paginator = Paginator::try_new(MemorySource::<Post>::default(), &["id"]).unwrap();
        let page = paginator.page_async(PageRequest::new()).await.unwrap();
        assert_page(&page, &[], false, false);
    }

    #[test]
    fn with_items() {
        let posts: MemorySource<Post> = (0..20)
            .map(|i| post(i, &format!("Name {i}"), NOW, None))
            .collect();
        let paginator = Paginator::try_new(posts, &["id"]).unwrap();
        let page = paginator.page(PageRequest::new()).unwrap();
        assert_eq!(page.len(), 20);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn nulls_last_despite_descending_key() {
        let authors = MemorySource::new(vec![
            author(1, "Alice", Some(30), NOW),
            author(2, "Bob", None, NOW),
            author(3, "Carol", None, NOW),
            author(4, "Dave", Some(40), NOW),
        ]);
        let paginator = Paginator::try_new(authors, &["-age", "id"]).unwrap();
        let page = paginator.page(PageRequest::new()).unwrap();
        assert_page(&page, &[4, 1, 2, 3], false, false);
    }
}

// =============================================================================
// Forward pagination
// =============================================================================

mod forward {
    use super::*;

    #[test]
    fn first_page_zero() {
        let page = hourly_posts().page(PageRequest::new().first(0)).unwrap();
        assert_page(&page, &[], true, false);
    }

    #[test]
    fn first_page() {
        let page = hourly_posts().page(PageRequest::new().first(2)).unwrap();
        assert_page(&page, &[0, 1], true, false);
    }

    #[tokio::test]
    async fn async_first_page() {
        let page = hourly_posts()
            .page_async(PageRequest::new().first(2))
            .await
            .unwrap();
        assert_page(&page, &[0, 1], true, false);
    }

    #[test]
    fn second_page() {
        let paginator = hourly_posts();
        let previous = paginator.page(PageRequest::new().first(2)).unwrap();
        let cursor = paginator.cursor(previous.last().unwrap()).unwrap();
        let page = paginator.page(PageRequest::new().first(2).after(cursor)).unwrap();
        assert_page(&page, &[2, 3], true, true);
    }

    #[tokio::test]
    async fn async_second_page() {
        let paginator = hourly_posts();
        let previous = paginator
            .page_async(PageRequest::new().first(2))
            .await
            .unwrap();
        let cursor = paginator.cursor(previous.last().unwrap()).unwrap();
        let page = paginator
            .page_async(PageRequest::new().first(2).after(cursor))
            .await
            .unwrap();
        assert_page(&page, &[2, 3], true, true);
    }

    #[test]
    fn last_page() {
        let paginator = hourly_posts();
        let previous = paginator.page(PageRequest::new().first(18)).unwrap();
        let cursor = paginator.cursor(previous.last().unwrap()).unwrap();
        let page = paginator.page(PageRequest::new().first(2).after(cursor)).unwrap();
        assert_page(&page, &[18, 19], false, true);
    }

    #[test]
    fn incomplete_last_page() {
        let paginator = hourly_posts();
        let previous = paginator.page(PageRequest::new().first(18)).unwrap();
        let cursor = paginator.cursor(previous.last().unwrap()).unwrap();
        let page = paginator
            .page(PageRequest::new().first(100).after(cursor))
            .unwrap();
        assert_page(&page, &[18, 19], false, true);
    }

    #[test]
    fn three_posts_by_newest() {
        let posts = MemorySource::new(vec![
            post(1, "one", NOW - 2 * HOUR, None),
            post(2, "two", NOW - HOUR, None),
            post(3, "three", NOW, None),
        ]);
        let paginator = Paginator::try_new(posts, &["-created"]).unwrap();

        let page = paginator.page(PageRequest::new().first(2)).unwrap();
        assert_page(&page, &[3, 2], true, false);

        let cursor = paginator.cursor(&page[1]).unwrap();
        let page = paginator.page(PageRequest::new().first(2).after(cursor)).unwrap();
        assert_page(&page, &[1], false, true);
    }
}

// =============================================================================
// Backward pagination
// =============================================================================

mod backward {
    use super::*;

    #[test]
    fn first_page_zero() {
        let page = hourly_posts().page(PageRequest::new().last(0)).unwrap();
        assert_page(&page, &[], false, true);
    }

    #[test]
    fn first_page() {
        let page = hourly_posts().page(PageRequest::new().last(2)).unwrap();
        assert_page(&page, &[18, 19], false, true);
    }

    #[tokio::test]
    async fn async_first_page() {
        let page = hourly_posts()
            .page_async(PageRequest::new().last(2))
            .await
            .unwrap();
        assert_page(&page, &[18, 19], false, true);
    }

    #[test]
    fn second_page() {
        let paginator = hourly_posts();
        let previous = paginator.page(PageRequest::new().last(2)).unwrap();
        let cursor = paginator.cursor(previous.first().unwrap()).unwrap();
        let page = paginator.page(PageRequest::new().last(2).before(cursor)).unwrap();
        assert_page(&page, &[16, 17], true, true);
    }

    #[test]
    fn last_page() {
        let paginator = hourly_posts();
        let previous = paginator.page(PageRequest::new().last(18)).unwrap();
        let cursor = paginator.cursor(previous.first().unwrap()).unwrap();
        let page = paginator.page(PageRequest::new().last(2).before(cursor)).unwrap();
        assert_page(&page, &[0, 1], true, false);
    }

    #[tokio::test]
    async fn async_incomplete_last_page() {
        let paginator = hourly_posts();
        let previous = paginator
            .page_async(PageRequest::new().last(18))
            .await
            .unwrap();
        let cursor = paginator.cursor(previous.first().unwrap()).unwrap();
        let page = paginator
            .page_async(PageRequest::new().last(100).before(cursor))
            .await
            .unwrap();
        assert_page(&page, &[0, 1], true, false);
    }

    #[test]
    fn between_two_cursors() {
        let paginator = hourly_posts();
        let all = paginator.page(PageRequest::new()).unwrap();
        let after = paginator.cursor(&all[3]).unwrap();
        let before = paginator.cursor(&all[9]).unwrap();

        let page = paginator
            .page(PageRequest::new().first(10).after(after.clone()).before(before.clone()))
            .unwrap();
        assert_page(&page, &[4, 5, 6, 7, 8], false, true);

        let page = paginator
            .page(PageRequest::new().last(2).after(after).before(before))
            .unwrap();
        assert_page(&page, &[7, 8], true, true);
    }
}

// =============================================================================
// Multi-key orderings
// =============================================================================

mod two_fields {
    use super::*;

    fn posts() -> MemorySource<Post> {
        MemorySource::new(vec![
            post(0, "B 横浜市", NOW, None),
            post(1, "C", NOW, None),
            post(2, "D 横浜市", NOW, None),
            post(3, "A", NOW + HOUR, None),
        ])
    }

    fn walk(ordering: &[&str]) -> (Vec<i64>, Vec<i64>) {
        let paginator = Paginator::try_new(posts(), ordering).unwrap();
        let first = paginator.page(PageRequest::new().first(2)).unwrap();
        let cursor = paginator.cursor(first.last().unwrap()).unwrap();
        let second = paginator.page(PageRequest::new().first(2).after(cursor)).unwrap();
        (ids(&first), ids(&second))
    }

    #[test]
    fn ascending() {
        assert_eq!(walk(&["created", "name"]), (vec![0, 1], vec![2, 3]));
    }

    #[test]
    fn descending() {
        assert_eq!(walk(&["-created", "-name"]), (vec![3, 2], vec![1, 0]));
    }

    #[test]
    fn mixed() {
        assert_eq!(walk(&["created", "-name"]), (vec![2, 1], vec![0, 3]));
    }
}

// =============================================================================
// Relations
// =============================================================================

mod relations {
    use super::*;

    /// Odd posts belong to `odd`, even posts to `even`.
    fn posts(odd: &Author, even: &Author) -> MemorySource<Post> {
        (0..20)
            .map(|i| {
                let author = if i % 2 == 1 { odd } else { even };
                post(i, &format!("Name {i:02}"), NOW, Some(author.clone()))
            })
            .collect()
    }

    #[test]
    fn order_by_related_name() {
        let source = posts(&author(1, "Ana", None, NOW), &author(2, "Bob", None, NOW));
        let paginator = Paginator::try_new(source, &["author.name", "name"]).unwrap();

        let page = paginator.page(PageRequest::new().first(2)).unwrap();
        assert_eq!(ids(&page), [1, 3]);

        let cursor = paginator.cursor(&paginator.source().items()[17]).unwrap();
        let page = paginator.page(PageRequest::new().first(2).after(cursor)).unwrap();
        assert_eq!(ids(&page), [19, 0]);
    }

    #[test]
    fn order_by_nullable_related_age() {
        let source = posts(&author(1, "Ana", Some(25), NOW), &author(2, "Bob", None, NOW));
        let paginator = Paginator::try_new(source, &["author->age", "name"]).unwrap();

        let page = paginator.page(PageRequest::new().first(2)).unwrap();
        assert_eq!(ids(&page), [1, 3]);

        let cursor = paginator.cursor(&paginator.source().items()[17]).unwrap();
        let page = paginator.page(PageRequest::new().first(2).after(cursor)).unwrap();
        assert_eq!(ids(&page), [19, 0]);
    }

    #[test]
    fn missing_relation_sorts_as_null() {
        let ana = author(1, "Ana", Some(25), NOW);
        let source = MemorySource::new(vec![
            post(1, "orphan", NOW, None),
            post(2, "b", NOW, Some(ana.clone())),
            post(3, "a", NOW, Some(ana)),
        ]);
        let paginator = Paginator::try_new(source, &["-author.name", "id"]).unwrap();

        let page = paginator.page(PageRequest::new().first(2)).unwrap();
        assert_page(&page, &[2, 3], true, false);

        let info = paginator.page_info(&page).unwrap();
        let page = paginator
            .page(PageRequest::new().first(2).after(info.end_cursor.unwrap()))
            .unwrap();
        assert_page(&page, &[1], false, true);
    }
}

// =============================================================================
// NULL values in the primary key
// =============================================================================

mod nullable {
    use super::*;

    /// Canonical order under `(-age, -created)` is `[1, 0, 2, 3, 4, 5, 6]`.
    fn paginator() -> Paginator<MemorySource<Author>> {
        let mut authors = Vec::new();
        for i in 0..2 {
            authors.push(author(i, &format!("Name {i}"), Some(i + 20), NOW - i * HOUR));
        }
        for i in 0..5 {
            authors.push(author(i + 2, &format!("NameNull {}", i + 2), None, NOW - i * HOUR));
        }
        Paginator::try_new(MemorySource::new(authors), &["-age", "-created"]).unwrap()
    }

    #[test]
    fn forward_first_page() {
        let page = paginator().page(PageRequest::new().first(3)).unwrap();
        assert_page(&page, &[1, 0, 2], true, false);
    }

    #[test]
    fn forward_second_page() {
        let paginator = paginator();
        let previous = paginator.page(PageRequest::new().first(3)).unwrap();
        let cursor = paginator.cursor(previous.last().unwrap()).unwrap();
        let page = paginator.page(PageRequest::new().first(2).after(cursor)).unwrap();
        assert_page(&page, &[3, 4], true, true);
    }

    #[test]
    fn forward_last_page() {
        let paginator = paginator();
        let previous = paginator.page(PageRequest::new().first(5)).unwrap();
        let cursor = paginator.cursor(previous.last().unwrap()).unwrap();
        let page = paginator.page(PageRequest::new().first(10).after(cursor)).unwrap();
        assert_page(&page, &[5, 6], false, true);
    }

    #[test]
    fn backward_first_page() {
        let page = paginator().page(PageRequest::new().last(2)).unwrap();
        assert_page(&page, &[5, 6], false, true);
    }

    #[test]
    fn backward_second_page() {
        let paginator = paginator();
        let previous = paginator.page(PageRequest::new().last(2)).unwrap();
        let cursor = paginator.cursor(previous.first().unwrap()).unwrap();
        let page = paginator.page(PageRequest::new().last(4).before(cursor)).unwrap();
        assert_page(&page, &[0, 2, 3, 4], true, true);
    }

    #[test]
    fn backward_last_page() {
        let paginator = paginator();
        let previous = paginator.page(PageRequest::new().last(6)).unwrap();
        let cursor = paginator.cursor(previous.first().unwrap()).unwrap();
        let page = paginator.page(PageRequest::new().last(10).before(cursor)).unwrap();
        assert_page(&page, &[1], true, false);
    }
}

// =============================================================================
// Errors
// =============================================================================

mod errors {
    use super::*;

    #[test]
    fn first_and_last_are_exclusive() {
        let err = hourly_posts()
            .page(PageRequest::new().first(2).last(2))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn tampered_cursor() {
        let paginator = hourly_posts();
        let mut token = paginator
            .cursor(&paginator.source().items()[3])
            .unwrap()
            .into_string();
        token.push('!');

        let err = paginator
            .page(PageRequest::new().first(2).after(token))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCursor(CursorError::InvalidBase64)));
    }

    #[test]
    fn truncated_cursor() {
        let paginator = hourly_posts();
        let token = paginator
            .cursor(&paginator.source().items()[3])
            .unwrap()
            .into_string();

        let err = paginator
            .page(PageRequest::new().first(2).after(&token[..4]))
            .unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn cursor_from_another_ordering() {
        let paginator = hourly_posts();
        let other = OrderingSpec::parse(&["created"]).unwrap();
        let token = CursorCodec::new(&other)
            .encode(&Position::new(vec![Some(NOW.to_string())]))
            .unwrap();

        let err = paginator
            .page(PageRequest::new().first(2).before(token))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCursor(CursorError::OrderingMismatch)));
    }

    #[test]
    fn cursor_with_wrong_element_count() {
        let paginator = hourly_posts();
        let token = CursorCodec::new(paginator.ordering())
            .encode(&Position::new(vec![
                Some(NOW.to_string()),
                Some("7".to_string()),
            ]))
            .unwrap();

        let err = paginator
            .page(PageRequest::new().first(2).after(token))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidCursor(CursorError::FieldCount { expected: 1, found: 2 })
        ));
    }

    #[test]
    fn uncomparable_cursor_value_is_a_source_error() {
        let paginator = hourly_posts();
        let token = CursorCodec::new(paginator.ordering())
            .encode(&Position::new(vec![Some("yesterday".to_string())]))
            .unwrap();

        let err = paginator
            .page(PageRequest::new().first(2).after(token))
            .unwrap_err();
        assert!(err.is_source_error());

        let Error::Source(source) = err else {
            panic!("expected a source error");
        };
        assert!(matches!(
            source.downcast_ref::<MemoryError>(),
            Some(MemoryError::Coercion(e)) if e.field == "created"
        ));
    }

    /// Three posts whose names alone overflow the default cursor limit.
    fn long_named_posts() -> MemorySource<Post> {
        (1..=3)
            .map(|i| post(i, &format!("{i}{}", "x".repeat(3100)), NOW, None))
            .collect()
    }

    #[test]
    fn oversized_key_values_fail_when_minting() {
        let paginator = Paginator::try_new(long_named_posts(), &["name", "id"]).unwrap();
        let page = paginator.page(PageRequest::new().first(1)).unwrap();
        assert_page(&page, &[1], true, false);

        let err = paginator.cursor(&page[0]).unwrap_err();
        assert!(matches!(err, Error::InvalidCursor(CursorError::TooLarge)));
        assert!(paginator.page_info(&page).is_err());
    }

    #[test]
    fn raised_cursor_limit_round_trips_long_keys() {
        let config = PaginatorConfig::new().with_max_cursor_len(4 * DEFAULT_MAX_CURSOR_LEN);
        let paginator = Paginator::try_new(long_named_posts(), &["name", "id"])
            .unwrap()
            .with_config(config);

        let page = paginator.page(PageRequest::new().first(1)).unwrap();
        let cursor = paginator.cursor(&page[0]).unwrap();
        assert!(cursor.as_str().len() > DEFAULT_MAX_CURSOR_LEN);
        assert_eq!(
            paginator.decode_cursor(cursor.as_str()).unwrap(),
            paginator.position(&page[0])
        );

        let page = paginator
            .page(PageRequest::new().first(1).after(cursor))
            .unwrap();
        assert_page(&page, &[2], true, true);
    }
}
