//! Behavioural coverage for the in-memory store.

use chrono::{NaiveDate, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::Username;

#[fixture]
fn store() -> InMemoryStore {
    InMemoryStore::new()
}

fn slug(value: &str) -> Slug {
    Slug::new(value).expect("valid slug")
}

fn new_note(value: &str, author: UserId) -> NewNote {
    NewNote {
        title: "Заголовок".to_owned(),
        text: "Текст".to_owned(),
        slug: slug(value),
        author,
    }
}

fn record(title: &str, date: NaiveDate) -> NewsRecord {
    NewsRecord {
        title: title.to_owned(),
        text: "Просто текст.".to_owned(),
        date,
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).expect("valid date")
}

#[rstest]
#[tokio::test]
async fn duplicate_usernames_are_rejected(store: InMemoryStore) {
    let username = Username::new("reader").expect("valid username");
    let first = NewUser {
        id: UserId::random(),
        username: username.clone(),
        password_hash: "hash".to_owned(),
    };
    UserRepository::create(&store, &first).await.expect("first insert");

    let second = NewUser {
        id: UserId::random(),
        ..first.clone()
    };
    let err = UserRepository::create(&store, &second)
        .await
        .expect_err("duplicate username");
    assert_eq!(err, UserPersistenceError::username_taken("reader"));

    let found = store
        .find_credentials("reader")
        .await
        .expect("lookup")
        .expect("user exists");
    assert_eq!(found.user.id(), first.id);
    assert_eq!(found.password_hash, "hash");
}

#[rstest]
#[tokio::test]
async fn note_slugs_are_unique(store: InMemoryStore) {
    let author = UserId::random();
    NoteRepository::insert(&store, &new_note("note-slug", author))
        .await
        .expect("insert");
    let err = NoteRepository::insert(&store, &new_note("note-slug", UserId::random()))
        .await
        .expect_err("duplicate slug");
    assert_eq!(err.kind(), "duplicate_slug");
    assert_eq!(NoteRepository::count(&store).await.expect("count"), 1);
}

#[rstest]
#[tokio::test]
async fn bulk_note_insert_is_all_or_nothing(store: InMemoryStore) {
    let author = UserId::random();
    let batch = vec![
        new_note("one", author),
        new_note("two", author),
        new_note("one", author),
    ];
    assert!(NoteRepository::bulk_insert(&store, &batch).await.is_err());
    assert_eq!(NoteRepository::count(&store).await.expect("count"), 0);

    let inserted = NoteRepository::bulk_insert(&store, &batch[..2])
        .await
        .expect("bulk insert");
    assert_eq!(inserted, 2);
}

#[rstest]
#[tokio::test]
async fn update_keeps_own_slug_but_refuses_foreign_one(store: InMemoryStore) {
    let author = UserId::random();
    let mut first = NoteRepository::insert(&store, &new_note("first", author))
        .await
        .expect("insert first");
    NoteRepository::insert(&store, &new_note("second", author))
        .await
        .expect("insert second");

    first.title = "Новый заголовок".to_owned();
    assert!(NoteRepository::update(&store, &first).await.expect("update"));

    first.slug = slug("second");
    let err = NoteRepository::update(&store, &first)
        .await
        .expect_err("slug clash");
    assert_eq!(err, NoteRepositoryError::duplicate_slug("second"));

    let stored = store
        .find_by_slug(&slug("first"))
        .await
        .expect("lookup")
        .expect("note exists");
    assert_eq!(stored.title, "Новый заголовок");
}

#[rstest]
#[tokio::test]
async fn notes_are_listed_per_author(store: InMemoryStore) {
    let author = UserId::random();
    let other = UserId::random();
    NoteRepository::insert(&store, &new_note("mine", author))
        .await
        .expect("insert");
    NoteRepository::insert(&store, &new_note("theirs", other))
        .await
        .expect("insert");

    let listed = store.list_by_author(&author).await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].slug, slug("mine"));
}

#[rstest]
#[tokio::test]
async fn latest_news_is_newest_first_and_capped(store: InMemoryStore) {
    let records: Vec<_> = (1..=5).map(|d| record(&format!("Новость {d}"), day(d))).collect();
    NewsRepository::bulk_insert(&store, &records)
        .await
        .expect("bulk insert");

    let listed = store.latest(3).await.expect("latest");
    let dates: Vec<_> = listed.iter().map(|news| news.date).collect();
    assert_eq!(dates, vec![day(5), day(4), day(3)]);
}

#[rstest]
#[tokio::test]
async fn same_day_news_ties_break_by_newest_id(store: InMemoryStore) {
    let first = NewsRepository::insert(&store, &record("Первая", day(1)))
        .await
        .expect("insert");
    let second = NewsRepository::insert(&store, &record("Вторая", day(1)))
        .await
        .expect("insert");

    let listed = store.latest(10).await.expect("latest");
    let ids: Vec<_> = listed.iter().map(|news| news.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[rstest]
#[tokio::test]
async fn comments_require_existing_news(store: InMemoryStore) {
    let err = CommentRepository::insert(
        &store,
        &NewComment {
            news: NewsId::new(42),
            author: UserId::random(),
            text: "Текст".to_owned(),
            created: Utc::now(),
        },
    )
    .await
    .expect_err("news is missing");
    assert_eq!(err, CommentRepositoryError::missing_news(42));
}

#[rstest]
#[tokio::test]
async fn comments_are_listed_oldest_first(store: InMemoryStore) {
    let news = NewsRepository::insert(&store, &record("Новость", day(1)))
        .await
        .expect("insert news");
    let author = UserId::random();
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().expect("valid time");
    for offset in [3_i64, 1, 2] {
        CommentRepository::insert(
            &store,
            &NewComment {
                news: news.id,
                author,
                text: format!("Текст {offset}"),
                created: base + chrono::Duration::days(offset),
            },
        )
        .await
        .expect("insert comment");
    }

    let listed = store.list_for_news(news.id).await.expect("list");
    let texts: Vec<_> = listed.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["Текст 1", "Текст 2", "Текст 3"]);
}

#[rstest]
#[tokio::test]
async fn comment_update_and_delete_report_presence(store: InMemoryStore) {
    let news = NewsRepository::insert(&store, &record("Новость", day(1)))
        .await
        .expect("insert news");
    let comment = CommentRepository::insert(
        &store,
        &NewComment {
            news: news.id,
            author: UserId::random(),
            text: "Текст".to_owned(),
            created: Utc::now(),
        },
    )
    .await
    .expect("insert comment");

    assert!(store.update_text(comment.id, "Новый текст").await.expect("update"));
    let stored = CommentRepository::find_by_id(&store, comment.id)
        .await
        .expect("lookup")
        .expect("comment exists");
    assert_eq!(stored.text, "Новый текст");

    assert!(CommentRepository::delete(&store, comment.id).await.expect("delete"));
    assert!(!CommentRepository::delete(&store, comment.id).await.expect("delete again"));
    assert!(!store.update_text(comment.id, "x").await.expect("update missing"));
    assert_eq!(CommentRepository::count(&store).await.expect("count"), 0);
}
