//! What the news pages render: home page size and order, comment order,
//! and the comment form.

#[expect(dead_code, reason = "Shared helpers include functions used only by other suites.")]
#[path = "support/pages.rs"]
mod pages;

use actix_web::test;
use noticeboard::domain::{NEWS_COUNT_ON_HOME_PAGE, NewsSettings};
use noticeboard::test_support::{TEST_PASSWORD, TestWorld, date, login};
use rstest::rstest;
use serde_json::Value;

use pages::{get, json, world};

fn dates(list: &[Value]) -> Vec<String> {
    list.iter()
        .map(|item| item["date"].as_str().expect("date string").to_owned())
        .collect()
}

#[rstest]
#[actix_web::test]
async fn news_count_is_capped(world: TestWorld) {
    world
        .seed_news(NEWS_COUNT_ON_HOME_PAGE + 1, date(2024, 5, 20))
        .await;
    let app = test::init_service(world.app()).await;

    let body = json(get(&app, "/news/", None).await).await;

    let list = body["objectList"].as_array().expect("object list");
    assert_eq!(list.len(), NEWS_COUNT_ON_HOME_PAGE);
}

#[rstest]
#[actix_web::test]
async fn news_order_is_newest_first(world: TestWorld) {
    world
        .seed_news(NEWS_COUNT_ON_HOME_PAGE + 1, date(2024, 5, 20))
        .await;
    let app = test::init_service(world.app()).await;

    let body = json(get(&app, "/news/", None).await).await;

    let list = body["objectList"].as_array().expect("object list");
    let all_dates = dates(list);
    let mut sorted = all_dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(all_dates, sorted);
    assert_eq!(all_dates[0], "2024-05-20");
    assert!(!all_dates.contains(&"2024-05-10".to_owned()));
}

#[rstest]
#[actix_web::test]
async fn home_page_size_is_configurable() {
    let world = TestWorld::with_news_settings(NewsSettings {
        home_page_size: 3,
        ..NewsSettings::default()
    });
    world.seed_news(5, date(2024, 5, 20)).await;
    let app = test::init_service(world.app()).await;

    let body = json(get(&app, "/news/", None).await).await;

    let list = body["objectList"].as_array().expect("object list");
    assert_eq!(dates(list), ["2024-05-20", "2024-05-19", "2024-05-18"]);
}

#[rstest]
#[actix_web::test]
async fn undated_news_is_published_today(world: TestWorld) {
    world.publish_news("Вчера", Some(date(2024, 4, 30))).await;
    let today = world.publish_news("Сегодня", None).await;
    let app = test::init_service(world.app()).await;

    let body = json(get(&app, "/news/", None).await).await;

    assert_eq!(today.date, date(2024, 5, 1));
    assert_eq!(body["objectList"][0]["title"], "Сегодня");
}

#[rstest]
#[actix_web::test]
async fn comments_order_is_oldest_first(world: TestWorld) {
    let author = world.create_user("author").await;
    let news = world.publish_news("Заголовок", None).await;
    for index in 0..10 {
        world
            .add_comment(news.id, author.id(), &format!("Текст {index}"))
            .await;
    }
    let app = test::init_service(world.app()).await;

    let body = json(get(&app, &format!("/news/{}/", news.id), None).await).await;

    let comments = body["comments"].as_array().expect("comments");
    assert_eq!(comments.len(), 10);
    let created: Vec<&str> = comments
        .iter()
        .map(|comment| comment["created"].as_str().expect("timestamp"))
        .collect();
    let mut sorted = created.clone();
    sorted.sort_unstable();
    assert_eq!(created, sorted);
    assert_eq!(comments[0]["text"], "Текст 0");
    assert_eq!(comments[9]["text"], "Текст 9");
}

#[rstest]
#[actix_web::test]
async fn anonymous_client_has_no_form(world: TestWorld) {
    let news = world.publish_news("Заголовок", None).await;
    let app = test::init_service(world.app()).await;

    let body = json(get(&app, &format!("/news/{}/", news.id), None).await).await;

    assert!(body.get("form").is_none());
}

#[rstest]
#[actix_web::test]
async fn authorized_client_has_form(world: TestWorld) {
    world.create_user("author").await;
    let news = world.publish_news("Заголовок", None).await;
    let app = test::init_service(world.app()).await;
    let cookie = login(&app, "author", TEST_PASSWORD).await;

    let body = json(get(&app, &format!("/news/{}/", news.id), Some(&cookie)).await).await;

    assert_eq!(body["form"]["values"]["text"], "");
    assert_eq!(body["form"]["errors"], serde_json::json!({}));
}
