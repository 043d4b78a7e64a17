//! End-to-end behavior of the declared route table.

use axum::http::StatusCode;
use blog_api::routing::{Route, RouterOptions};
use blog_api::{blog, ApiConfig, BuildError, HttpServer, Router};
use serde_json::json;

mod common;
use common::{get, send, send_raw};

#[tokio::test]
async fn test_blog_list_defaults() {
    let (status, body) = get("/blog").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": "10 published blogs from db" }));
}

#[tokio::test]
async fn test_blog_list_alias_and_deprecated_sort() {
    let (status, body) = get("/blog?limit=5&is-published=false&sort=-created_at").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": "5 blogs from db, -created_at" }));

    // The internal name is not an accepted key when an alias is declared.
    let (_, body) = get("/blog?published=false").await;
    assert_eq!(body, json!({ "data": "10 published blogs from db" }));
}

#[tokio::test]
async fn test_blog_list_sort_constraints() {
    let (status, body) = get("/blog?sort=ab").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "string_too_short");
    assert_eq!(body["detail"][0]["loc"], json!(["query", "sort"]));

    let (status, body) = get("/blog?sort=Created").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "string_pattern_mismatch");
}

#[tokio::test]
async fn test_create_blog_echoes_title() {
    let (status, body) = send(
        "POST",
        "/blog",
        Some(json!({ "title": "Hello", "body": "World" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": "Blog is created with title Hello" }));
}

#[tokio::test]
async fn test_create_blog_body_errors() {
    let (status, body) = send("POST", "/blog", Some(json!({ "title": "Hello" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body"]));

    let server = HttpServer::new(ApiConfig::default()).unwrap();
    let (status, body) = send_raw(&server, "POST", "/blog", "{not json".into()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "json_invalid");

    let (status, _) = send_raw(&server, "POST", "/blog", String::new()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_user_blog_bounds() {
    let blog = json!({ "title": "T", "body": "B" });

    let (status, body) = send("POST", "/blog/1000", Some(blog.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "data": "Blog is created with title T and user is 1000 with publish status false" })
    );

    let (status, body) = send("POST", "/blog/1500?published=true", Some(blog.clone())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "less_than_equal");
    assert_eq!(body["detail"][0]["loc"], json!(["path", "user_id"]));

    let (status, body) = send("POST", "/blog/-1", Some(blog)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "greater_than_equal");
}

#[tokio::test]
async fn test_static_route_not_captured_by_placeholder() {
    let (status, body) = get("/blog/unpublished").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": "all unpublished blogs" }));
}

#[tokio::test]
async fn test_show_requires_integer_id() {
    let (status, body) = get("/blog/42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": 42, "size": null }));

    let (status, body) = get("/blog/forty-two").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "int_parsing");
    assert_eq!(body["detail"][0]["loc"], json!(["path", "id"]));
}

#[tokio::test]
async fn test_show_float_size_bounds() {
    let (status, body) = get("/blog/1?item-size=2.5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": 1, "size": 2.5 }));

    let (status, body) = get("/blog/1?item-size=0").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "greater_than");
    assert_eq!(body["detail"][0]["loc"], json!(["query", "item-size"]));

    let (status, body) = get("/blog/1?item-size=10.5").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "less_than");
}

#[tokio::test]
async fn test_comments() {
    let (status, body) = get("/blog/3/comments").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": { "comments": 3, "limit": 10 } }));

    let (status, body) = get("/blog/3/comments/8?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": { "comments": 3, "user": 8, "limit": 2 } }));
}

#[tokio::test]
async fn test_items_optional_query() {
    let (status, body) = get("/items/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "items": [{ "item_id": "Foo" }, { "item_id": "Bar" }] }));

    let (_, body) = get("/items?q=x").await;
    assert_eq!(body["q"], "x");
}

#[tokio::test]
async fn test_items2_min_length() {
    let (status, body) = get("/items2/?q=ab").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "string_too_short");

    let (status, body) = get("/items2/?q=abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "items": [{ "item_id": "Foo" }, { "item_id": "Bar" }], "q": "abc" })
    );
}

#[tokio::test]
async fn test_items3_required() {
    let (status, body) = get("/items3/").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "missing");
    assert_eq!(body["detail"][0]["loc"], json!(["query", "q"]));

    let (status, _) = get("/items3/?q=abcd").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_items4_list_default() {
    let (status, body) = get("/items4/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "q": ["foo", "bar"] }));

    let (_, body) = get("/items4/?q=a&q=b&q=c").await;
    assert_eq!(body, json!({ "q": ["a", "b", "c"] }));
}

#[tokio::test]
async fn test_items5_optional_list_and_enum() {
    let (status, body) = get("/items5/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "q": null, "order": "asc" }));

    let (_, body) = get("/items5/?q=x&order=desc").await;
    assert_eq!(body, json!({ "q": ["x"], "order": "desc" }));

    let (status, body) = get("/items5/?order=sideways").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "enum");
}

#[tokio::test]
async fn test_unknown_route_and_method() {
    let (status, body) = get("/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Not Found" }));

    let (status, _) = send("DELETE", "/blog", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_body_limit() {
    let mut config = ApiConfig::default();
    config.limits.max_body_bytes = 16;
    let server = HttpServer::new(config).unwrap();

    let body = json!({ "title": "a long enough title", "body": "b" }).to_string();
    let (status, _) = send_raw(&server, "POST", "/blog", body).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[test]
fn test_declared_table_has_no_shadowed_routes() {
    let router = blog::router(Default::default()).unwrap();
    assert!(router.shadowed().is_empty());
}

#[test]
fn test_every_static_route_wins_over_later_placeholders() {
    let router = Router::new(blog::routes()).unwrap();
    for compiled in router.routes() {
        let route = compiled.route();
        if compiled.pattern().placeholders().next().is_some() {
            continue;
        }
        let first = router
            .routes()
            .iter()
            .find(|c| c.route().method == route.method && c.pattern().matches(&route.pattern).is_some())
            .unwrap();
        assert_eq!(first.route().name, route.name, "{} was captured", route.pattern);
    }
}

#[test]
fn test_strict_mode_rejects_misordered_table() {
    let mut routes: Vec<Route> = blog::routes();
    let index = routes
        .iter()
        .position(|r| r.pattern == "/blog/unpublished")
        .unwrap();
    let unpublished = routes.remove(index);
    routes.push(unpublished);

    let lenient = Router::new(routes.clone()).unwrap();
    assert_eq!(lenient.shadowed().len(), 1);
    assert_eq!(lenient.shadowed()[0].by, "GET /blog/{id}");

    let strict = Router::with_options(routes, RouterOptions { reject_shadowed: true });
    assert!(matches!(strict, Err(BuildError::Shadowed { .. })));

    // The shipped table builds under strict mode.
    let mut config = ApiConfig::default();
    config.routing.reject_shadowed_routes = true;
    assert!(HttpServer::new(config).is_ok());
}
