//! Dispatch behavior through the router's `Service` implementation.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tiny_router::http::middleware::{compose, from_fn, Middleware, Next, SharedMiddleware};
use tiny_router::{BoxHandler, RequestParamsExt, RouteTable, Router, RouterConfig};

mod common;
use common::{body_string, send};

fn echo(name: &'static str) -> impl Fn(Request<Body>) -> std::future::Ready<String> + Clone {
    move |req: Request<Body>| std::future::ready(req.param(name).to_string())
}

fn build(table: RouteTable, redirect_trailing_slash: bool) -> Router {
    table.into_router(RouterConfig {
        redirect_trailing_slash,
    })
}

#[tokio::test]
async fn test_simple_get() {
    let mut table = RouteTable::new();
    table.get("/home", |_req: Request<Body>| async { "home" }).unwrap();
    let router = build(table, false);

    let res = send(&router, "GET", "/home").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_string(res).await, "home");
}

#[tokio::test]
async fn test_not_found() {
    let mut table = RouteTable::new();
    table.get("/found", |_req: Request<Body>| async { "" }).unwrap();
    let router = build(table, false);

    let res = send(&router, "GET", "/notfound").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(res).await, "404 page not found\n");
}

#[tokio::test]
async fn test_named_param() {
    let mut table = RouteTable::new();
    table.get("/articles/:id", echo("id")).unwrap();
    let router = build(table, false);

    let res = send(&router, "GET", "/articles/4").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_string(res).await, "4");
}

#[tokio::test]
async fn test_catch_all_param() {
    let mut table = RouteTable::new();
    table.get("/articles/*all", echo("all")).unwrap();
    let router = build(table, false);

    let res = send(&router, "GET", "/articles/user/name/bob").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_string(res).await, "user/name/bob");
}

#[tokio::test]
async fn test_missing_param_is_empty() {
    let mut table = RouteTable::new();
    table.get("/articles/:id", echo("name")).unwrap();
    let router = build(table, false);

    let res = send(&router, "GET", "/articles/123").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_string(res).await, "");
}

#[tokio::test]
async fn test_method_not_allowed() {
    let mut table = RouteTable::new();
    table.get("/articles", |_req: Request<Body>| async { "" }).unwrap();
    let router = build(table, false);

    let res = send(&router, "POST", "/articles").await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()[header::ALLOW], "GET");
    assert_eq!(body_string(res).await, "Method Not Allowed\n");
}

#[tokio::test]
async fn test_allow_lists_each_method_once() {
    let mut table = RouteTable::new();
    table.get("/items/:id", |_req: Request<Body>| async { "" }).unwrap();
    table.put("/items/:id", |_req: Request<Body>| async { "" }).unwrap();
    table.get("/items/*rest", |_req: Request<Body>| async { "" }).unwrap();
    let router = build(table, false);

    let res = send(&router, "DELETE", "/items/9").await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()[header::ALLOW], "GET, PUT");
}

#[tokio::test]
async fn test_trailing_slash_without_redirect() {
    let mut table = RouteTable::new();
    table.get("/articles", |_req: Request<Body>| async { "" }).unwrap();
    let router = build(table, false);

    let res = send(&router, "GET", "/articles/").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_trailing_slash_redirect() {
    let mut table = RouteTable::new();
    table.get("/articles", |_req: Request<Body>| async { "" }).unwrap();
    let router = build(table, true);

    let res = send(&router, "GET", "/articles/").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/articles");

    let res = send(&router, "GET", "/articles/?page=2").await;
    assert_eq!(res.headers()[header::LOCATION], "/articles?page=2");
}

#[tokio::test]
async fn test_pattern_without_leading_slash() {
    let mut table = RouteTable::new();
    table.get("articles", |_req: Request<Body>| async { "list" }).unwrap();
    let router = build(table, false);

    let res = send(&router, "GET", "/articles").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_string(res).await, "list");
}

#[tokio::test]
async fn test_unclean_request_path() {
    let mut table = RouteTable::new();
    table.get("/a/b", |_req: Request<Body>| async { "ab" }).unwrap();
    let router = build(table, false);

    let res = send(&router, "GET", "/a//x/../b").await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_group_dispatch() {
    let mut table = RouteTable::new();
    table
        .group("/api/", |api| {
            api.post("user/:id", echo("id"))?;
            Ok(())
        })
        .unwrap();
    let router = build(table, false);

    let res = send(&router, "POST", "/api/user/123").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_string(res).await, "123");
}

#[tokio::test]
async fn test_nested_groups_with_root_routes() {
    let mut table = RouteTable::new();
    table
        .group("/articles", |articles| {
            articles.get("/search", |_req: Request<Body>| async { "search" })?;
            articles.group("/:articleId", |article| {
                article.get("/", echo("articleId"))?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();
    let router = build(table, false);

    let res = send(&router, "GET", "/articles/search").await;
    assert_eq!(body_string(res).await, "search");

    let res = send(&router, "GET", "/articles/42").await;
    assert_eq!(body_string(res).await, "42");
}

#[tokio::test]
async fn test_middleware_writes_before_handler() {
    let mw = from_fn(|req: Request<Body>, next: Next| async move {
        let res = next.run(req).await;
        let inner = body_string(res).await;
        format!("middleware{}", inner)
    });

    let mut table = RouteTable::new();
    table
        .get("/articles", mw.wrap(BoxHandler::new(|_req: Request<Body>| async { "" })))
        .unwrap();
    let router = build(table, false);

    let res = send(&router, "GET", "/articles").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_string(res).await, "middleware");
}

#[tokio::test]
async fn test_middleware_order_through_router() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let layer = |name: &'static str| -> SharedMiddleware {
        let log = log.clone();
        Arc::new(from_fn(move |req: Request<Body>, next: Next| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(format!("{} pre", name));
                let res = next.run(req).await;
                log.lock().unwrap().push(format!("{} post", name));
                res
            }
        }))
    };

    let handler_log = log.clone();
    let handler = BoxHandler::new(move |req: Request<Body>| {
        handler_log.lock().unwrap().push(format!("H {}", req.param("id")));
        async { "" }
    });

    let mut table = RouteTable::new();
    table
        .get("/things/:id", compose([layer("A"), layer("B")]).wrap(handler))
        .unwrap();
    let router = build(table, false);

    send(&router, "GET", "/things/7").await;
    assert_eq!(
        *log.lock().unwrap(),
        vec!["A pre", "B pre", "H 7", "B post", "A post"]
    );
}

#[tokio::test]
async fn test_params_do_not_leak_between_requests() {
    let mut table = RouteTable::new();
    table.get("/users/:name", echo("name")).unwrap();
    let router = build(table, false);

    let requests = (0..32).map(|i| {
        let router = router.clone();
        tokio::spawn(async move {
            let res = send(&router, "GET", &format!("/users/u{}", i)).await;
            (i, body_string(res).await)
        })
    });

    for handle in requests.collect::<Vec<_>>() {
        let (i, body) = handle.await.unwrap();
        assert_eq!(body, format!("u{}", i));
    }
}
