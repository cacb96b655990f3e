//! Compiled cache persistence and route file loading.

use std::cell::Cell;

use route_matcher::cache::{create_matcher, load_routes, save_routes};
use route_matcher::config::load_config;
use route_matcher::routing::CompiledRoute;
use route_matcher::{MatchResult, RouteTable};

mod common;

#[test]
fn test_serialization_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routes.json");

    let mut original = common::sample_table();
    save_routes(&path, original.compile().unwrap()).unwrap();

    let mut reloaded = RouteTable::from_compiled(load_routes::<String>(&path).unwrap());
    for (path, method) in common::PROBES {
        assert_eq!(
            original.match_route(path, method).unwrap(),
            reloaded.match_route(path, method).unwrap(),
            "{method} {path}"
        );
    }
}

#[test]
fn test_create_matcher_writes_then_reuses_cache() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routes.json");
    let builds = Cell::new(0);

    let build = |table: &mut RouteTable<String>| {
        builds.set(builds.get() + 1);
        table.get("/users/{id:i}", "user".into());
    };

    let mut first = create_matcher(Some(path.as_path()), build).unwrap();
    assert!(path.is_file());
    assert!(first.is_compiled());

    let mut second = create_matcher(Some(path.as_path()), build).unwrap();
    assert_eq!(builds.get(), 1);
    assert_eq!(second.compile().unwrap(), first.compile().unwrap());

    let MatchResult::Found { captures, .. } = second.match_route("/users/9", "GET").unwrap() else {
        panic!("expected a match");
    };
    assert_eq!(captures.get("id"), Some("9"));
}

#[test]
fn test_create_matcher_without_cache() {
    let mut table = create_matcher::<String, _>(None, |table| {
        table.post("/login", "login".into());
    })
    .unwrap();

    assert_eq!(table.match_route("/login", "GET").unwrap().status(), 405);
}

#[test]
fn test_cache_file_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routes.json");

    let mut table: RouteTable<String> = RouteTable::new();
    table.get("/home", "home".into()).get("/hello-{name}", "hello".into());
    save_routes(&path, table.compile().unwrap()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].get("matcher").is_none());
    assert_eq!(records[1]["matcher"]["captures"], serde_json::json!(["name"]));

    let loaded: Vec<CompiledRoute<String>> = load_routes(&path).unwrap();
    assert!(loaded[0].matcher.is_literal());
}

#[test]
fn test_route_file_to_matches() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routes.toml");
    std::fs::write(
        &path,
        r#"
        [[routes]]
        path = "/home"
        target = "home"

        [[routes]]
        path = "/x"
        methods = ["GET"]
        target = "x.get"

        [[routes]]
        path = "/x"
        methods = ["PUT"]
        target = "x.put"

        [[groups]]
        prefix = "/admin"
        routes = [{ path = "/color/{code:h}", target = "admin.color" }]
        "#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    let mut table = RouteTable::from_config(&config);

    assert_eq!(table.match_route("/home", "DELETE").unwrap().target().map(String::as_str), Some("home"));
    assert_eq!(table.match_route("/x", "POST").unwrap().status(), 405);
    assert_eq!(
        table.match_route("/admin/color/00ad45", "GET").unwrap().target().map(String::as_str),
        Some("admin.color")
    );
    assert_eq!(table.match_route("/admin/color/white", "GET").unwrap(), MatchResult::NotFound);
}
