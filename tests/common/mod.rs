//! Shared fixtures for integration tests.

use route_matcher::RouteTable;

/// A table exercising literals, patterns, assertions and groups.
pub fn sample_table() -> RouteTable<String> {
    let mut table = RouteTable::new();
    table
        .any("/home", "home".into())
        .get("/hello-world", "world".into())
        .get("/hello-{name}", "hello".into())
        .route("/login", "login".into(), ["GET", "POST"])
        .get("/users/{user:i}/posts/{post:i}", "post".into())
        .get("/color/{code:h}", "color".into())
        .get("/static/{file:*}", "static".into())
        .group("/api", |api| {
            api.get("/items", "items.list".into())
                .post("/items", "items.create".into())
                .group("/v2", |v2| {
                    v2.get("/items/{slug:ai}", "items.v2".into());
                });
        });
    table
}

/// `(path, method)` probes covering every outcome of `sample_table`.
#[allow(dead_code)]
pub const PROBES: &[(&str, &str)] = &[
    ("/home", "GET"),
    ("/home", "DELETE"),
    ("/home", ""),
    ("/hello-world", "GET"),
    ("/hello-world", "POST"),
    ("/hello-ann", "GET"),
    ("/login", "POST"),
    ("/login", "PUT"),
    ("/users/12/posts/2", "GET"),
    ("/users/ann/posts/2", "GET"),
    ("/color/00ad45", "GET"),
    ("/color/white", "GET"),
    ("/static/css/site.css", "GET"),
    ("/api/items", "GET"),
    ("/api/items", "POST"),
    ("/api/items", "PATCH"),
    ("/api/v2/items/abc123", "GET"),
    ("/api/v2/items/abc-123", "GET"),
    ("/items", "GET"),
    ("/missing", "GET"),
];
