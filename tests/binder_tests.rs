mod common;

use std::sync::atomic::Ordering;
use std::sync::Barrier;

use common::fixtures::{binder, call, ItemsController, ReadOnlyController};
use controller_binder::{
    Action, BindError, ControllerBinder, ErrorKind, HandlerRequest, HandlerResponse, MemoryRouter,
    RegisterOptions, RouteSummary,
};
use serde_json::json;

#[test]
fn test_named_action_end_to_end() {
    let mut binder = binder();
    binder.get("/items/:id", "Named.index").unwrap();

    assert_eq!(
        binder.route_for_action("Named.index", &[("id", "7")]).unwrap(),
        "/items/7"
    );

    let res = call(&binder, "GET", "/items/7");
    assert_eq!(res.status, 200);
    assert_eq!(res.body["action"], "index");
    assert_eq!(res.body["id"], "7");

    let routes = binder.list_routes();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].url, "/items/:id");
    assert_eq!(routes[0].method, "get");
    assert_eq!(routes[0].controller_name, "Named");
    assert_eq!(routes[0].action_name, "index");
}

#[test]
fn test_register_conflicts() {
    let mut binder = binder();

    let err = binder
        .register::<ItemsController>(RegisterOptions::new().name("Items"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Controller);
    assert_eq!(err.code(), 1);
    assert_eq!(err.to_string(), "Items is already bound to a controller");

    let err = binder
        .register::<ReadOnlyController>(RegisterOptions::new().alias("Named"))
        .unwrap_err();
    assert!(matches!(err, BindError::NameAlreadyBound { ref name } if name == "Named"));

    binder
        .register::<ReadOnlyController>(RegisterOptions::new())
        .unwrap();
    assert_eq!(
        binder.controller_names(),
        ["Items", "Named", "ReadOnlyController"]
    );
}

#[test]
fn test_instance_registration_is_shared() {
    let mut binder = ControllerBinder::new(MemoryRouter::new());
    binder
        .register_instance(
            ItemsController::default(),
            RegisterOptions::new().name("Items").alias("Stock"),
        )
        .unwrap();
    binder.get("/a", "Items.index").unwrap();
    binder.get("/b", "Stock.show").unwrap();

    call(&binder, "GET", "/a");
    call(&binder, "GET", "/b");

    let items = binder.controller::<ItemsController>("Stock").unwrap();
    assert_eq!(items.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_invalid_method() {
    let mut binder = ControllerBinder::new(MemoryRouter::with_methods(&["get"]));
    binder
        .register::<ReadOnlyController>(RegisterOptions::new())
        .unwrap();

    let err = binder.post("/x", "ReadOnlyController.index").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Route);
    assert_eq!(err.code(), 1);
    assert_eq!(err.to_string(), "post method doesn't exist on router");
    assert!(binder.get_router().is_empty());
}

#[test]
fn test_custom_router_method() {
    let mut binder = ControllerBinder::new(MemoryRouter::new().with_method("options"));
    binder
        .register::<ReadOnlyController>(RegisterOptions::new().name("Docs"))
        .unwrap();
    binder.add_route("options", "/docs", "Docs.index").unwrap();

    let res = call(&binder, "OPTIONS", "/docs");
    assert_eq!(res.body, json!({ "action": "index" }));
}

#[test]
fn test_route_errors_codes() {
    let mut binder = binder();

    let err = binder.get("/x", "Missing.show").unwrap_err();
    assert_eq!((err.kind(), err.code()), (ErrorKind::Route, 2));
    assert!(err.to_string().ends_with("Available Names: Items,Named"));

    let err = binder.get("/x", "Items.missing").unwrap_err();
    assert_eq!((err.kind(), err.code()), (ErrorKind::Route, 3));

    let err = binder.get("/x", "Items.show").unwrap().middleware("auth").unwrap_err();
    assert_eq!((err.kind(), err.code()), (ErrorKind::Route, 5));
}

#[test]
fn test_direct_handler_route() {
    let mut binder = binder();
    binder
        .get(
            "/health",
            Action::handler(|_req: &mut HandlerRequest, res: &mut HandlerResponse| {
                res.set_json(200, json!({ "ok": true }));
                Ok(())
            }),
        )
        .unwrap();

    assert_eq!(call(&binder, "GET", "/health").body, json!({ "ok": true }));
    assert!(binder.list_routes().is_empty());
}

#[test]
fn test_unmatched_request_is_not_found() {
    let mut binder = binder();
    binder.get("/items", "Items.index").unwrap();
    let res = call(&binder, "GET", "/nothing");
    assert_eq!(res.status, 404);
    assert_eq!(res.body["path"], "/nothing");
}

#[test]
fn test_handler_error_reaches_router() {
    let mut binder = binder();
    binder.get("/fail", "Items.fail").unwrap();
    let err = binder
        .get_router()
        .dispatch(HandlerRequest::new("GET", "/fail"))
        .unwrap_err();
    assert_eq!(err.to_string(), "storage unavailable");
}

#[test]
fn test_resource_routes() {
    let mut binder = binder();
    binder.resource("/posts/", "Items").unwrap();

    assert_eq!(
        binder.get_router().routes(),
        vec![
            ("get", "/posts"),
            ("get", "/posts/new"),
            ("post", "/posts"),
            ("get", "/posts/:id"),
            ("get", "/posts/:id/edit"),
            ("put", "/posts/:id"),
            ("patch", "/posts/:id"),
            ("delete", "/posts/:id"),
        ]
    );

    let cases = [
        ("GET", "/posts", "index", json!(null)),
        ("GET", "/posts/new", "create", json!(null)),
        ("POST", "/posts", "store", json!(null)),
        ("GET", "/posts/5", "show", json!("5")),
        ("GET", "/posts/5/edit", "edit", json!("5")),
        ("PUT", "/posts/5", "update", json!("5")),
        ("PATCH", "/posts/5", "update", json!("5")),
        ("DELETE", "/posts/5", "destroy", json!("5")),
    ];
    for (method, target, action, id) in cases {
        let res = call(&binder, method, target);
        assert_eq!(res.body["action"], action, "{method} {target}");
        assert_eq!(res.body["id"], id, "{method} {target}");
    }

    // resource routes are not bindings
    assert!(binder.list_routes().is_empty());
    assert!(matches!(
        binder.route_for_action("Items.show", &[("id", "5")]),
        Err(BindError::RouteNotFound { .. })
    ));
}

#[test]
fn test_resource_skips_missing_actions() {
    let mut binder = ControllerBinder::new(MemoryRouter::new());
    binder
        .register::<ReadOnlyController>(RegisterOptions::new().name("Docs"))
        .unwrap();
    binder.resource("docs", "Docs").unwrap();

    assert_eq!(
        binder.get_router().routes(),
        vec![("get", "/docs"), ("get", "/docs/:id")]
    );
    assert_eq!(call(&binder, "GET", "/docs/new").body["id"], "new");
}

#[test]
fn test_reverse_routing() {
    let mut binder = binder();
    binder.get("/items", "Items.index").unwrap();
    binder.get("/items/:id/:slug?", "Items.show").unwrap();
    binder.get("/files/*path", "Items.edit").unwrap();

    assert_eq!(binder.route_for_action("Items.index", &[]).unwrap(), "/items");
    assert_eq!(
        binder
            .route_for_action("Named.show", &[("id", "a/b c"), ("slug", "x")])
            .unwrap(),
        "/items/a%2Fb%20c/x"
    );
    assert_eq!(
        binder.route_for_action("Items.show", &[("id", "a(b)!*'")]).unwrap(),
        "/items/a(b)!*'"
    );
    assert_eq!(
        binder.route_for_action("Items.show", &[("id", "9")]).unwrap(),
        "/items/9"
    );
    assert_eq!(
        binder
            .route_for_action("Items.edit", &[("path", "docs/read me.txt")])
            .unwrap(),
        "/files/docs/read%20me.txt"
    );

    let err = binder.route_for_action("Items.show", &[]).unwrap_err();
    assert_eq!(err.code(), 7);
    assert!(matches!(
        binder.route_for_action("Items.destroy", &[]),
        Err(BindError::RouteNotFound { .. })
    ));
}

#[test]
fn test_reverse_routing_first_declared_wins() {
    let mut binder = binder();
    binder.get("/first/:id", "Items.show").unwrap();
    binder.get("/second/:id", "Named.show").unwrap();
    assert_eq!(
        binder.route_for_action("Named.show", &[("id", "1")]).unwrap(),
        "/first/1"
    );
}

#[test]
fn test_list_routes_summaries() {
    let mut binder = binder();
    binder.get("/items", "Items.index").unwrap();
    binder.post("/items/:id", "Named.update").unwrap();

    let summaries: Vec<RouteSummary> = binder.list_routes().iter().map(|r| r.summary()).collect();
    assert_eq!(
        serde_json::to_value(&summaries).unwrap(),
        json!([
            {
                "url": "/items",
                "method": "get",
                "action": "Items.index",
                "controllerName": "Items",
                "actionName": "index",
                "middlewareCount": 1
            },
            {
                "url": "/items/:id",
                "method": "post",
                "action": "Named.update",
                "controllerName": "Named",
                "actionName": "update",
                "middlewareCount": 1
            }
        ])
    );
    binder.dump_routes();
}

#[test]
fn test_rebinding_url_keeps_single_entry() {
    let mut binder = binder();
    binder.get("/items", "Items.index").unwrap();
    binder.get("/items", "Items.show").unwrap();

    let routes = binder.list_routes();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].action, "Items.show");
    assert_eq!(binder.get_router().len(), 1);
    assert_eq!(call(&binder, "GET", "/items").body["action"], "show");
}

#[test]
fn test_concurrent_attachments_are_all_kept() {
    const THREADS: usize = 32;

    for _ in 0..50 {
        let mut binder = binder();
        for i in 0..THREADS {
            binder.register_middleware(
                &format!("m{i}"),
                |req: &mut HandlerRequest, res: &mut HandlerResponse, next| next.run(req, res),
            );
        }
        binder.get("/x", "Items.index").unwrap();

        let barrier = Barrier::new(THREADS);
        std::thread::scope(|scope| {
            for i in 0..THREADS {
                let binder = &binder;
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    binder.attach_middleware("/x", format!("m{i}")).unwrap();
                });
            }
        });

        assert_eq!(binder.list_routes()[0].middleware.len(), THREADS + 1);
        assert_eq!(call(&binder, "GET", "/x").body["action"], "index");
    }
}
