use controller_binder::{
    ActionTable, Controller, ControllerBinder, DispatchError, HandlerRequest, HandlerResponse,
    MemoryRouter, RegisterOptions,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

#[derive(Default)]
struct Zoo;

impl Controller<HandlerRequest, HandlerResponse> for Zoo {
    fn actions() -> ActionTable<Self, HandlerRequest, HandlerResponse> {
        ActionTable::new()
            .action("index", |_c: &Self, _req: &mut HandlerRequest, res: &mut HandlerResponse| {
                res.status = 200;
                Ok(())
            })
            .action("show", |_c: &Self, req: &mut HandlerRequest, res: &mut HandlerResponse| {
                res.status = if req.get_path_param("id").is_some() { 200 } else { 400 };
                Ok(())
            })
            .action("section", |_c: &Self, _req: &mut HandlerRequest, res: &mut HandlerResponse| {
                res.status = 200;
                Ok(())
            })
    }
}

fn pass(
    req: &mut HandlerRequest,
    res: &mut HandlerResponse,
    next: controller_binder::Next<'_, HandlerRequest, HandlerResponse>,
) -> Result<(), DispatchError> {
    next.run(req, res)
}

fn zoo_binder() -> ControllerBinder<MemoryRouter> {
    let mut binder = ControllerBinder::new(MemoryRouter::new());
    binder
        .register::<Zoo>(RegisterOptions::new().name("Zoo"))
        .expect("register");
    for name in ["auth", "audit", "rate", "cors"] {
        binder.register_middleware(name, pass);
    }
    binder.get("/zoo/animals", "Zoo.index").expect("route");
    binder
        .get("/zoo/animals/:id", "Zoo.show")
        .expect("route")
        .middleware(["auth", "audit"])
        .expect("middleware");
    binder
        .get("/zoo/:category/animals/:id/habitats/:habitat_id/sections/:section_id", "Zoo.section")
        .expect("route")
        .middleware(["auth", "audit", "rate", "cors"])
        .expect("middleware");
    binder
}

fn bench_dispatch(c: &mut Criterion) {
    let binder = zoo_binder();
    let router = binder.get_router();
    c.bench_function("bound_dispatch", |b| {
        let targets = [
            "/zoo/animals",
            "/zoo/animals/123",
            "/zoo/cats/animals/123/habitats/88/sections/5",
        ];
        b.iter(|| {
            for target in targets {
                let res = router.dispatch(HandlerRequest::new("GET", target));
                black_box(&res);
            }
        })
    });
}

fn bench_reverse_routing(c: &mut Criterion) {
    let binder = zoo_binder();
    c.bench_function("route_for_action", |b| {
        b.iter(|| {
            let url = binder.route_for_action(
                "Zoo.section",
                &[("category", "big cats"), ("id", "1"), ("habitat_id", "2"), ("section_id", "3")],
            );
            black_box(&url);
        })
    });
}

criterion_group!(benches, bench_dispatch, bench_reverse_routing);
criterion_main!(benches);
