#![allow(dead_code)]

pub mod tracing_capture {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use tracing::subscriber::DefaultGuard;
    use tracing::Level;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Thread-local subscriber that records formatted output for assertions.
    pub struct TestTracing {
        buffer: SharedBuffer,
        _guard: DefaultGuard,
    }

    impl TestTracing {
        pub fn init() -> Self {
            let buffer = SharedBuffer::default();
            let writer = buffer.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_max_level(Level::TRACE)
                .with_ansi(false)
                .with_writer(move || writer.clone())
                .finish();
            let guard = tracing::subscriber::set_default(subscriber);
            Self {
                buffer,
                _guard: guard,
            }
        }

        /// Everything logged since `init`.
        pub fn output(&self) -> String {
            String::from_utf8_lossy(&self.buffer.0.lock().unwrap()).into_owned()
        }
    }
}

pub mod fixtures {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use controller_binder::{
        ActionTable, Controller, ControllerBinder, DispatchError, HandlerRequest,
        HandlerResponse, MemoryRouter, RegisterOptions,
    };
    use serde_json::json;

    type Req = HandlerRequest;
    type Res = HandlerResponse;

    /// Answers every action with its own name and the `id` path parameter.
    #[derive(Default)]
    pub struct ItemsController {
        pub calls: AtomicUsize,
    }

    impl ItemsController {
        fn reply(&self, action: &str, req: &Req, res: &mut Res) -> Result<(), DispatchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            res.set_json(
                200,
                json!({
                    "action": action,
                    "id": req.get_path_param("id"),
                    "locals": req.locals,
                }),
            );
            Ok(())
        }
    }

    impl Controller<Req, Res> for ItemsController {
        fn actions() -> ActionTable<Self, Req, Res> {
            ActionTable::new()
                .action("index", |c: &Self, req: &mut Req, res: &mut Res| c.reply("index", req, res))
                .action("create", |c: &Self, req: &mut Req, res: &mut Res| c.reply("create", req, res))
                .action("store", |c: &Self, req: &mut Req, res: &mut Res| c.reply("store", req, res))
                .action("show", |c: &Self, req: &mut Req, res: &mut Res| c.reply("show", req, res))
                .action("edit", |c: &Self, req: &mut Req, res: &mut Res| c.reply("edit", req, res))
                .action("update", |c: &Self, req: &mut Req, res: &mut Res| c.reply("update", req, res))
                .action("destroy", |c: &Self, req: &mut Req, res: &mut Res| c.reply("destroy", req, res))
                .action("fail", |_c: &Self, _req: &mut Req, _res: &mut Res| {
                    Err(DispatchError::msg("storage unavailable"))
                })
        }
    }

    /// Only exposes `index` and `show`.
    #[derive(Default)]
    pub struct ReadOnlyController;

    impl Controller<Req, Res> for ReadOnlyController {
        fn actions() -> ActionTable<Self, Req, Res> {
            ActionTable::new()
                .action("index", |_c: &Self, _req: &mut Req, res: &mut Res| {
                    res.set_json(200, json!({ "action": "index" }));
                    Ok(())
                })
                .action("show", |_c: &Self, req: &mut Req, res: &mut Res| {
                    res.set_json(200, json!({ "action": "show", "id": req.get_path_param("id") }));
                    Ok(())
                })
        }
    }

    /// Binder over a fresh [`MemoryRouter`] with `Items` (alias `Named`) registered.
    pub fn binder() -> ControllerBinder<MemoryRouter> {
        let mut binder = ControllerBinder::new(MemoryRouter::new());
        binder
            .register::<ItemsController>(RegisterOptions::new().name("Items").alias("Named"))
            .unwrap();
        binder
    }

    pub fn call(binder: &ControllerBinder<MemoryRouter>, method: &str, target: &str) -> HandlerResponse {
        binder
            .get_router()
            .dispatch(HandlerRequest::new(method, target))
            .unwrap()
    }
}
