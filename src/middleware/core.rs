use std::sync::Arc;

use tracing::debug;

use crate::error::DispatchError;
use crate::router::Handler;

/// A middleware callable: `(request, response, next)`.
///
/// Call `next.run(req, res)` to continue; return without calling it to short-circuit.
pub type Middleware<Req, Res> = Arc<
    dyn for<'a> Fn(&mut Req, &mut Res, Next<'a, Req, Res>) -> Result<(), DispatchError>
        + Send
        + Sync,
>;

/// An immutable, shareable chain. Cloning is a reference count bump.
pub type MiddlewareChain<Req, Res> = Arc<[Middleware<Req, Res>]>;

/// Wrap a closure as a [`Middleware`].
///
/// Mostly useful to pin down the higher-ranked signature for closures.
pub fn middleware_fn<Req, Res, F>(f: F) -> Middleware<Req, Res>
where
    F: for<'a> Fn(&mut Req, &mut Res, Next<'a, Req, Res>) -> Result<(), DispatchError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// Adapt a terminal handler into the last element of a chain.
///
/// The handler never sees the continuation; there is nothing after it.
pub fn terminal<Req, Res>(handler: Handler<Req, Res>) -> Middleware<Req, Res>
where
    Req: 'static,
    Res: 'static,
{
    middleware_fn(move |req, res, _next| handler(req, res))
}

/// Continuation handed to each middleware.
///
/// Holds the chain and a cursor pointing at the element that runs next. Running it
/// consumes it, so a middleware can advance at most once.
pub struct Next<'a, Req, Res> {
    chain: &'a [Middleware<Req, Res>],
    cursor: usize,
}

impl<'a, Req, Res> Next<'a, Req, Res> {
    fn new(chain: &'a [Middleware<Req, Res>], cursor: usize) -> Self {
        Self { chain, cursor }
    }

    /// Number of chain elements that have not run yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.chain.len().saturating_sub(self.cursor)
    }

    /// Invoke the element under the cursor; a no-op once the chain is exhausted.
    pub fn run(self, req: &mut Req, res: &mut Res) -> Result<(), DispatchError> {
        match self.chain.get(self.cursor) {
            Some(current) => current(req, res, Next::new(self.chain, self.cursor + 1)),
            None => Ok(()),
        }
    }
}

/// Run `chain` from its first element.
///
/// Errors from any depth propagate to the caller unchanged, including
/// [`DispatchError::Halt`]; intercepting the halt signal is the caller's decision.
pub fn run_chain<Req, Res>(
    chain: &[Middleware<Req, Res>],
    req: &mut Req,
    res: &mut Res,
) -> Result<(), DispatchError> {
    let result = Next::new(chain, 0).run(req, res);
    if let Err(DispatchError::Halt) = &result {
        debug!(chain_len = chain.len(), "Middleware chain halted");
    }
    result
}
