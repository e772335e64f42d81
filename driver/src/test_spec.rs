use crate::cleanup::Cleanup;
use async_trait::async_trait;
use e2e_model::RunConfiguration;
use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::sync::Arc;

/// The body of a check. It receives a client that nobody else uses and the [`TestContext`] of
/// the run, and returns `true` if the check passed.
///
/// Any error a body encounters is its own business: it logs what happened and returns `false`.
/// Resources that must be released whatever the verdict should be registered with
/// [`TestContext::cleanup`] instead of being deleted at the end of the body, since a body can be
/// cancelled by the per-test timeout.
///
/// Closures of the form `|client, context| async move { .. }` implement this trait.
#[async_trait]
pub trait TestBody<C>: Send + Sync {
    async fn run(&self, client: C, context: TestContext) -> bool;
}

#[async_trait]
impl<C, F, Fut> TestBody<C> for F
where
    C: Send + 'static,
    F: Fn(C, TestContext) -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send + 'static,
{
    async fn run(&self, client: C, context: TestContext) -> bool {
        (self)(client, context).await
    }
}

/// A named check. Cloning a `TestSpec` is cheap and the clone refers to the same body, which is
/// how the scheduler repeats tests.
pub struct TestSpec<C> {
    name: String,
    body: Arc<dyn TestBody<C>>,
}

impl<C> TestSpec<C> {
    pub fn new<S, B>(name: S, body: B) -> Self
    where
        S: Into<String>,
        B: TestBody<C> + 'static,
    {
        Self {
            name: name.into(),
            body: Arc::new(body),
        }
    }

    /// The name used for filtering and reporting.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn run(&self, client: C, context: TestContext) -> bool {
        self.body.run(client, context).await
    }
}

impl<C> Clone for TestSpec<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            body: Arc::clone(&self.body),
        }
    }
}

impl<C> Debug for TestSpec<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestSpec").field("name", &self.name).finish()
    }
}

/// What a test body knows about the run besides its client.
#[derive(Debug, Clone)]
pub struct TestContext {
    name: String,
    index: usize,
    config: Arc<RunConfiguration>,
    cleanup: Cleanup,
}

impl TestContext {
    /// Creates a context with an empty cleanup scope. `index` is the 1-based position of the test
    /// in the schedule.
    pub fn new<S>(name: S, index: usize, config: Arc<RunConfiguration>) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            index,
            config,
            cleanup: Cleanup::new(),
        }
    }

    /// The name of the running test.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The 1-based position of the running test in the schedule. Repeated tests share a name but
    /// never an index.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn config(&self) -> &RunConfiguration {
        &self.config
    }

    /// The cleanup scope of the running test. Actions registered here are run by the engine after
    /// the body has returned, failed or timed out.
    pub fn cleanup(&self) -> &Cleanup {
        &self.cleanup
    }
}
