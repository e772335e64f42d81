use futures::future::BoxFuture;
use log::{debug, info};
use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Action = (String, BoxFuture<'static, ()>);

/// A per-test list of deferred async actions, typically deleting what the test created. The
/// engine owns one `Cleanup` per test and calls [`Cleanup::release`] after the test body is done,
/// whatever the verdict, so a body only has to register an action once the resource exists.
///
/// Actions run in reverse order of registration. They cannot fail; an action that can go wrong
/// logs the problem itself.
#[derive(Clone, Default)]
pub struct Cleanup {
    actions: Arc<Mutex<Vec<Action>>>,
}

impl Cleanup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `action` to be run when the scope is released. `description` is only used for
    /// logging.
    pub fn defer<S, F>(&self, description: S, action: F)
    where
        S: Into<String>,
        F: Future<Output = ()> + Send + 'static,
    {
        let description = description.into();
        debug!("Deferring cleanup: {}", description);
        self.actions().push((description, Box::pin(action)));
    }

    /// The number of actions waiting to be run.
    pub fn len(&self) -> usize {
        self.actions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs and removes every registered action, most recent first. Releasing an empty scope does
    /// nothing, so calling this twice is harmless.
    pub async fn release(&self) {
        let actions = std::mem::take(&mut *self.actions());
        for (description, action) in actions.into_iter().rev() {
            info!("Cleaning up: {}", description);
            action.await;
        }
    }

    fn actions(&self) -> MutexGuard<'_, Vec<Action>> {
        // An action list is only ever pushed to or taken whole, so it is consistent even if a
        // thread panicked while holding the lock.
        self.actions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Debug for Cleanup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cleanup")
            .field("pending", &self.len())
            .finish()
    }
}
