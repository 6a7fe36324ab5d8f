use log::error;
use log::trace;
use std::error::Error;
use std::fmt;
use std::io;
use std::thread::{self, Scope, ScopedJoinHandle};

/// An error raised while starting or joining a worker thread.
#[derive(Debug)]
pub enum ThreadError {
    /// The OS refused to create the thread.
    Spawn { id: usize, source: io::Error },
    /// The thread panicked before completing its job.
    Join { id: usize },
}

impl fmt::Display for ThreadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ThreadError::Spawn { id, source } => {
                write!(f, "Failed spawning thread[{}]: {}", id, source)
            }
            ThreadError::Join { id } => write!(f, "Failed joining thread[{}].", id),
        }
    }
}

impl Error for ThreadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ThreadError::Spawn { source, .. } => Some(source),
            ThreadError::Join { .. } => None,
        }
    }
}

/// A worker thread living inside a [`thread::scope`].
///
/// The thread may borrow from the enclosing stack frame, which is how the
/// workers get their own disjoint block of the output buffer.
pub(crate) struct Thread<'scope> {
    id: usize,
    handle: Option<ScopedJoinHandle<'scope, ()>>,
}

impl<'scope> Thread<'scope> {
    /// Spawn the thread `id` running `f` in `scope`.
    /// If `pin` is set the thread first pins itself on that core position.
    pub(crate) fn start<'env, F>(
        scope: &'scope Scope<'scope, 'env>,
        id: usize,
        pin: Option<usize>,
        f: F,
    ) -> Result<Thread<'scope>, ThreadError>
    where
        F: FnOnce() + Send + 'scope,
    {
        let handle = thread::Builder::new()
            .name(format!("mandel-worker-{}", id))
            .spawn_scoped(scope, move || {
                if let Some(position) = pin {
                    pin_current(id, position);
                }
                trace!("Thread[{}] started", id);
                (f)();
                trace!("Thread[{}] now will end.", id);
            })
            .map_err(|source| ThreadError::Spawn { id, source })?;

        Ok(Thread {
            id,
            handle: Some(handle),
        })
    }

    /// Block until the thread ends.
    pub(crate) fn wait(mut self) -> Result<(), ThreadError> {
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| {
                error!("Thread[{}] panicked.", self.id);
                ThreadError::Join { id: self.id }
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn id(&self) -> usize {
        self.id
    }
}

/// Pin the current thread on the core at `position`.
/// If we can't pin the thread, maybe because the cpu has less cores than
/// required, we proceed without pinning it.
fn pin_current(id: usize, position: usize) {
    let core = core_affinity::get_core_ids().and_then(|mut core_ids| {
        if position < core_ids.len() {
            Some(core_ids.remove(position))
        } else {
            None
        }
    });
    match core {
        Some(core) => {
            if core_affinity::set_for_current(core) {
                trace!("Thread[{}] correctly pinned on {}!", id, core.id);
            } else {
                error!("Thread pinning for thread[{}] failed!", id);
            }
        }
        None => error!("Cannot pin thread[{}] in the choosen position {}.", id, position),
    }
}
