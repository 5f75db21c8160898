//! Subject lookups.
//!
//! Two `SubjectLookup` implementations cover the common hosting patterns:
//!
//! - `FixedSubjectLookup` always resolves the one subject it was built with.
//!   Use it when the host already has the subject in hand, e.g. when building
//!   a per-request template context.
//! - `ThreadSubjectLookup` resolves whatever subject the host bound to the
//!   calling thread with `ThreadSubjectLookup::bind`. Bindings are per
//!   thread and never visible to other threads.

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, warn};

use warden_contracts::error::{WardenError, WardenResult};

use crate::traits::{Subject, SubjectLookup};

// ── Fixed lookup ──────────────────────────────────────────────────────────────

/// A lookup that always returns the same subject.
#[derive(Clone)]
pub struct FixedSubjectLookup {
    subject: Arc<dyn Subject>,
}

impl FixedSubjectLookup {
    pub fn new<S: Subject + 'static>(subject: S) -> Self {
        Self {
            subject: Arc::new(subject),
        }
    }

    /// Wrap a subject that is already shared.
    pub fn from_arc(subject: Arc<dyn Subject>) -> Self {
        Self { subject }
    }
}

impl SubjectLookup for FixedSubjectLookup {
    fn current(&self) -> WardenResult<Arc<dyn Subject>> {
        Ok(Arc::clone(&self.subject))
    }
}

// ── Thread-bound lookup ───────────────────────────────────────────────────────

/// One `bind` call: the guard that owns it removes exactly this frame.
struct Binding {
    frame: u64,
    subject: Arc<dyn Subject>,
}

thread_local! {
    static BINDINGS: RefCell<Vec<Binding>> = const { RefCell::new(Vec::new()) };
    static NEXT_FRAME: Cell<u64> = const { Cell::new(0) };
}

/// A lookup that resolves the subject bound to the calling thread.
///
/// ```rust,ignore
/// let queries = AuthorizationQueries::new(ThreadSubjectLookup);
///
/// let _guard = ThreadSubjectLookup::bind(subject);
/// assert!(queries.is_user()?);
/// // guard dropped here: the previous binding (if any) is visible again
/// ```
///
/// `current()` returns `WardenError::NoSubjectBound` when nothing is bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSubjectLookup;

impl ThreadSubjectLookup {
    /// Bind `subject` to the calling thread until the returned guard drops.
    ///
    /// Binds nest: the most recent live binding is the current subject.
    /// Each guard removes only its own binding, so dropping guards out of
    /// order never leaves a released subject bound.
    pub fn bind(subject: Arc<dyn Subject>) -> SubjectGuard {
        let frame = NEXT_FRAME.with(|next| {
            let frame = next.get();
            next.set(frame.wrapping_add(1));
            frame
        });
        let depth = BINDINGS.with(|bindings| {
            let mut bindings = bindings.borrow_mut();
            bindings.push(Binding { frame, subject });
            bindings.len()
        });

        debug!(
            thread = ?std::thread::current().id(),
            frame,
            depth,
            "subject bound to thread"
        );

        SubjectGuard {
            frame,
            _not_send: PhantomData,
        }
    }

    /// Run `f` with `subject` bound to the calling thread.
    pub fn with_subject<R>(subject: Arc<dyn Subject>, f: impl FnOnce() -> R) -> R {
        let _guard = Self::bind(subject);
        f()
    }

    /// Return true if a subject is bound to the calling thread.
    pub fn is_bound() -> bool {
        BINDINGS.with(|bindings| !bindings.borrow().is_empty())
    }
}

impl SubjectLookup for ThreadSubjectLookup {
    fn current(&self) -> WardenResult<Arc<dyn Subject>> {
        BINDINGS
            .with(|bindings| {
                bindings
                    .borrow()
                    .last()
                    .map(|binding| Arc::clone(&binding.subject))
            })
            .ok_or(WardenError::NoSubjectBound)
    }
}

/// Removes its binding from the calling thread when dropped.
///
/// The guard must be dropped on the thread that created it, so it is
/// neither `Send` nor `Sync`.
#[must_use = "the subject is unbound as soon as the guard is dropped"]
pub struct SubjectGuard {
    frame: u64,
    _not_send: PhantomData<Rc<()>>,
}

impl Drop for SubjectGuard {
    fn drop(&mut self) {
        let frame = self.frame;

        // Thread-local storage may already be gone during thread teardown.
        let released = BINDINGS.try_with(|bindings| {
            let mut bindings = bindings.borrow_mut();
            let position = bindings.iter().rposition(|binding| binding.frame == frame)?;
            let top = position + 1 == bindings.len();
            let binding = bindings.remove(position);
            Some((top, bindings.len(), binding))
        });

        // The subject is dropped here, after the stack borrow ends.
        match released {
            Ok(Some((true, depth, _))) => debug!(
                thread = ?std::thread::current().id(),
                frame,
                depth,
                "subject binding released"
            ),
            Ok(Some((false, depth, _))) => warn!(
                thread = ?std::thread::current().id(),
                frame,
                depth,
                "subject guard released out of order"
            ),
            Ok(None) | Err(_) => {}
        }
    }
}
