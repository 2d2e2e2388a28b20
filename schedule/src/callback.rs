use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Error type a fallible callback may return.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Return type of a fallible callback.
pub type CallbackResult = Result<(), CallbackError>;

type CallbackFn = dyn Fn() -> CallbackResult + Send + Sync;

struct CallbackInner {
    name: Option<Cow<'static, str>>,
    func: Box<CallbackFn>,
}

/// A schedulable callback with reference identity.
///
/// Clones share identity: registering a clone of an already registered
/// callback is a no-op, and any clone can be used to unregister it. Two
/// callbacks created from identical closures are distinct.
#[derive(Clone)]
pub struct Callback(Arc<CallbackInner>);

impl Callback {
    /// Wraps an infallible closure.
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self::from_parts(None, Box::new(move || {
            f();
            Ok(())
        }))
    }

    /// Wraps a closure whose `Err` is reported as a fault during dispatch.
    pub fn fallible(f: impl Fn() -> CallbackResult + Send + Sync + 'static) -> Self {
        Self::from_parts(None, Box::new(f))
    }

    /// Like [`new`](Self::new), with a name used in fault logs.
    pub fn named(name: impl Into<Cow<'static, str>>, f: impl Fn() + Send + Sync + 'static) -> Self {
        Self::from_parts(
            Some(name.into()),
            Box::new(move || {
                f();
                Ok(())
            }),
        )
    }

    /// Like [`fallible`](Self::fallible), with a name used in fault logs.
    pub fn named_fallible(
        name: impl Into<Cow<'static, str>>,
        f: impl Fn() -> CallbackResult + Send + Sync + 'static,
    ) -> Self {
        Self::from_parts(Some(name.into()), Box::new(f))
    }

    fn from_parts(name: Option<Cow<'static, str>>, func: Box<CallbackFn>) -> Self {
        Self(Arc::new(CallbackInner { name, func }))
    }

    /// Debug name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// Returns `true` if both values refer to the same callback.
    pub fn same(&self, other: &Callback) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Invokes the callback, converting an error return or a panic into a
    /// [`CallbackFault`].
    pub fn invoke(&self) -> Result<(), CallbackFault> {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.0.func)())) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(error)) => Err(CallbackFault::Error(error)),
            Err(payload) => Err(CallbackFault::Panic(panic_message(payload.as_ref()))),
        }
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Callback {}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("name", &self.name())
            .field("ptr", &Arc::as_ptr(&self.0))
            .finish()
    }
}

/// A fault raised by a callback during dispatch.
#[derive(Debug, thiserror::Error)]
pub enum CallbackFault {
    /// The callback returned `Err`.
    #[error("callback returned an error: {0}")]
    Error(CallbackError),
    /// The callback panicked.
    #[error("callback panicked: {0}")]
    Panic(String),
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
