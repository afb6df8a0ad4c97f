//! Chain several observer / listener implementations behind one.
//!
//! ```
//! use creek_observability::composite_observer;
//! use creek_observability::core::composite::CompositeObserver;
//! use std::sync::Arc;
//!
//! pub trait TaskListener: Send + Sync {
//!     fn task_finished(&self, name: &str, millis: u64);
//! }
//!
//! composite_observer!(TaskListener {
//!     fn task_finished(&self, name: &str, millis: u64);
//! });
//!
//! struct Printer;
//! impl TaskListener for Printer {
//!     fn task_finished(&self, name: &str, millis: u64) {
//!         let _ = (name, millis);
//!     }
//! }
//!
//! let listener: CompositeObserver<dyn TaskListener> =
//!     CompositeObserver::builder(Arc::new(Printer) as Arc<dyn TaskListener>)
//!         .add(Arc::new(Printer))
//!         .build();
//! listener.task_finished("compaction", 12);
//! ```

use std::fmt;
use std::sync::Arc;

/// Calls every delegate, in the order they were added.
pub struct CompositeObserver<O: ?Sized> {
    delegates: Vec<Arc<O>>,
}

impl<O: ?Sized> CompositeObserver<O> {
    /// Start a composite with its first delegate.
    pub fn builder(first: Arc<O>) -> CompositeObserverBuilder<O> {
        CompositeObserverBuilder {
            delegates: vec![first],
        }
    }

    pub fn for_each<F: FnMut(&O)>(&self, mut f: F) {
        for delegate in &self.delegates {
            f(delegate);
        }
    }

    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }
}

impl<O: ?Sized> fmt::Debug for CompositeObserver<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("delegates", &self.delegates.len())
            .finish()
    }
}

pub struct CompositeObserverBuilder<O: ?Sized> {
    delegates: Vec<Arc<O>>,
}

impl<O: ?Sized> CompositeObserverBuilder<O> {
    /// Add another delegate to the end of the chain.
    pub fn add(mut self, observer: Arc<O>) -> Self {
        self.delegates.push(observer);
        self
    }

    pub fn build(self) -> CompositeObserver<O> {
        CompositeObserver {
            delegates: self.delegates,
        }
    }
}

/// Implement an observer trait for `CompositeObserver<dyn Trait>`, forwarding
/// each call to every delegate in order.
///
/// Only methods taking `&self` and returning `()` are accepted. Arguments
/// must be `Clone`, as each delegate receives its own copy. For a trait with
/// supertraits, invoke once per supertrait using `Super for Sub`:
///
/// ```ignore
/// composite_observer!(Observer for ExtendingObserver { fn foo(&self, m: &str); });
/// composite_observer!(ExtendingObserver { fn bar(&self); });
/// ```
#[macro_export]
macro_rules! composite_observer {
    ($trait:ident { $($methods:tt)* }) => {
        $crate::composite_observer!($trait for $trait { $($methods)* });
    };
    ($trait:ident for $target:ident {
        $(fn $method:ident(&self $(, $arg:ident : $ty:ty)* $(,)?);)*
    }) => {
        impl $trait for $crate::core::composite::CompositeObserver<dyn $target> {
            $(
                fn $method(&self $(, $arg: $ty)*) {
                    self.for_each(|delegate| delegate.$method($(::std::clone::Clone::clone(&$arg)),*));
                }
            )*
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    pub trait Observer: Send + Sync {
        fn foo(&self, message: &str);
    }

    pub trait ExtendingObserver: Observer {
        fn bar(&self);
    }

    pub trait ExtendingExtendingObserver: ExtendingObserver {
        fn lar(&self, count: usize, tags: Vec<String>);
    }

    crate::composite_observer!(Observer {
        fn foo(&self, message: &str);
    });

    crate::composite_observer!(Observer for ExtendingExtendingObserver {
        fn foo(&self, message: &str);
    });
    crate::composite_observer!(ExtendingObserver for ExtendingExtendingObserver {
        fn bar(&self);
    });
    crate::composite_observer!(ExtendingExtendingObserver {
        fn lar(&self, count: usize, tags: Vec<String>,);
    });

    struct Recorder {
        id: &'static str,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        fn new(id: &'static str, calls: &Arc<Mutex<Vec<String>>>) -> Arc<Self> {
            Arc::new(Self {
                id,
                calls: Arc::clone(calls),
            })
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(format!("{}:{}", self.id, call));
        }
    }

    impl Observer for Recorder {
        fn foo(&self, message: &str) {
            self.record(format!("foo({})", message));
        }
    }

    impl ExtendingObserver for Recorder {
        fn bar(&self) {
            self.record("bar".to_string());
        }
    }

    impl ExtendingExtendingObserver for Recorder {
        fn lar(&self, count: usize, tags: Vec<String>) {
            self.record(format!("lar({}, {:?})", count, tags));
        }
    }

    #[test]
    fn test_delegates_to_single() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let first: Arc<dyn Observer> = Recorder::new("1", &calls);
        let composite = CompositeObserver::builder(first).build();

        composite.foo("text");

        assert_eq!(*calls.lock().unwrap(), vec!["1:foo(text)"]);
    }

    #[test]
    fn test_delegates_to_multiple_in_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let first: Arc<dyn Observer> = Recorder::new("1", &calls);
        let composite = CompositeObserver::builder(first)
            .add(Recorder::new("2", &calls))
            .add(Recorder::new("3", &calls))
            .build();

        composite.foo("text");

        assert_eq!(
            *calls.lock().unwrap(),
            vec!["1:foo(text)", "2:foo(text)", "3:foo(text)"]
        );
        assert_eq!(composite.len(), 3);
    }

    #[test]
    fn test_handles_supertraits() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let first: Arc<dyn ExtendingExtendingObserver> = Recorder::new("1", &calls);
        let composite = CompositeObserver::builder(first)
            .add(Recorder::new("2", &calls))
            .build();

        composite.foo("blah");
        composite.bar();
        composite.lar(2, vec!["x".to_string()]);

        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                "1:foo(blah)",
                "2:foo(blah)",
                "1:bar",
                "2:bar",
                "1:lar(2, [\"x\"])",
                "2:lar(2, [\"x\"])",
            ]
        );
    }

    #[test]
    fn test_composite_is_usable_as_trait_object() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let first: Arc<dyn Observer> = Recorder::new("1", &calls);
        let composite: Box<dyn Observer> = Box::new(CompositeObserver::builder(first).build());

        composite.foo("boxed");

        assert_eq!(*calls.lock().unwrap(), vec!["1:foo(boxed)"]);
    }

    #[test]
    fn test_debug_output() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let first: Arc<dyn Observer> = Recorder::new("1", &calls);
        let composite = CompositeObserver::builder(first).build();

        assert_eq!(format!("{:?}", composite), "CompositeObserver { delegates: 1 }");
    }
}
