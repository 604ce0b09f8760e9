//! Version stamps and memoized values.
//!
//! Every node of a scene stores the stamp of its last change. Derived values are
//! stored in [`Memo`]s along with the stamp they were computed from; reading a memo
//! with a newer stamp recomputes the value, reading it with the same stamp returns the
//! stored value.
//!
//! Stamps are issued by a single [`VersionCounter`] per scene, so the maximum of the
//! stamps of several nodes changes whenever any of them changes. This is what allows
//! keying a value on a whole chain of ancestors.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A version stamp.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u64);

impl Version {
    /// Older than any stamp issued by a counter.
    pub const INITIAL: Version = Version(0);

    #[inline]
    pub fn to_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Issues strictly increasing version stamps.
#[derive(Clone, Debug, Default)]
pub struct VersionCounter {
    last: u64,
}

impl VersionCounter {
    pub fn new() -> Self {
        VersionCounter::default()
    }

    /// A stamp newer than every stamp issued before.
    #[inline]
    pub fn next(&mut self) -> Version {
        self.last += 1;
        Version(self.last)
    }

    /// The most recent stamp.
    #[inline]
    pub fn current(&self) -> Version {
        Version(self.last)
    }
}

/// A lazily recomputed value keyed by a version stamp.
pub struct Memo<T> {
    entry: RefCell<Option<(Version, Rc<T>)>>,
}

impl<T> Memo<T> {
    pub fn new() -> Self {
        Memo {
            entry: RefCell::new(None),
        }
    }

    /// Returns the stored value if it was computed for `version`, otherwise computes,
    /// stores and returns a new one.
    ///
    /// `compute` may read other memos but not this one.
    pub fn get_or_update(&self, version: Version, compute: impl FnOnce() -> T) -> Rc<T> {
        if let Some((v, value)) = &*self.entry.borrow() {
            if *v == version {
                return Rc::clone(value);
            }
        }

        let value = Rc::new(compute());
        *self.entry.borrow_mut() = Some((version, Rc::clone(&value)));

        value
    }

    /// Same as `get_or_update` with a fallible computation. Errors are not stored.
    pub fn try_get_or_update<E>(
        &self,
        version: Version,
        compute: impl FnOnce() -> Result<T, E>,
    ) -> Result<Rc<T>, E> {
        if let Some((v, value)) = &*self.entry.borrow() {
            if *v == version {
                return Ok(Rc::clone(value));
            }
        }

        let value = Rc::new(compute()?);
        *self.entry.borrow_mut() = Some((version, Rc::clone(&value)));

        Ok(value)
    }

    /// Whether a value computed for `version` is stored.
    pub fn is_fresh(&self, version: Version) -> bool {
        matches!(&*self.entry.borrow(), Some((v, _)) if *v == version)
    }

    /// The stored value, fresh or not.
    pub fn peek(&self) -> Option<Rc<T>> {
        self.entry
            .borrow()
            .as_ref()
            .map(|(_, value)| Rc::clone(value))
    }

    /// The version the stored value was computed for.
    pub fn version(&self) -> Option<Version> {
        self.entry.borrow().as_ref().map(|(v, _)| *v)
    }

    pub fn invalidate(&self) {
        *self.entry.borrow_mut() = None;
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Memo::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &*self.entry.borrow() {
            Some((version, value)) => write!(f, "Memo({}, {:?})", version, value),
            None => write!(f, "Memo(None)"),
        }
    }
}

impl<T> Clone for Memo<T> {
    fn clone(&self) -> Self {
        Memo {
            entry: RefCell::new(self.entry.borrow().clone()),
        }
    }
}

/// What changed on a node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dirty {
    /// The transform properties of the node.
    pub transform: bool,
    /// What the node draws: its path, style, size, text or children.
    pub content: bool,
}

impl Dirty {
    pub const NONE: Dirty = Dirty {
        transform: false,
        content: false,
    };
    pub const TRANSFORM: Dirty = Dirty {
        transform: true,
        content: false,
    };
    pub const CONTENT: Dirty = Dirty {
        transform: false,
        content: true,
    };
    pub const ALL: Dirty = Dirty {
        transform: true,
        content: true,
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.transform && !self.content
    }
}

impl std::ops::BitOr for Dirty {
    type Output = Dirty;
    fn bitor(self, other: Dirty) -> Dirty {
        Dirty {
            transform: self.transform || other.transform,
            content: self.content || other.content,
        }
    }
}

#[test]
fn counter_is_monotonic() {
    let mut counter = VersionCounter::new();
    let a = counter.next();
    let b = counter.next();
    assert!(Version::INITIAL < a);
    assert!(a < b);
    assert_eq!(counter.current(), b);
}

#[test]
fn memo_reuses_values() {
    let mut counter = VersionCounter::new();
    let v1 = counter.next();
    let memo = Memo::new();
    let mut calls = 0;

    let a = memo.get_or_update(v1, || {
        calls += 1;
        42
    });
    let b = memo.get_or_update(v1, || {
        calls += 1;
        0
    });
    assert_eq!(calls, 1);
    assert!(Rc::ptr_eq(&a, &b));
    assert!(memo.is_fresh(v1));

    let v2 = counter.next();
    assert!(!memo.is_fresh(v2));
    let c = memo.get_or_update(v2, || 7);
    assert_eq!(*c, 7);
    assert_eq!(memo.version(), Some(v2));
    assert!(!Rc::ptr_eq(&a, &c));

    memo.invalidate();
    assert!(memo.peek().is_none());
}

#[test]
fn memo_does_not_store_errors() {
    let memo: Memo<i32> = Memo::new();
    let v = Version(3);
    assert_eq!(memo.try_get_or_update(v, || Err("nope")), Err("nope"));
    assert!(memo.peek().is_none());
    assert_eq!(*memo.try_get_or_update::<()>(v, || Ok(1)).unwrap(), 1);
    assert!(memo.is_fresh(v));
}

#[test]
fn dirty_flags() {
    assert!(Dirty::NONE.is_empty());
    assert_eq!(Dirty::TRANSFORM | Dirty::CONTENT, Dirty::ALL);
}
