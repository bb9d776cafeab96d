//! Verified wrapper.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Deref;

/// A value that has been confirmed against the outside world.
///
/// A `Verified<T>` can only come from a successful `verify`/`validate` call
/// on the wrapped value object, or from [`Verified::from_trusted_storage`]
/// when loading data that was verified before it was persisted. There is no
/// way to verify a `Verified<T>` again.
///
/// # Example
///
/// ```
/// use job_board_core::domain::{CompanyDomain, Verified};
///
/// let domain = CompanyDomain::new("example.com").unwrap();
/// let loaded = Verified::from_trusted_storage(domain.clone());
/// assert_eq!(*loaded, domain);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Verified<T>(T);

impl<T> Verified<T> {
    pub(crate) fn new(value: T) -> Self {
        Self(value)
    }

    /// Wrap a value read back from storage.
    ///
    /// Only the persistence boundary should call this: storage refuses to
    /// hold unverified addresses and domains, so anything read from it was
    /// verified on the way in.
    pub fn from_trusted_storage(value: T) -> Self {
        Self(value)
    }

    /// Borrow the verified value.
    pub fn get(&self) -> &T {
        &self.0
    }

    /// Convert into the underlying value, dropping the verified marker.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Verified<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> AsRef<T> for Verified<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Serializes exactly like the inner value
impl<T: Serialize> Serialize for Verified<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T: fmt::Display> fmt::Display for Verified<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
