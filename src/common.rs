// src/common.rs
//
// common type aliases and result enums (avoids circular imports)

use std::fmt::Debug;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file paths, counters
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

// TODO: use `std::path::Path` for `FPath`
/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;
pub type FPaths = Vec<FPath>;

/// Index into the user-passed sequence of log file paths; the stable identity
/// of one log source for the lifetime of a merge run.
pub type PathId = usize;

/// A general-purpose counter, named for readability.
pub type Count = u64;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// custom Result enum for "next thing" functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `Result`-like enum with an extra state, `Done`, for functions where
/// running out of data is a normal outcome and not an error.
///
/// End of data is signaled by value and checked by the caller;
/// it is never signaled by panicking or by an `Err` variant.
#[derive(Debug, PartialEq)]
pub enum ResultNext<T, E> {
    /// Contains the success data.
    Found(T),

    /// No more data will ever be returned, and no bad errors happened.
    Done,

    /// Contains the error value, something bad happened.
    Err(E),
}

impl<T, E> ResultNext<T, E> {
    /// Returns `true` if the result is [`Found`].
    ///
    /// [`Found`]: self::ResultNext#variant.Found
    #[inline(always)]
    pub const fn is_found(&self) -> bool {
        matches!(*self, ResultNext::Found(_))
    }

    /// Returns `true` if the result is [`Done`].
    ///
    /// [`Done`]: self::ResultNext#variant.Done
    #[inline(always)]
    pub const fn is_done(&self) -> bool {
        matches!(*self, ResultNext::Done)
    }

    /// Returns `true` if the result is [`Err`].
    ///
    /// [`Err`]: self::ResultNext#variant.Err
    #[must_use = "if you intended to assert that this is err, consider `.unwrap_err()` instead"]
    #[inline(always)]
    pub const fn is_err(&self) -> bool {
        matches!(*self, ResultNext::Err(_))
    }

    /// Converts from `ResultNext<T, E>` to [`Option<T>`],
    /// consuming `self`, and discarding the error, if any.
    #[allow(dead_code)]
    #[inline(always)]
    pub fn found(self) -> Option<T> {
        match self {
            ResultNext::Found(x) => Some(x),
            ResultNext::Done => None,
            ResultNext::Err(_) => None,
        }
    }
}

impl<T, E> ResultNext<T, E>
where
    E: Debug,
{
    /// Returns the contained [`Found`] value, consuming `self`.
    ///
    /// # Panics
    ///
    /// Panics if the value is a [`Done`] or [`Err`].
    ///
    /// [`Found`]: self::ResultNext#variant.Found
    /// [`Done`]: self::ResultNext#variant.Done
    /// [`Err`]: self::ResultNext#variant.Err
    #[allow(dead_code)]
    #[inline(always)]
    pub fn unwrap(self) -> T {
        match self {
            ResultNext::Found(val) => val,
            ResultNext::Done => panic!("called ResultNext::unwrap() on a `Done` value"),
            ResultNext::Err(err) => {
                panic!("called ResultNext::unwrap() on an `Err` value: {:?}", err)
            }
        }
    }
}
