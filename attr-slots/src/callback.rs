//! Synchronous callback invocation
//!
//! [`invoke`] runs a function and hands its result to a callback, both on the
//! caller's thread. Errors from either side are returned as-is.

use std::fmt::Display;

/// Receiver for the result of an invoked function
pub trait Callback<T, E> {
    fn call(&mut self, value: T) -> Result<(), E>;
}

impl<T, E, F> Callback<T, E> for F
where
    F: FnMut(T) -> Result<(), E>,
{
    fn call(&mut self, value: T) -> Result<(), E> {
        self(value)
    }
}

/// Call `function(args)` and pass its result to `callback`
///
/// The callback is not invoked when `function` fails.
///
/// # Example
/// ```
/// use attr_slots::{invoke, CallCounter};
/// use std::convert::Infallible;
///
/// let mut counter = CallCounter::new();
/// let add = |(x, y): (i64, i64)| Ok::<_, Infallible>(x + y);
/// invoke(add, (1, 2), &mut counter).unwrap();
/// assert_eq!(counter.count(), 1);
/// ```
pub fn invoke<A, R, E, F, C>(function: F, args: A, callback: &mut C) -> Result<(), E>
where
    F: FnOnce(A) -> Result<R, E>,
    C: Callback<R, E> + ?Sized,
{
    let result = function(args)?;
    callback.call(result)
}

/// A callback that tallies how many times it was called
///
/// Each call logs the received value and the new count at info level.
/// Calling requires `&mut self`; share a counter across threads only behind a
/// `Mutex` so the increment stays a single read-modify-write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallCounter {
    count: u64,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed calls
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Format the line emitted for a call receiving `x`
    pub fn report(&self, x: impl Display) -> String {
        format!(
            "The result is {}, the function has been called {} times",
            x, self.count
        )
    }
}

impl<T: Display, E> Callback<T, E> for CallCounter {
    fn call(&mut self, value: T) -> Result<(), E> {
        self.count += 1;
        log::info!("{}", self.report(&value));
        Ok(())
    }
}
