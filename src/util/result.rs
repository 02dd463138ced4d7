use std::error::Error;

pub(crate) trait ResultExtension<T, E: Error> {
    /// Unwraps the value, panicking with the [`Display`](std::fmt::Display) message of the error
    /// rather than its [`Debug`](std::fmt::Debug) form.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T, E> for Result<T, E> {
    fn throw(self) -> T {
        self.unwrap_or_else(|error| panic!("{error}"))
    }
}
