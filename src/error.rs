use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// [`MatrixConfig::scroll_step`](crate::MatrixConfig::scroll_step) was zero.
    #[display("scroll step must be at least one pixel")]
    InvalidScrollStep,

    // The writer's own error value is discarded.
    /// The LED writer failed to push a frame.
    #[display("LED writer rejected the frame")]
    PixelWrite,
}
