//! Time remapping from scene playback time to index time.
//!
//! A [`Timing`](crate::Timing) wraps one [`TimeMapping`](crate::TimeMapping) policy and
//! tracks the state of the frame currently being drawn. Policies compose with
//! [`combine_timings`](crate::combine_timings) and can be described as data with
//! [`TimingDef`](crate::TimingDef).

/// Combined timings played back to back.
pub mod combine;
/// Serializable timing definitions.
pub mod def;
pub(crate) mod invert;
/// Live timing state and inverse lookup.
pub mod live;
/// Linear and logarithmic mapping policies.
pub mod mapping;
/// Repeating sweeps, including the rotating-view spin.
pub mod periodic;
