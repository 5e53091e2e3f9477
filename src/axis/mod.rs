//! Input axes: damped scalar channels, their recentering, and the named
//! input source they read from.

/// Named input-axis providers.
pub mod input;
/// Idle-triggered return to a target value.
pub mod recentering;
/// The damped, range-limited axis itself.
pub mod state;

pub use input::{AxisInputProvider, InputAxisMap, NoInput};
pub use recentering::Recentering;
pub use state::{AxisRange, AxisState, SpeedMode};
