// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (default thresholds)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Procedural virtual cameras: staged pipelines, input axes, blending and
//! update-clock tracking.
//!
//! A host registers [`vcam::VirtualCamera`]s with a
//! [`brain::CinemachineBrain`], writes target poses into a
//! [`tracking::TransformStore`], and feeds the brain one
//! [`util::frame_timing::FrameTick`] at a time. The brain picks the live
//! camera, runs every camera's Body, Aim and Noise stages on the clock its
//! target moves on, blends between cameras, and exposes the final
//! [`camera::CameraState`].
//!
//! # Key entry points
//!
//! - [`brain::CinemachineBrain`] - camera selection, blending, output
//! - [`vcam::VirtualCamera`] - one camera and its pipeline components
//! - [`pipeline`] - the stage trait and built-in components (including
//!   [`pipeline::Pov`])
//! - [`axis::AxisState`] and [`axis::Recentering`] - damped input axes
//! - [`tracking::UpdateTracker`] - Normal vs Fixed clock inference
//! - [`options::Options`] - TOML rig configuration
//!
//! # Conventions
//!
//! Right-handed, `+Y` up, cameras look down `+Z`. Angles in options and
//! axes are degrees; `glam` math works in radians.
//!
//! # Example
//!
//! ```
//! use cinemachine::brain::CinemachineBrain;
//! use cinemachine::axis::NoInput;
//! use cinemachine::pipeline::HardLookAt;
//! use cinemachine::tracking::{Pose, TransformStore};
//! use cinemachine::util::frame_timing::FrameClock;
//! use cinemachine::vcam::VirtualCamera;
//! use glam::Vec3;
//!
//! let mut transforms = TransformStore::new();
//! let player = transforms.create(Pose::from_position(Vec3::new(0.0, 0.0, 10.0)));
//!
//! let mut brain = CinemachineBrain::default();
//! brain
//!     .add_camera(VirtualCamera::new("main").with_look_at(player).with_component(HardLookAt))
//!     .unwrap();
//!
//! let mut clock = FrameClock::new(1.0 / 50.0);
//! for tick in clock.advance(1.0 / 60.0) {
//!     brain.tick(tick, &transforms, &NoInput);
//! }
//! assert_eq!(brain.active_camera(), Some("main"));
//! assert!((brain.output().forward() - Vec3::Z).length() < 1e-4);
//! ```

pub mod axis;
pub mod brain;
pub mod camera;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod tracking;
pub mod util;
pub mod vcam;

pub use brain::{BrainEvent, CinemachineBrain};
pub use camera::CameraState;
pub use error::CinemachineError;
pub use options::Options;
pub use vcam::VirtualCamera;
