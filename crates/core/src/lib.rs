//! Composition coaching core: compares a live camera frame against a
//! reference photo and produces ordered, actionable corrections.
//!
//! The pipeline consumes pre-extracted pose keypoints and an optional
//! background-compression scalar (see [`providers`] for the boundary
//! contracts), so a comparison is a pure in-memory computation: no I/O,
//! no shared state, safe to run once per preview frame.
//!
//! Flow: [`geometry`] derives boxes, margins, and centers from a
//! [`shared::keypoints::KeypointSet`]; [`framing`] classifies the shot
//! and scores subject size and margin balance; [`gates`] runs the
//! ordered gate sequence (aspect ratio, framing, composition,
//! compression, pose) and [`feedback`] renders the result into
//! prioritized instructions.

pub mod feedback;
pub mod framing;
pub mod gates;
pub mod geometry;
pub mod providers;
pub mod shared;

pub use gates::evaluator::{compare, CompareError, CompareMode, Comparison};
pub use gates::report::{GateName, GateReport, GateStatus};
pub use shared::config::CompareConfig;
pub use shared::frame::{FrameAnalysis, FrameShape};
pub use shared::keypoints::{BodyKeypoints, Keypoint, KeypointSet};
