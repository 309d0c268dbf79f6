//! Domain logic for Remote Desk.
//!
//! This module contains pure logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of the application.  Domain code:
//!
//! - Contains the rules that make the system what it is: here, how a point
//!   on the viewer's surface corresponds to a pixel on the controlled screen,
//!   and how a finger gesture becomes a click or a cursor nudge.
//! - Has **no** imports from network libraries, async runtimes, or UI code.
//! - Can be compiled and tested on any platform without any external setup.

/// Coordinate transformation between the local surface and the remote screen.
///
/// See [`resolution::CoordinateMapper`] for the main type.
pub mod resolution;

/// Multi-touch gesture classification.
pub mod touch;
