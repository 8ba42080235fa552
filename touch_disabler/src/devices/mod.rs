//! Touch device implementations.
//!
//! - [`simulation`] - Software touch device for development and testing
//!
//! Real device drivers implement `touch_common::device::TouchDevice`, keep
//! their device in an `Arc`, and register `Arc::downgrade(&device)` with the
//! controller.

pub mod simulation;

pub use simulation::SimulatedTouchDevice;
