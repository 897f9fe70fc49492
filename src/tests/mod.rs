//! # Scenario Tests
//!
//! End-to-end checks that drive the library the way the simulator binary
//! does: wake events through the navigator, state through a store, and the
//! celestial engine into a rendered frame.

mod scenario_tests;
