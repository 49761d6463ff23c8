//! Utility helpers for tests.
pub mod assertions;
pub mod scenario;

pub use assertions::{assert_mat4_near, assert_vec3_near};
pub use scenario::{press, walking, Key, Script, STEP_SECONDS};
