//! Simulation core of a small first-person escape game.
//!
//! A [`World`] owns every entity through a generation-tagged [`Registry`]
//! and advances them one fixed step at a time from decoded [`TickInput`].
//! Rendering is left to the caller: the world yields model matrices paired
//! with texture handles through the [`DrawSink`] seam.
//!
//! ```
//! use escape::prelude::*;
//!
//! let mut world = World::default();
//! let events = world.tick(&TickInput::idle(1.0 / 60.0));
//! assert!(events.is_empty());
//! let mut calls: Vec<DrawCall> = Vec::new();
//! world.render(&mut calls);
//! assert!(!calls.is_empty());
//! ```
pub mod angles;
pub mod animation;
pub mod camera;
pub mod config;
pub mod constants;
pub mod enemy;
pub mod entity;
pub mod error;
pub mod input;
pub mod interaction;
pub mod logging;
pub mod registry;
pub mod render;
pub mod transform;
pub mod vector_math;
pub mod world;

pub use config::WorldConfig;
pub use entity::{Entity, EntityKind, PickupKind, SubModel, TextureHandle};
pub use error::ConfigError;
pub use input::TickInput;
pub use logging::init as init_logging;
pub use registry::{EntityId, Registry};
pub use render::{DrawCall, DrawSink, Light};
pub use world::{World, WorldEvent};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use escape::prelude::*;
    //! ```

    pub use crate::input::MoveKeys;
    pub use crate::DrawCall;
    pub use crate::DrawSink;
    pub use crate::Entity;
    pub use crate::EntityId;
    pub use crate::TickInput;
    pub use crate::World;
    pub use crate::WorldConfig;
    pub use crate::WorldEvent;
}
