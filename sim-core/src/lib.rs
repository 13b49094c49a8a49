//! Core engine of the nodiverse, a bounded 2-D world of colliding discs.
//!
//! Main components:
//! - [`vector`]: plain 2-D vector helpers.
//! - [`force`]: force sources attached to bodies (idle boost, friction).
//! - [`body`]: circular bodies and their overlap predicate.
//! - [`boundary`]: canvas walls and the elastic boundary impulse.
//! - [`overlap_buffer`]: per-tick scratch buffer of overlap groups.
//! - [`phases`]: the phases of one physics tick.
//! - [`nodiverse`]: the engine that owns bodies, clocks, and tick state.
//! - [`looper`]: fixed-period physics clock.
//! - [`render`]: the renderer collaborator.
//! - [`diagnostics`]: the diagnostics sink and bounded sample history.
//! - [`config`]: startup configuration.
//! - [`error`]: the shared error type.
//! - [`types`]: shared ids.

pub mod body;
pub mod boundary;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod force;
pub mod looper;
pub mod nodiverse;
pub mod overlap_buffer;
pub mod phases;
pub mod render;
pub mod types;
pub mod vector;

pub use error::{NodiverseError, Result};
pub use nodiverse::Nodiverse;
