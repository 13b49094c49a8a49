/// Identifier for a body in a [`crate::nodiverse::Nodiverse`].
///
/// This is an index into `Nodiverse::bodies`, assigned once at creation and
/// stable for the lifetime of the simulation.
pub type BodyId = usize;

/// Opaque handle to a drawable owned by a [`crate::render::Renderer`].
///
/// Bodies only reference their drawable; the renderer owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DrawableId(pub usize);
