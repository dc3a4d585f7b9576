//! Which primitive layers a buffer build emits

use bitflags::bitflags;

bitflags! {
    /// Layers of a compound that get draw groups
    ///
    /// Faces are triangle groups, edges and hull are line groups and points
    /// is a single point group over every vertex.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DrawLayers: u8 {
        /// Filled faces, one group per sub-solid
        const FACES = 1 << 0;
        /// Sub-solid wireframe
        const EDGES = 1 << 1;
        /// Host solid wireframe
        const HULL = 1 << 2;
        /// Vertex markers
        const POINTS = 1 << 3;
    }
}

impl DrawLayers {
    /// Build from individual switches, as stored in configuration
    pub fn from_switches(faces: bool, edges: bool, hull: bool, points: bool) -> Self {
        let mut layers = DrawLayers::empty();
        layers.set(DrawLayers::FACES, faces);
        layers.set(DrawLayers::EDGES, edges);
        layers.set(DrawLayers::HULL, hull);
        layers.set(DrawLayers::POINTS, points);
        layers
    }
}

impl Default for DrawLayers {
    fn default() -> Self {
        DrawLayers::FACES | DrawLayers::EDGES
    }
}
