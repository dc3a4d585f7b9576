//! Polyhedral compound kernel
//!
//! Builds the vertex sets of the regular solids in closed form, classifies
//! every vertex-pair distance against golden-ratio class centers, and
//! partitions a vertex set into colored sub-solids from a static
//! decomposition table.
//!
//! ## Pipeline
//!
//! 1. [`VertexSet::generate`] produces the host solid's vertices in a fixed order
//! 2. [`DistanceClassifier::validate`] checks the set's symmetry
//! 3. [`CompoundPartitioner::partition`] validates a [`CompoundTable`] and
//!    produces a [`Compound`]
//!
//! Built-in tables are listed by [`CompoundKind`].

mod catalogue;
mod color;
mod distance;
mod error;
mod partition;
mod solid;
mod subsolid;
mod table;
mod validator;

pub use catalogue::CompoundKind;
pub use color::Rgba8;
pub use distance::{
    ClassifiedDistance, DistanceClass, DistanceClassifier, SymmetryProfile, CLASS_TOLERANCE,
    SPHERE_TOLERANCE,
};
pub use error::{ConstructionError, PartitionError};
pub use partition::{
    verify_unique_edges, Compound, CompoundPartitioner, EdgePolicy, FacePair, PartitionedGroup,
};
pub use solid::{SolidFamily, VertexSet};
pub use subsolid::{Chirality, Edge, Face, SubSolid, SubSolidKind};
pub use table::{CompoundTable, FacePairing, TableError};
pub use validator::{
    face_plane, is_planar, CompoundValidator, ResolvedPairing, GEOMETRY_TOLERANCE,
};
