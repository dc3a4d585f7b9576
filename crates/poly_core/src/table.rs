//! Decomposition tables
//!
//! A table lists which host-vertex indices form the faces of each sub-solid,
//! which chiral faces pair up across a compound, and which edges trace the
//! host solid's hull. Tables are plain data and can be stored as RON.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceClass;
use crate::solid::SolidFamily;
use crate::subsolid::{Edge, Face, SubSolid};

/// A right-handed face and the left-handed face sharing its plane
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FacePairing {
    pub right: Face,
    pub left: Face,
}

impl FacePairing {
    pub fn new(right: impl Into<Face>, left: impl Into<Face>) -> Self {
        Self {
            right: right.into(),
            left: left.into(),
        }
    }
}

/// Static data describing one compound over one host solid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompoundTable {
    /// Compound name
    pub name: String,
    /// Host solid the indices refer to
    pub family: SolidFamily,
    /// Colored face groups, in draw order
    pub groups: Vec<SubSolid>,
    /// Total face count across all groups
    pub expected_faces: usize,
    /// Coplanar right/left face pairings (chiral compounds only)
    #[serde(default)]
    pub pairings: Vec<FacePairing>,
    /// Hull wireframe of the host solid
    #[serde(default)]
    pub hull_edges: Vec<Edge>,
    /// Distance class every hull edge must have
    #[serde(default)]
    pub hull_class: Option<DistanceClass>,
}

impl CompoundTable {
    pub fn new(name: impl Into<String>, family: SolidFamily, expected_faces: usize) -> Self {
        Self {
            name: name.into(),
            family,
            groups: Vec::new(),
            expected_faces,
            pairings: Vec::new(),
            hull_edges: Vec::new(),
            hull_class: None,
        }
    }

    pub fn with_group(mut self, group: SubSolid) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_pairing(mut self, pairing: FacePairing) -> Self {
        self.pairings.push(pairing);
        self
    }

    /// Set the hull wireframe; edges are stored in canonical order
    pub fn with_hull(mut self, edges: &[(usize, usize)], class: DistanceClass) -> Self {
        self.hull_edges = edges.iter().map(|&(a, b)| Edge::new(a, b)).collect();
        self.hull_class = Some(class);
        self
    }

    /// Look up a group by name
    pub fn group(&self, name: &str) -> Option<&SubSolid> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Faces across all groups
    pub fn face_count(&self) -> usize {
        self.groups.iter().map(|g| g.faces.len()).sum()
    }

    /// Parse a table from RON text
    pub fn from_ron_str(s: &str) -> Result<Self, TableError> {
        Ok(ron::from_str(s)?)
    }

    /// Serialize to pretty RON
    pub fn to_ron_string(&self) -> Result<String, TableError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Load a table from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Save the table to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let contents = self.to_ron_string()?;
        fs::write(path, contents)?;
        Ok(())
    }
}

/// Error reading or writing a table file
#[derive(Debug)]
pub enum TableError {
    /// IO error
    Io(io::Error),
    /// RON parse error
    Parse(ron::error::SpannedError),
    /// RON serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for TableError {
    fn from(e: io::Error) -> Self {
        TableError::Io(e)
    }
}

impl From<ron::error::SpannedError> for TableError {
    fn from(e: ron::error::SpannedError) -> Self {
        TableError::Parse(e)
    }
}

impl From<ron::Error> for TableError {
    fn from(e: ron::Error) -> Self {
        TableError::Serialize(e)
    }
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::Io(e) => write!(f, "IO error: {}", e),
            TableError::Parse(e) => write!(f, "Parse error: {}", e),
            TableError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Io(e) => Some(e),
            TableError::Parse(e) => Some(e),
            TableError::Serialize(e) => Some(e),
        }
    }
}
