//! Startup system
//!
//! Runs the whole kernel once:
//! 1. Pick the decomposition table (built-in or RON file)
//! 2. Generate and optionally validate the host vertex set
//! 3. Partition into a compound
//! 4. Flatten into draw buffers
//!
//! Any failure aborts startup; there is no degraded mode.

use std::fmt;

use poly_core::{
    Compound, CompoundPartitioner, CompoundTable, ConstructionError, DistanceClassifier,
    PartitionError, TableError,
};
use poly_render::{BufferError, GeometryBuffer, Primitive};

use crate::config::AppConfig;

/// Everything the front end needs after startup
pub struct StartupOutput {
    pub compound: Compound,
    pub buffer: GeometryBuffer,
}

/// Builds the compound and its buffers from configuration
pub struct StartupSystem;

impl StartupSystem {
    /// Run the startup pipeline
    pub fn run(config: &AppConfig) -> Result<StartupOutput, StartupError> {
        let table = Self::select_table(config)?;
        log::info!("Building '{}' on the {}", table.name, table.family.name());

        let vertices = table.family.generate();
        let classifier = DistanceClassifier::new(&vertices);
        if config.geometry.validate_symmetry {
            classifier.validate()?;
        }
        if config.debug.dump_distances {
            classifier.log_neighbourhood(config.debug.reference_vertex)?;
        }

        let compound = CompoundPartitioner::new(table)
            .with_edge_policy(config.geometry.edge_policy)
            .partition(&vertices)?;

        let buffer = GeometryBuffer::build(&compound, &config.buffer_options())?;

        log::info!(
            "Ready: {} draw groups ({} triangles, {} lines, {} points)",
            buffer.groups.len(),
            buffer.indices_for(Primitive::Triangles).len() / 3,
            buffer.indices_for(Primitive::Lines).len() / 2,
            buffer.indices_for(Primitive::Points).len()
        );

        Ok(StartupOutput { compound, buffer })
    }

    fn select_table(config: &AppConfig) -> Result<CompoundTable, StartupError> {
        match &config.geometry.table_path {
            Some(path) => {
                log::info!("Loading compound table from {}", path.display());
                Ok(CompoundTable::load(path)?)
            }
            None => Ok(config.geometry.compound.table()),
        }
    }
}

/// Fatal startup failure
#[derive(Debug)]
pub enum StartupError {
    Table(TableError),
    Construction(ConstructionError),
    Partition(PartitionError),
    Buffer(BufferError),
}

impl From<TableError> for StartupError {
    fn from(e: TableError) -> Self {
        StartupError::Table(e)
    }
}

impl From<ConstructionError> for StartupError {
    fn from(e: ConstructionError) -> Self {
        StartupError::Construction(e)
    }
}

impl From<PartitionError> for StartupError {
    fn from(e: PartitionError) -> Self {
        StartupError::Partition(e)
    }
}

impl From<BufferError> for StartupError {
    fn from(e: BufferError) -> Self {
        StartupError::Buffer(e)
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Table(e) => write!(f, "Table error: {}", e),
            StartupError::Construction(e) => write!(f, "Construction error: {}", e),
            StartupError::Partition(e) => write!(f, "Partition error: {}", e),
            StartupError::Buffer(e) => write!(f, "Buffer error: {}", e),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StartupError::Table(e) => Some(e),
            StartupError::Construction(e) => Some(e),
            StartupError::Partition(e) => Some(e),
            StartupError::Buffer(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poly_core::{CompoundKind, EdgePolicy};

    #[test]
    fn test_default_config_starts() {
        let output = StartupSystem::run(&AppConfig::default()).unwrap();
        assert_eq!(output.compound.face_count(), 40);
        // 10 face groups, merged edges, hull
        assert_eq!(output.buffer.groups.len(), 12);
        assert_eq!(output.buffer.vertex_count(), 20);
    }

    #[test]
    fn test_every_builtin_starts() {
        let mut config = AppConfig::default();
        config.debug.dump_distances = true;
        for kind in CompoundKind::ALL {
            config.geometry.compound = kind;
            config.geometry.edge_policy = EdgePolicy::PerGroup;
            let output = StartupSystem::run(&config).unwrap();
            assert_eq!(output.compound.face_count(), kind.expected_faces());
        }
    }

    #[test]
    fn test_bad_reference_vertex_aborts() {
        let mut config = AppConfig::default();
        config.geometry.compound = CompoundKind::Octahedron;
        config.debug.dump_distances = true;
        config.debug.reference_vertex = 6;
        let err = StartupSystem::run(&config).err().unwrap();
        assert!(matches!(
            err,
            StartupError::Construction(ConstructionError::ReferenceOutOfRange { index: 6, .. })
        ));
    }

    #[test]
    fn test_bad_scale_aborts() {
        let mut config = AppConfig::default();
        config.geometry.scale = 0.0;
        let err = StartupSystem::run(&config).err().unwrap();
        assert!(matches!(err, StartupError::Buffer(BufferError::InvalidScale(_))));
        assert!(err.to_string().starts_with("Buffer error:"));
    }

    #[test]
    fn test_missing_table_file_aborts() {
        let mut config = AppConfig::default();
        config.geometry.table_path = Some("/nonexistent/compound.ron".into());
        let err = StartupSystem::run(&config).err().unwrap();
        assert!(matches!(err, StartupError::Table(TableError::Io(_))));
    }

    #[test]
    fn test_table_file_is_used() {
        let path = std::env::temp_dir().join(format!(
            "polycompound_startup_{}.ron",
            std::process::id()
        ));
        CompoundKind::GoldenRectangles.table().save(&path).unwrap();

        let mut config = AppConfig::default();
        config.geometry.table_path = Some(path.clone());
        let output = StartupSystem::run(&config);
        let _ = std::fs::remove_file(&path);

        let output = output.unwrap();
        assert_eq!(output.compound.vertices().len(), 12);
        assert_eq!(output.compound.face_count(), 3);
    }
}
