//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`POLY_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

use poly_core::{CompoundKind, EdgePolicy, Rgba8};
use poly_render::{BufferOptions, DrawLayers, SpinAnimation};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Which compound to build and how
    #[serde(default)]
    pub geometry: GeometryConfig,
    /// Primitive layers to emit
    #[serde(default)]
    pub layers: LayerConfig,
    /// Colors for layers not tied to a group
    #[serde(default)]
    pub colors: ColorConfig,
    /// Spin animation
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`POLY_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // POLY_GEOMETRY__COMPOUND=five_cubes -> geometry.compound = "five_cubes"
        figment = figment.merge(Env::prefixed("POLY_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Buffer settings for [`poly_render::GeometryBuffer::build`]
    pub fn buffer_options(&self) -> BufferOptions {
        BufferOptions {
            scale: self.geometry.scale,
            layers: self.layers.to_draw_layers(),
            edge_color: Rgba8(self.colors.edge),
            hull_color: Rgba8(self.colors.hull),
            point_color: Rgba8(self.colors.point),
        }
    }
}

/// Geometry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Built-in compound to draw
    pub compound: CompoundKind,
    /// Uniform scale applied to positions
    pub scale: f32,
    /// How shared wireframe edges are emitted
    pub edge_policy: EdgePolicy,
    /// RON table to load instead of the built-in compound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_path: Option<PathBuf>,
    /// Check the vertex set's symmetry before partitioning
    pub validate_symmetry: bool,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            compound: CompoundKind::TenTetrahedra,
            scale: 100.0,
            edge_policy: EdgePolicy::Merged,
            table_path: None,
            validate_symmetry: true,
        }
    }
}

/// Layer switches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerConfig {
    pub faces: bool,
    pub edges: bool,
    pub hull: bool,
    pub points: bool,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            faces: true,
            edges: true,
            hull: true,
            points: false,
        }
    }
}

impl LayerConfig {
    pub fn to_draw_layers(&self) -> DrawLayers {
        DrawLayers::from_switches(self.faces, self.edges, self.hull, self.points)
    }
}

/// Colors as RGBA bytes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    /// Merged wireframe
    pub edge: [u8; 4],
    /// Host solid wireframe
    pub hull: [u8; 4],
    /// Vertex markers
    pub point: [u8; 4],
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            edge: Rgba8::PINK.to_bytes(),
            hull: Rgba8::SILVER.to_bytes(),
            point: Rgba8::BLACK.to_bytes(),
        }
    }
}

/// Animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Radians per second
    pub speed: f32,
    /// Relative rotation rate about X, Y and Z
    pub axis_rates: [f32; 3],
    /// Model translation [x, y, z]
    pub translation: [f32; 3],
    /// Frames stepped by the headless preview
    pub preview_frames: u32,
    /// Seconds per preview frame
    pub frame_dt: f32,
    /// Largest single time step
    pub max_dt: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            axis_rates: [1.0, 0.3, 0.7],
            translation: [640.0, 360.0, 0.0],
            preview_frames: 3,
            frame_dt: 1.0 / 60.0,
            max_dt: 0.1,
        }
    }
}

impl AnimationConfig {
    pub fn to_spin(&self) -> SpinAnimation {
        SpinAnimation::new(self.speed, self.axis_rates, self.translation)
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log the reference vertex's distance table
    pub dump_distances: bool,
    /// Vertex whose neighbourhood is dumped
    pub reference_vertex: usize,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            dump_distances: false,
            reference_vertex: 0,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
