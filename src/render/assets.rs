//=========================================================================
// Render Assets
//=========================================================================
//
// Start-up resolution of shader sources and image files into handles.
//
// Shaders are required: a missing file aborts start-up. Images degrade:
// a missing or unreadable file yields `TextureHandle::NONE` and whatever
// would have used it is not drawn.
//
// Only the PNG header is inspected. Decoding and GPU upload belong to the
// graphics backend that consumes the frame description.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::config::AssetConfig;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

//=== AssetError ==========================================================

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("missing shader {}: {source}", .path.display())]
    MissingShader {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

//=== TextureHandle =======================================================

/// Opaque texture id. `0` means "not loaded".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureHandle(pub(crate) u32);

impl TextureHandle {
    pub const NONE: Self = Self(0);

    pub fn id(self) -> u32 {
        self.0
    }

    pub fn is_loaded(self) -> bool {
        self.0 != 0
    }
}

//=== TextureInfo =========================================================

/// Header data of a registered image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

//=== TextureLoader =======================================================

/// Hands out handles for image files, starting at 1.
#[derive(Debug, Default)]
pub struct TextureLoader {
    textures: Vec<TextureInfo>,
}

impl TextureLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the image at `path`, or returns `NONE` with a warning.
    pub fn load(&mut self, path: &Path) -> TextureHandle {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(target: "assets", "Texture {} not loaded: {}", path.display(), e);
                return TextureHandle::NONE;
            }
        };

        let Some((width, height)) = png_dimensions(&bytes) else {
            warn!(target: "assets", "Texture {} is not a PNG image", path.display());
            return TextureHandle::NONE;
        };

        self.textures.push(TextureInfo {
            path: path.to_path_buf(),
            width,
            height,
        });
        let handle = TextureHandle(self.textures.len() as u32);
        info!(target: "assets", "Texture {} ({}x{}) → handle {}", path.display(), width, height, handle.id());
        handle
    }

    pub fn info(&self, handle: TextureHandle) -> Option<&TextureInfo> {
        let index = handle.id().checked_sub(1)?;
        self.textures.get(index as usize)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

/// Width and height from the IHDR chunk, if `bytes` starts like a PNG.
fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() < 24 || bytes[..8] != PNG_SIGNATURE || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    Some((width, height))
}

//=== Shaders =============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    fn load(vertex: &Path, fragment: &Path) -> Result<Self, AssetError> {
        Ok(Self {
            vertex: read_shader(vertex)?,
            fragment: read_shader(fragment)?,
        })
    }
}

fn read_shader(path: &Path) -> Result<String, AssetError> {
    fs::read_to_string(path).map_err(|source| AssetError::MissingShader {
        path: path.to_path_buf(),
        source,
    })
}

/// The two programs the frame description is drawn with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shaders {
    /// Station, bus and icon quads.
    pub textured: ShaderSource,

    /// The path line strip.
    pub flat: ShaderSource,
}

//=== Textures ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Textures {
    pub bus: TextureHandle,
    pub station: TextureHandle,
    pub boarding: TextureHandle,
    pub inspection: TextureHandle,
    pub controls: TextureHandle,
}

//=== RenderAssets ========================================================

/// Everything resolved from disk at start-up.
#[derive(Debug)]
pub struct RenderAssets {
    shaders: Option<Shaders>,
    textures: Textures,
    loader: TextureLoader,
}

impl RenderAssets {
    /// Loads shaders (required) and textures (optional) named by `config`.
    pub fn load(config: &AssetConfig) -> Result<Self, AssetError> {
        let shaders = Shaders {
            textured: ShaderSource::load(&config.textured_vertex, &config.textured_fragment)?,
            flat: ShaderSource::load(&config.flat_vertex, &config.flat_fragment)?,
        };

        let mut loader = TextureLoader::new();
        let textures = Textures {
            bus: loader.load(&config.bus_texture),
            station: loader.load(&config.station_texture),
            boarding: loader.load(&config.boarding_icon),
            inspection: loader.load(&config.inspection_icon),
            controls: loader.load(&config.controls_icon),
        };

        info!(target: "assets", "Loaded shaders and {} of 5 textures", loader.len());

        Ok(Self {
            shaders: Some(shaders),
            textures,
            loader,
        })
    }

    /// No shaders, every texture `NONE`. Used when running headless.
    pub fn unloaded() -> Self {
        Self {
            shaders: None,
            textures: Textures::default(),
            loader: TextureLoader::new(),
        }
    }

    pub fn shaders(&self) -> Option<&Shaders> {
        self.shaders.as_ref()
    }

    pub fn textures(&self) -> &Textures {
        &self.textures
    }

    pub fn texture_info(&self, handle: TextureHandle) -> Option<&TextureInfo> {
        self.loader.info(handle)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
