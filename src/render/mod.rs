//=========================================================================
// Render Pass
//
// Backend-agnostic description of what to draw each frame.
//
// Responsibilities:
// - Read the updated simulation state once per frame
// - Emit the path line strip and the textured quads in draw order
// - Summarise the HUD values for the window title
//
// Notes:
// A graphics backend would draw `Frame::path` with the flat program and
// every `Quad` with the textured program. Quads whose texture is not
// loaded are never emitted.
//
// Draw order:
// ```text
//   path strip → stations → bus → status icon → controls icon
// ```
//
//=========================================================================

//=== Submodules ==========================================================

pub mod assets;

//=== Public API ==========================================================

pub use assets::{AssetError, RenderAssets, ShaderSource, Shaders, TextureHandle, Textures};

//=== Internal Dependencies ===============================================

use crate::config::WindowConfig;
use crate::core::route::{PathLine, Vec2};
use crate::core::simulation::Simulation;

//=== Layout ==============================================================

const STATION_HALF_EXTENT: Vec2 = Vec2 { x: 0.04, y: 0.04 };
const BUS_HALF_EXTENT: Vec2 = Vec2 { x: 0.07, y: 0.05 };
const ICON_HALF_EXTENT: Vec2 = Vec2 { x: 0.06, y: 0.06 };

const STATUS_ICON_CENTER: Vec2 = Vec2 { x: -0.88, y: 0.86 };
const CONTROLS_ICON_CENTER: Vec2 = Vec2 { x: 0.88, y: -0.86 };

const PATH_COLOR: [f32; 4] = [0.2, 0.2, 0.2, 1.0];

//=== Layer ===============================================================

/// Draw layer, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Station,
    Bus,
    Overlay,
}

//=== Quad ================================================================

/// Axis-aligned textured rectangle in normalized device coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub center: Vec2,
    pub half_extent: Vec2,
    pub texture: TextureHandle,
    pub layer: Layer,
}

//=== Hud =================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub station: usize,
    pub passengers: i32,
    pub waiting: bool,
    pub inspection_active: bool,
}

impl Hud {
    pub fn from_simulation(sim: &Simulation) -> Self {
        Self {
            station: sim.station(),
            passengers: sim.passengers(),
            waiting: sim.bus().is_waiting(),
            inspection_active: sim.inspection().is_active(),
        }
    }

    /// Window title text, e.g. `Autobus | station 3 | 12 on board | waiting`.
    pub fn title(&self, base: &str) -> String {
        let state = match (self.waiting, self.inspection_active) {
            (true, false) => "waiting",
            (true, true) => "waiting, inspection",
            (false, false) => "traveling",
            (false, true) => "traveling, inspection",
        };
        format!(
            "{} | station {} | {} on board | {}",
            base, self.station, self.passengers, state
        )
    }
}

//=== Frame ===============================================================

/// Everything one frame draws.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub clear_color: [f32; 4],
    pub path: Vec<Vec2>,
    pub path_color: [f32; 4],
    pub quads: Vec<Quad>,
    pub hud: Hud,
}

impl Frame {
    pub fn build(
        sim: &Simulation,
        path: &PathLine,
        textures: &Textures,
        window: &WindowConfig,
    ) -> Self {
        let mut frame = Self::default();
        frame.rebuild(sim, path, textures, window);
        frame
    }

    /// Refills this frame in place, reusing its buffers.
    pub fn rebuild(
        &mut self,
        sim: &Simulation,
        path: &PathLine,
        textures: &Textures,
        window: &WindowConfig,
    ) {
        self.clear_color = window.background;
        self.path_color = PATH_COLOR;
        self.hud = Hud::from_simulation(sim);

        self.path.clear();
        self.path.extend_from_slice(path.points());

        self.quads.clear();

        for station in sim.route().stations() {
            self.push_quad(station.position, STATION_HALF_EXTENT, textures.station, Layer::Station);
        }

        self.push_quad(sim.bus_position(), BUS_HALF_EXTENT, textures.bus, Layer::Bus);

        if self.hud.waiting {
            self.push_quad(STATUS_ICON_CENTER, ICON_HALF_EXTENT, textures.boarding, Layer::Overlay);
        }
        if self.hud.inspection_active {
            // Shares the status slot; drawn over the boarding icon.
            self.push_quad(STATUS_ICON_CENTER, ICON_HALF_EXTENT, textures.inspection, Layer::Overlay);
        }

        self.push_quad(CONTROLS_ICON_CENTER, ICON_HALF_EXTENT, textures.controls, Layer::Overlay);
    }

    fn push_quad(&mut self, center: Vec2, half_extent: Vec2, texture: TextureHandle, layer: Layer) {
        if !texture.is_loaded() {
            return;
        }
        self.quads.push(Quad {
            center,
            half_extent,
            texture,
            layer,
        });
    }

    /// Quads drawn with `texture`.
    pub fn quads_with(&self, texture: TextureHandle) -> impl Iterator<Item = &Quad> {
        self.quads.iter().filter(move |q| q.texture == texture)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
