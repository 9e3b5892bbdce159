//=========================================================================
// Platform Subsystem
//
// Bridges winit (OS-level events) with the core systems via a
// crossbeam channel, all on the event-loop thread.
//
// Architecture:
// ```text
//  Event-loop thread
//  ┌──────────────────────────────────────────────────────┐
//  │  winit callbacks                                     │
//  │   ↓                                                  │
//  │  InputProcessor (winit → InputEvent)                 │
//  │   ↓                                                  │
//  │  InputBuffer (discrete, consecutive dedup)           │
//  │   ↓                                                  │
//  │  RedrawRequested ── flush ──► channel ──► CoreSystems│
//  │                                             ↓ tick() │
//  │  set_title() / request_redraw() ◄──── Frame, title   │
//  └──────────────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: input buffered during the pump
//   is flushed and processed before the state update of the same frame
// - **Non-blocking flush**: `try_send` on the bounded channel; the
//   receiver lives on this same thread, so a blocking send could never
//   be drained
// - **Deferred failure**: window creation errors are kept and returned
//   from `run()` once the loop has exited
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use std::time::Instant;

use crossbeam_channel::{Sender, TrySendError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::config::WindowConfig;
use crate::core::input::event::{InputEvent, KeyCode};
use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use crate::core::{CoreSystems, TickControl};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Window owner and per-frame driver of the core systems.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(..)`; no window yet
/// 2. **Execution**: `platform.run()` starts the winit loop
/// 3. **Per frame**: `RedrawRequested` flushes input and ticks the core
/// 4. **Shutdown**: close button or `Escape` → `WindowClosed` → exit
///
/// Not `Send`: it must stay on the thread that created the event loop.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    window_config: WindowConfig,

    /// Buffers discrete input until frame boundary.
    buffer: InputBuffer,

    /// Channel to the core systems.
    event_sender: Sender<PlatformEvent>,

    input_processor: InputProcessor,

    core: CoreSystems,

    /// First fatal error seen inside the loop.
    failure: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet; that happens in `resumed()`.
    pub(crate) fn new(
        window_config: WindowConfig,
        event_sender: Sender<PlatformEvent>,
        core: CoreSystems,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            window_config,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
            core,
            failure: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// [`PlatformError`] if the loop cannot be created, fails while
    /// running, or the window could not be opened.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))?;

        match self.failure.take() {
            Some(err) => Err(err),
            None => {
                info!(target: "platform", "Event loop finished");
                Ok(())
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Flushes buffered input to the core systems.
    ///
    /// A full or disconnected channel drops the batch with a warning.
    fn flush_input_buffer(&mut self) {
        let Some(events) = self.buffer.drain() else {
            return;
        };

        let count = events.len();
        trace!(target: "platform::input", "Flushing {} discrete events", count);

        match self.event_sender.try_send(PlatformEvent::Inputs(events)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(target: "platform::input", "Channel full, dropping {} events", count);
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "platform::input", "Channel disconnected, dropping {} events", count);
            }
        }
    }

    /// Routes one converted input event: `Escape` closes, the rest is
    /// buffered for the frame.
    fn push_input(&mut self, event: InputEvent, event_loop: &ActiveEventLoop) {
        if event == InputEvent::KeyDown(KeyCode::Escape) {
            info!(target: "platform", "Escape pressed");
            self.close(event_loop);
            return;
        }
        self.buffer.push_discrete(event);
    }

    /// Tells the core to stop and leaves the event loop.
    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.flush_input_buffer();
        if self.event_sender.try_send(PlatformEvent::WindowClosed).is_err() {
            warn!(target: "platform", "Could not deliver WindowClosed");
        }
        self.core.tick(Instant::now());
        event_loop.exit();
    }

    /// Frame boundary: flush input, tick the core, present the title.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.flush_input_buffer();

        if self.core.tick(Instant::now()) == TickControl::Exit {
            event_loop.exit();
            return;
        }

        let Some(window) = &self.window else {
            return;
        };
        if let Some(title) = self.core.take_title_change() {
            window.set_title(title);
        }

        let frame = self.core.frame();
        trace!(
            target: "platform",
            "Frame ready: {} quads, {} path points",
            frame.quads.len(),
            frame.path.len()
        );
        window.request_redraw();
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (resume)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.window_config.title.clone())
            .with_inner_size(LogicalSize::new(
                self.window_config.width,
                self.window_config.height,
            ));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.failure = Some(PlatformError::WindowCreation(e.to_string()));
                self.close(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.close(event_loop);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key_event(key_event) {
                    Some(event) => self.push_input(event, event_loop),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.push_input(event, event_loop);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {
                // Ignore: Resized, Focused, CursorMoved, etc.
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
