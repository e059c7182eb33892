#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod session;

pub use session::{cell_pixel_size, grid_pixel_size, Command, Session, CONTROLS};

use cave_grid::{GridCell, GridSize, World};
use log::{error, info};
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture, TextureError};
use std::sync::Arc;
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

const WINDOW_TITLE: &str = "Cave Generator";
const BACKGROUND_COLOR: Color = Color {
    r: 20.0 / 255.0,
    g: 20.0 / 255.0,
    b: 20.0 / 255.0,
    a: 1.0,
};

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] EventLoopError),

    #[error("could not create window: {0}")]
    Window(#[from] OsError),

    #[error("pixel buffer error: {0}")]
    Pixels(#[from] pixels::Error),

    #[error("could not resize surface: {0}")]
    Texture(#[from] TextureError),

    #[error("a {} x {} grid is too large to display", .0.width, .0.height)]
    GridTooLarge(GridSize),
}

/// Shows `world` in a window until the user quits, stepping and resetting it on key presses.
pub fn animate<W: World>(world: W) -> Result<(), ShellError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut handler = AppEventHandler::new(Session::new(world));
    event_loop.run_app(&mut handler)?;
    match handler.failure {
        Some(failure) => Err(failure),
        None => Ok(()),
    }
}

struct App<W: World> {
    session: Session<W>,
    window: Arc<Window>,
    pixels: Pixels<'static>,
}

impl<W: World> App<W> {
    fn new(event_loop: &ActiveEventLoop, session: Session<W>) -> Result<Self, ShellError> {
        let grid_size = session.grid_size();
        let cell_size = cell_pixel_size(grid_size);
        let pixel_size = grid_pixel_size(grid_size).ok_or(ShellError::GridTooLarge(grid_size))?;
        let window_size = PhysicalSize::new(pixel_size.width, pixel_size.height);
        let window = Arc::new(Self::build_window(event_loop, window_size)?);
        let pixels = Self::build_pixels(&window, grid_size.width, grid_size.height)?;
        info!(
            "Opened {} x {} window, {} pixels per cell",
            window_size.width, window_size.height, cell_size
        );
        Ok(Self {
            session,
            window,
            pixels,
        })
    }

    fn build_window(
        event_loop: &ActiveEventLoop,
        size: PhysicalSize<u32>,
    ) -> Result<Window, OsError> {
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(size)
            .with_min_inner_size(size)
            .with_visible(false);
        event_loop.create_window(window_attributes)
    }

    fn build_pixels(
        window: &Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        PixelsBuilder::new(width, height, surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()
    }

    fn on_create(&mut self) {
        self.on_world_changed();
        self.window.set_visible(true);
    }

    fn on_world_changed(&mut self) {
        let title = format!("{WINDOW_TITLE} | {}", self.session.info_lines().join(" | "));
        self.window.set_title(&title);
        self.window.request_redraw();
    }

    /// Returns false once the window should close.
    fn on_command(&mut self, command: Command) -> bool {
        let keep_going = self.session.apply(command);
        if keep_going {
            self.on_world_changed();
        }
        keep_going
    }

    fn on_resize(&mut self, size: PhysicalSize<u32>) -> Result<(), TextureError> {
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(size.width, size.height)
    }

    fn on_redraw(&mut self) -> Result<(), pixels::Error> {
        let world = self.session.world();
        let screen = self.pixels.frame_mut();
        debug_assert_eq!(screen.len(), 4 * world.num_cells());

        for (cell, pixel) in world.cells_iter().zip(screen.chunks_exact_mut(4)) {
            pixel.copy_from_slice(&cell.color_rgba());
        }
        self.pixels.render()
    }
}

struct AppEventHandler<W: World> {
    pending: Option<Session<W>>,
    app: Option<App<W>>,
    failure: Option<ShellError>,
}

impl<W: World> AppEventHandler<W> {
    fn new(session: Session<W>) -> Self {
        Self {
            pending: Some(session),
            app: None,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, failure: ShellError) {
        error!("{failure}");
        self.failure = Some(failure);
        event_loop.exit();
    }
}

impl<W: World> ApplicationHandler for AppEventHandler<W> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(session) = self.pending.take() else {
            return;
        };
        match App::new(event_loop, session) {
            Ok(mut app) => {
                app.on_create();
                info!("{}", app.session.info_text());
                self.app = Some(app);
            }
            Err(failure) => self.fail(event_loop, failure),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(app) = self.app.as_mut() else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Some(command) = Command::from_key(code)
                    && !app.on_command(command)
                {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(size) => {
                if let Err(failure) = app.on_resize(size) {
                    self.fail(event_loop, failure.into());
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(failure) = app.on_redraw() {
                    self.fail(event_loop, failure.into());
                }
            }
            _ => (),
        }
    }
}
