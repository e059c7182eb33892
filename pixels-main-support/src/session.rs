use cave_grid::{GridSize, World};
use log::{debug, info};
use winit::keyboard::KeyCode;

const MAX_GRID_PIXEL_WIDTH: u32 = 600;
const MAX_GRID_PIXEL_HEIGHT: u32 = 500;
const MIN_CELL_PIXEL_WIDTH: u32 = 3;

pub const CONTROLS: [&str; 3] = [
    "SPACE - Next iteration",
    "R - New random cave",
    "ESC - Exit",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Step,
    Reset,
    Quit,
}

impl Command {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Space => Some(Self::Step),
            KeyCode::KeyR => Some(Self::Reset),
            KeyCode::Escape | KeyCode::KeyQ | KeyCode::KeyX => Some(Self::Quit),
            _ => None,
        }
    }
}

/// A world plus the generation counter the shell keeps for it.
#[derive(Debug)]
pub struct Session<W: World> {
    world: W,
    generation: u64,
}

impl<W: World> Session<W> {
    pub fn new(world: W) -> Self {
        Self {
            world,
            generation: 0,
        }
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn grid_size(&self) -> GridSize {
        GridSize::new(self.world.width(), self.world.height())
    }

    /// Returns false once the session should end.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Step => {
                self.world.update();
                self.generation += 1;
                debug!("Iteration {}", self.generation);
            }
            Command::Reset => {
                self.world.reset();
                self.generation = 0;
                info!("Started a new random cave");
            }
            Command::Quit => return false,
        }
        true
    }

    pub fn info_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Iteration: {}", self.generation)];
        lines.extend(self.world.status_lines());
        lines
    }

    pub fn info_text(&self) -> String {
        let mut text = self.info_lines().join("\n");
        text.push_str("\n\nCONTROLS:\n");
        text.push_str(&CONTROLS.join("\n"));
        text
    }
}

/// Window size needed to show the whole grid, or `None` if it does not fit in `u32`.
pub fn grid_pixel_size(grid_size: GridSize) -> Option<GridSize> {
    let cell_size = cell_pixel_size(grid_size);
    Some(GridSize::new(
        grid_size.width.checked_mul(cell_size)?,
        grid_size.height.checked_mul(cell_size)?,
    ))
}

/// Edge length in pixels of the rectangle drawn for one cell.
pub fn cell_pixel_size(grid_size: GridSize) -> u32 {
    let fit_width = MAX_GRID_PIXEL_WIDTH / grid_size.width.max(1);
    let fit_height = MAX_GRID_PIXEL_HEIGHT / grid_size.height.max(1);
    fit_width.min(fit_height).max(MIN_CELL_PIXEL_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cave_generator::{CaveGenerator, CaveParams};

    fn session(params: CaveParams) -> Session<CaveGenerator> {
        Session::new(CaveGenerator::with_seed(params, 17).unwrap())
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Command::from_key(KeyCode::Space), Some(Command::Step));
        assert_eq!(Command::from_key(KeyCode::KeyR), Some(Command::Reset));
        assert_eq!(Command::from_key(KeyCode::Escape), Some(Command::Quit));
        assert_eq!(Command::from_key(KeyCode::KeyQ), Some(Command::Quit));
        assert_eq!(Command::from_key(KeyCode::KeyX), Some(Command::Quit));
        assert_eq!(Command::from_key(KeyCode::KeyA), None);
    }

    #[test]
    fn test_step_and_reset_track_generation() {
        // Starts full; a death limit of 9 empties it on the first step.
        let mut session = session(CaveParams::new(3, 3, 1.0, 8, 9));
        assert!(session.apply(Command::Step));
        assert!(session.apply(Command::Step));
        assert_eq!(session.generation(), 2);
        assert_eq!(session.world().alive_count(), 0);

        assert!(session.apply(Command::Reset));
        assert_eq!(session.generation(), 0);
        assert_eq!(session.world().alive_count(), 9);
    }

    #[test]
    fn test_quit_ends_session_without_touching_world() {
        let mut session = session(CaveParams::new(3, 3, 0.0, 0, 5));
        assert!(!session.apply(Command::Quit));
        assert_eq!(session.generation(), 0);
        assert_eq!(session.world().alive_count(), 0);
    }

    #[test]
    fn test_info_text() {
        let mut session = session(CaveParams::new(3, 3, 1.0, 8, 9));
        session.apply(Command::Step);
        assert_eq!(
            session.info_text(),
            "Iteration: 1\nSize: 3 x 3\nAlive cells: 0\nBirth chance: 100%\nBirth limit: 8\n\
             Death limit: 9\n\nCONTROLS:\nSPACE - Next iteration\nR - New random cave\nESC - Exit"
        );
        assert_eq!(session.grid_size(), GridSize::new(3, 3));
    }

    #[test]
    fn test_cell_pixel_size() {
        assert_eq!(cell_pixel_size(GridSize::new(60, 50)), 10);
        assert_eq!(cell_pixel_size(GridSize::new(100, 25)), 6);
        assert_eq!(cell_pixel_size(GridSize::new(1000, 1000)), MIN_CELL_PIXEL_WIDTH);
    }

    #[test]
    fn test_grid_pixel_size() {
        assert_eq!(grid_pixel_size(GridSize::new(60, 50)), Some(GridSize::new(600, 500)));
        assert_eq!(grid_pixel_size(GridSize::new(1000, 10)), Some(GridSize::new(3000, 30)));
        assert_eq!(grid_pixel_size(GridSize::new(u32::MAX / 2, 10)), None);
        assert_eq!(grid_pixel_size(GridSize::new(10, u32::MAX)), None);
    }
}
