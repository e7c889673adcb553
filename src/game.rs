use crate::board::animation::IsMoving;
use crate::board::{resolve, BlockAnimation, CellPos, Direction, Grid, Motion};
use crate::browser;
use crate::config::GameConfig;
use crate::controls::{self, Gesture, MovementQueue, WALL_KEY};
use crate::engine::input::InputFrame;
use crate::engine::{Game, Point, Renderer, Size, Sound};
use crate::scene;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;

/// TABLE
/// ┌───────────────────── Game Architecture Overview ────────────────────────┐
/// │                                                                         │
/// │    ┌─────────────┐  tick   ┌──────────────┐  tick   ┌─────────────┐     │
/// │    │  engine.rs  │ + input │   game.rs    │ + input │  GameState  │     │
/// │    │  GameLoop   ├────────►│ SquareSlide  ├────────►│  update()   │     │
/// │    └─────────────┘         └──────┬───────┘         └──────┬──────┘     │
/// │                                   │    Vec<Effect>         │            │
/// │                                   │◄───────────────────────┘            │
/// │                             plays sounds, logs                          │
/// │                                                                         │
/// ├──────────────────────── Call Sequence ──────────────────────────────────┤
/// │  1. GameLoop drains browser input into InputFrame                       │
/// │  2. SquareSlide applies viewport changes (canvas + grid resize)         │
/// │  3. GameState::update turns input into move / wall requests,            │
/// │     advances the block animation and returns effects                    │
/// │  4. SquareSlide runs the effects, then draws scene::compose(state)      │
/// └─────────────────────────────────────────────────────────────────────────┘
pub enum SquareSlide {
    /// Waiting for config and sound to load
    Loading,
    Loaded(Session),
}

impl SquareSlide {
    pub fn new() -> Self {
        SquareSlide::Loading
    }

    /// Best effort, any problem with the file means defaults
    async fn load_config() -> GameConfig {
        match browser::fetch_json::<GameConfig>(GameConfig::PATH)
            .await
            .with_context(|| format!("Failed to load config from : {}", GameConfig::PATH))
        {
            Ok(config) => config,
            Err(err) => {
                warn!("{:#}, using defaults", err);
                GameConfig::default()
            }
        }
    }
}

impl Default for SquareSlide {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl Game for SquareSlide {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            SquareSlide::Loading => {
                let config = Self::load_config().await;
                let sound = match Sound::load(&config.move_sound) {
                    Ok(sound) => Some(sound),
                    Err(err) => {
                        warn!("{:#}, moves will be silent", err);
                        None
                    }
                };
                let (width, height) = browser::viewport_size()?;
                let canvas = canvas_size_for(
                    Size { width, height },
                    config.cell_size,
                );
                browser::resize_canvas(canvas.width as u32, canvas.height as u32)?;
                let (columns, rows) =
                    Grid::dimensions_for(canvas.width, canvas.height, config.cell_size);
                log!("Blocks: {}x{}", columns, rows);
                Ok(Box::new(SquareSlide::Loaded(Session {
                    state: GameState::new(config, columns, rows),
                    canvas,
                    sound,
                })))
            }
            SquareSlide::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn update(&mut self, tick: f64, input: &mut InputFrame) {
        if let SquareSlide::Loaded(session) = self {
            if let Some(viewport) = input.take_viewport() {
                session.resize(viewport);
            }
            for effect in session.state.update(tick, input) {
                session.run(effect);
            }
        }
    }

    fn draw(&self, renderer: &Renderer) {
        if let SquareSlide::Loaded(session) = self {
            renderer.draw_scene(&scene::compose(&session.state, session.canvas));
        }
    }
}

/// Browser-facing half of a running game
pub struct Session {
    state: GameState,
    canvas: Size,
    sound: Option<Sound>,
}

impl Session {
    fn resize(&mut self, viewport: Size) {
        let cell_size = self.state.config().cell_size;
        self.canvas = canvas_size_for(viewport, cell_size);
        if let Err(err) =
            browser::resize_canvas(self.canvas.width as u32, self.canvas.height as u32)
        {
            warn!("{:#}", err);
        }
        let (columns, rows) = Grid::dimensions_for(self.canvas.width, self.canvas.height, cell_size);
        self.state.resize(columns, rows);
    }

    fn run(&self, effect: Effect) {
        match effect {
            Effect::PlayMoveSound => {
                if let Some(sound) = &self.sound {
                    sound.play();
                }
            }
            Effect::WallPlaced(cell) => log!("wall placed at ({}, {})", cell.column, cell.row),
        }
    }
}

/// Canvas quantized to whole cells plus a one pixel border for the last grid line
pub fn canvas_size_for(viewport: Size, cell_size: f64) -> Size {
    let (columns, rows) = Grid::dimensions_for(viewport.width, viewport.height, cell_size);
    Size {
        width: columns as f64 * cell_size + 1.0,
        height: rows as f64 * cell_size + 1.0,
    }
}

/// Side effects requested by `GameState::update`, run by the browser shell
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Effect {
    PlayMoveSound,
    WallPlaced(CellPos),
}

/// Everything that changes while playing, no browser types inside
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    block: Point,
    block_cell: CellPos,
    animation: BlockAnimation,
    queue: MovementQueue,
    wall_requested: bool,
    moves: u32,
}

impl GameState {
    pub fn new(config: GameConfig, columns: usize, rows: usize) -> Self {
        GameState {
            config,
            grid: Grid::new(columns, rows),
            block: Point::default(),
            block_cell: Grid::START,
            animation: BlockAnimation::Idle,
            queue: MovementQueue::default(),
            wall_requested: false,
            moves: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Top left corner of the block in pixels
    pub fn block_position(&self) -> Point {
        self.block
    }

    /// Cell the block rests on, the departure cell while a slide is in flight
    pub fn block_cell(&self) -> CellPos {
        self.block_cell
    }

    pub fn animation(&self) -> &BlockAnimation {
        &self.animation
    }

    pub fn queue(&self) -> &MovementQueue {
        &self.queue
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// One frame :
    /// - turn this frame's strokes and held keys into requests
    /// - Moving : advance the slide, finishing it at progress 1.0
    /// - Idle   : place a requested wall, then start the oldest queued move
    pub fn update(&mut self, tick: f64, input: &mut InputFrame) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.collect_requests(input);

        match self.animation {
            BlockAnimation::Moving(motion) => {
                match motion.step(tick, self.config.animation_duration) {
                    IsMoving::InProgress(position) => self.set_axis(motion.direction, position),
                    IsMoving::Done(position) => {
                        self.set_axis(motion.direction, position);
                        self.block_cell = motion.target;
                        self.animation = BlockAnimation::Idle;
                    }
                }
            }
            BlockAnimation::Idle => {
                if self.wall_requested {
                    self.wall_requested = false;
                    if self.grid.place_wall(self.block_cell) {
                        effects.push(Effect::WallPlaced(self.block_cell));
                    }
                }
                if let Some(direction) = self.queue.pop() {
                    self.start_move(direction, tick);
                    effects.push(Effect::PlayMoveSound);
                }
            }
        }
        effects
    }

    /// Queue a move unless the block is already sliding that way
    pub fn request_move(&mut self, direction: Direction) {
        if self.animation.direction() != Some(direction) {
            self.queue.push(direction);
        }
    }

    /// Wall on the block's own cell, applied on the next idle frame
    pub fn request_wall(&mut self) {
        self.wall_requested = true;
    }

    /// Adopt new grid dimensions
    /// - same dimensions is a no-op, a slide in flight keeps running
    /// - walls in the overlap survive
    /// - a slide in flight snaps to its target
    /// - the block is pulled back inside the grid
    pub fn resize(&mut self, columns: usize, rows: usize) {
        if (columns.max(1), rows.max(1)) == (self.grid.columns(), self.grid.rows()) {
            return;
        }
        if let BlockAnimation::Moving(motion) = self.animation {
            self.block_cell = motion.target;
            self.animation = BlockAnimation::Idle;
        }
        self.grid.resize(columns, rows);
        self.block_cell = self.grid.clamp(self.block_cell);
        self.block = self.cell_origin(self.block_cell);
    }

    fn collect_requests(&mut self, input: &mut InputFrame) {
        // tap position is ignored, walls always go under the block
        for stroke in input.take_strokes() {
            match controls::classify(&stroke, self.config.swipe_threshold) {
                Gesture::Swipe(direction) => self.request_move(direction),
                Gesture::Tap(_) => self.request_wall(),
            }
        }
        for direction in controls::poll_direction_keys(&mut input.keys) {
            self.request_move(direction);
        }
        if input.keys.is_pressed(WALL_KEY) {
            self.request_wall();
        }
    }

    fn start_move(&mut self, direction: Direction, tick: f64) {
        let slide = resolve(&self.grid, self.block_cell, direction);
        let start_position = if direction.is_horizontal() {
            self.block.x
        } else {
            self.block.y
        };
        self.animation = BlockAnimation::Moving(Motion::start(
            &slide,
            tick,
            start_position,
            self.config.cell_size,
        ));
        self.moves += 1;
    }

    fn set_axis(&mut self, direction: Direction, position: f64) {
        if direction.is_horizontal() {
            self.block.x = position;
        } else {
            self.block.y = position;
        }
    }

    fn cell_origin(&self, cell: CellPos) -> Point {
        Point {
            x: cell.column as f64 * self.config.cell_size,
            y: cell.row as f64 * self.config.cell_size,
        }
    }
}
