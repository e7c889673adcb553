use crate::browser;
use anyhow::{anyhow, Result};
// ELI5: web assembly is a single threaded environment, so Rc RefCell > Mutex
use async_trait::async_trait;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlAudioElement};

pub mod input;

use self::input::InputFrame;

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    /// `tick` is the absolute requestAnimationFrame timestamp in milliseconds
    fn update(&mut self, tick: f64, input: &mut InputFrame);
    fn draw(&self, renderer: &Renderer);
}

pub struct GameLoop;

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    /// Every frame, in order :
    /// - drain input events queued by the browser callbacks
    /// - update with the frame tick (no fixed timestep, motion is time based)
    /// - draw the whole scene
    /// - schedule the next frame
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let mut game = game.initialize().await?;
        let mut receiver = input::prepare_input()?;
        let mut input = InputFrame::default();
        let renderer = Renderer {
            context: browser::context()?,
        };
        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |tick: f64| {
            input::process_input(&mut input, &mut receiver);
            game.update(tick, &mut input);
            input.end_frame();
            game.draw(&renderer);
            if let Some(next_frame) = f.borrow().as_ref() {
                if let Err(err) = browser::request_animation_frame(next_frame) {
                    warn!("GameLoop: could not schedule next frame : {:#?}", err);
                }
            }
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(position: Point, size: Size) -> Self {
        Rect { position, size }
    }
}

/// Drawing primitives the renderer knows how to execute
/// - a scene is a plain Vec of these, built without touching the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        colour: String,
    },
    /// Lines on every cell boundary of a `columns` x `rows` lattice anchored at (0, 0)
    GridLines {
        columns: usize,
        rows: usize,
        cell_size: f64,
        line_width: f64,
        colour: String,
    },
    Text {
        text: String,
        position: Point,
        font: String,
        colour: String,
    },
    Translate(Point),
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn draw_scene(&self, scene: &[DrawCommand]) {
        for command in scene {
            if let Err(err) = self.draw(command) {
                warn!("Renderer: {:#?}", err);
            }
        }
    }

    pub fn draw(&self, command: &DrawCommand) -> Result<()> {
        match command {
            DrawCommand::FillRect { rect, colour } => {
                self.context.set_fill_style_str(colour);
                self.context.fill_rect(
                    rect.position.x,
                    rect.position.y,
                    rect.size.width,
                    rect.size.height,
                );
            }
            DrawCommand::GridLines {
                columns,
                rows,
                cell_size,
                line_width,
                colour,
            } => {
                let max_x = *columns as f64 * cell_size;
                let max_y = *rows as f64 * cell_size;
                self.context.set_line_width(*line_width);
                self.context.set_stroke_style_str(colour);
                self.context.begin_path();
                for column in 0..=*columns {
                    let x = column as f64 * cell_size;
                    self.context.move_to(x, 0.0);
                    self.context.line_to(x, max_y);
                }
                for row in 0..=*rows {
                    let y = row as f64 * cell_size;
                    self.context.move_to(0.0, y);
                    self.context.line_to(max_x, y);
                }
                self.context.stroke();
            }
            DrawCommand::Text {
                text,
                position,
                font,
                colour,
            } => {
                self.context.set_font(font);
                self.context.set_fill_style_str(colour);
                self.context.set_text_baseline("top");
                self.context
                    .fill_text(text, position.x, position.y)
                    .map_err(|err| anyhow!("Could not draw text '{}' : {:#?}", text, err))?;
            }
            DrawCommand::Translate(offset) => {
                self.context
                    .translate(offset.x, offset.y)
                    .map_err(|err| anyhow!("Could not translate context : {:#?}", err))?;
            }
        }
        Ok(())
    }
}

/// A short one-shot sound effect
/// - play() is fire and forget, a rejected play (autoplay policy, decode
///   error) is logged and otherwise ignored
pub struct Sound {
    element: HtmlAudioElement,
}

impl Sound {
    pub fn load(source: &str) -> Result<Self> {
        Ok(Sound {
            element: browser::new_audio(source)?,
        })
    }

    pub fn play(&self) {
        // rewind so rapid moves retrigger the cue instead of waiting for it to end
        self.element.set_current_time(0.0);
        match self.element.play() {
            Ok(promise) => browser::spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    warn!("Sound: play rejected : {:#?}", err);
                }
            }),
            Err(err) => warn!("Sound: could not play : {:#?}", err),
        }
    }
}
