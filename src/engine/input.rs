use super::{Point, Size};
use crate::browser;
use anyhow::{anyhow, Result};
use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use std::collections::HashSet;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{EventTarget, KeyboardEvent, TouchEvent};

/// Raw browser input, produced by event callbacks and consumed once per frame
///
/// TABLE
/// ┌──────────────────── Input hand-off ────────────────────────────────┐
/// │  browser callback ──► UnboundedSender ──► UnboundedReceiver        │
/// │  (keydown, touchend...)                  drained by process_input  │
/// │                                          at the frame boundary     │
/// └────────────────────────────────────────────────────────────────────┘
/// Callbacks never touch game state, the frame callback is the only writer.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    TouchStart(Point),
    TouchEnd(Point),
    Resize(Size),
}

/// Keys currently held, by `KeyboardEvent.key` value
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pressed_keys: HashSet<String>,
}

impl KeyState {
    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    pub fn any_pressed(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.is_pressed(key))
    }

    pub fn set_pressed(&mut self, key: &str) {
        self.pressed_keys.insert(key.to_string());
    }

    pub fn set_released(&mut self, key: &str) {
        self.pressed_keys.remove(key);
    }

    /// Forget `keys` until their next keydown
    pub fn release(&mut self, keys: &[&str]) {
        for key in keys {
            self.set_released(key);
        }
    }
}

/// A completed touch, from touchstart to touchend
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchStroke {
    pub start: Point,
    pub end: Point,
}

/// Input accumulated for the current frame
/// - keys persist across frames (held state)
/// - strokes and viewport changes are per frame, cleared by `end_frame`
#[derive(Debug, Default)]
pub struct InputFrame {
    pub keys: KeyState,
    touch_start: Option<Point>,
    strokes: Vec<TouchStroke>,
    viewport: Option<Size>,
}

impl InputFrame {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.keys.set_pressed(&key),
            InputEvent::KeyUp(key) => self.keys.set_released(&key),
            InputEvent::TouchStart(point) => self.touch_start = Some(point),
            InputEvent::TouchEnd(end) => {
                // a touchend without its touchstart (e.g. began before load) is dropped
                if let Some(start) = self.touch_start.take() {
                    self.strokes.push(TouchStroke { start, end });
                }
            }
            InputEvent::Resize(size) => self.viewport = Some(size),
        }
    }

    pub fn take_strokes(&mut self) -> Vec<TouchStroke> {
        std::mem::take(&mut self.strokes)
    }

    /// Latest viewport size reported this frame, if the window was resized
    pub fn take_viewport(&mut self) -> Option<Size> {
        self.viewport.take()
    }

    pub fn end_frame(&mut self) {
        self.strokes.clear();
        self.viewport = None;
    }
}

/// Register keyboard, touch and resize listeners feeding one channel
pub fn prepare_input() -> Result<UnboundedReceiver<InputEvent>> {
    let (sender, receiver) = unbounded::<InputEvent>();
    let window = browser::window()?;
    let canvas = browser::canvas()?;

    let keydown_sender = sender.clone();
    let onkeydown = browser::closure_wrap(Box::new(move |event: KeyboardEvent| {
        send(&keydown_sender, InputEvent::KeyDown(event.key()));
    }) as Box<dyn FnMut(KeyboardEvent)>);

    let keyup_sender = sender.clone();
    let onkeyup = browser::closure_wrap(Box::new(move |event: KeyboardEvent| {
        send(&keyup_sender, InputEvent::KeyUp(event.key()));
    }) as Box<dyn FnMut(KeyboardEvent)>);

    let touchstart_sender = sender.clone();
    let ontouchstart = browser::closure_wrap(Box::new(move |event: TouchEvent| {
        if let Some(point) = first_changed_touch(&event) {
            send(&touchstart_sender, InputEvent::TouchStart(point));
        }
    }) as Box<dyn FnMut(TouchEvent)>);

    let touchend_sender = sender.clone();
    let ontouchend = browser::closure_wrap(Box::new(move |event: TouchEvent| {
        if let Some(point) = first_changed_touch(&event) {
            send(&touchend_sender, InputEvent::TouchEnd(point));
        }
    }) as Box<dyn FnMut(TouchEvent)>);

    let resize_sender = sender;
    let onresize = browser::closure_wrap(Box::new(move || match browser::viewport_size() {
        Ok((width, height)) => send(&resize_sender, InputEvent::Resize(Size { width, height })),
        Err(err) => warn!("resize : {:#?}", err),
    }) as Box<dyn FnMut()>);

    listen(&window, "keydown", onkeydown.as_ref())?;
    listen(&window, "keyup", onkeyup.as_ref())?;
    listen(&window, "resize", onresize.as_ref())?;
    listen(&canvas, "touchstart", ontouchstart.as_ref())?;
    listen(&canvas, "touchend", ontouchend.as_ref())?;

    // listeners live as long as the page
    onkeydown.forget();
    onkeyup.forget();
    onresize.forget();
    ontouchstart.forget();
    ontouchend.forget();

    Ok(receiver)
}

/// Drain everything the callbacks queued since the last frame
pub fn process_input(frame: &mut InputFrame, receiver: &mut UnboundedReceiver<InputEvent>) {
    // Err : nothing pending, or every sender dropped (channel closed)
    while let Ok(event) = receiver.try_recv() {
        frame.apply(event);
    }
}

fn listen(target: &EventTarget, name: &str, callback: &JsValue) -> Result<()> {
    target
        .add_event_listener_with_callback(name, callback.unchecked_ref())
        .map_err(|err| anyhow!("Could not listen to '{}' : {:#?}", name, err))
}

fn send(sender: &UnboundedSender<InputEvent>, event: InputEvent) {
    if let Err(err) = sender.unbounded_send(event) {
        warn!("input channel closed : {:#?}", err);
    }
}

fn first_changed_touch(event: &TouchEvent) -> Option<Point> {
    event.changed_touches().get(0).map(|touch| Point {
        x: touch.client_x() as f64,
        y: touch.client_y() as f64,
    })
}
