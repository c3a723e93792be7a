//! Browser host shell
//!
//! Acquires the canvas, wires DOM listeners to the game session and drives
//! it from `requestAnimationFrame`. Everything it attaches is kept so `stop`
//! can detach the listeners and cancel the loop together.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, KeyboardEvent,
    PageTransitionEvent, PointerEvent,
};

use super::input::{KeyAction, PageLifecycle, canvas_point, key_action, page_lifecycle};
use crate::Settings;
use crate::audio::{AudioEngine, PlatformBackend, open_platform};
use crate::game::{Game, InputEvent};
use crate::renderer::canvas::CanvasRenderer;
use crate::sim::GameState;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("no #canvas element")]
    NoCanvas,
    #[error("2d drawing context unavailable")]
    NoContext,
    #[error("browser call failed: {0}")]
    Js(String),
}

fn js_err(e: JsValue) -> HostError {
    HostError::Js(format!("{e:?}"))
}

type WebGame = Game<AudioEngine<PlatformBackend>>;

/// A DOM listener we own and must detach
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, HostError> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    fn detach(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Self-rescheduling animation frame callback
#[derive(Default)]
struct FrameLoop {
    pending: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameLoop {
    fn schedule(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(cb) = self.callback.borrow().as_ref() {
            match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(id) => self.pending.set(Some(id)),
                Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
            }
        }
    }

    /// Drop the pending frame but keep the callback for a later `schedule`
    fn pause(&self) {
        if let (Some(window), Some(id)) = (web_sys::window(), self.pending.take()) {
            let _ = window.cancel_animation_frame(id);
        }
    }

    fn cancel(&self) {
        self.pause();
        // Breaks the closure -> FrameLoop reference cycle
        self.callback.borrow_mut().take();
    }
}

/// Everything a running game holds on to
struct Session {
    listeners: Vec<Listener>,
    frames: Rc<FrameLoop>,
}

impl Session {
    fn stop(self) {
        self.frames.cancel();
        for listener in self.listeners {
            listener.detach();
        }
        log::info!("Game stopped");
    }
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

/// Match the canvas backing store to its CSS box; returns the new size
fn fit_canvas(canvas: &HtmlCanvasElement) -> (f32, f32) {
    let w = canvas.client_width().max(1) as u32;
    let h = canvas.client_height().max(1) as u32;
    canvas.set_width(w);
    canvas.set_height(h);
    (w as f32, h as f32)
}

/// Stop the frame loop and detach every listener
#[wasm_bindgen]
pub fn stop() {
    if let Some(session) = SESSION.with(|s| s.borrow_mut().take()) {
        session.stop();
    }
}

/// Build the session and start the frame loop
pub fn run() -> Result<(), HostError> {
    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    let document = window.document().ok_or(HostError::NoDocument)?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id("canvas")
        .ok_or(HostError::NoCanvas)?
        .dyn_into()
        .map_err(|_| HostError::NoCanvas)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or(HostError::NoContext)?
        .dyn_into()
        .map_err(|_| HostError::NoContext)?;
    let renderer = CanvasRenderer::new(ctx);

    let (width, height) = fit_canvas(&canvas);
    let seed = js_sys::Date::now() as u64;
    let settings = Rc::new(RefCell::new(Settings::load()));

    let mut audio = AudioEngine::new(seed.rotate_left(17), open_platform);
    audio.apply_settings(&settings.borrow());
    let game: Rc<RefCell<WebGame>> = Rc::new(RefCell::new(Game::new(
        GameState::new(seed, width, height),
        audio,
    )));
    log::info!("Game initialized with seed: {seed} ({width}x{height})");

    let mut listeners = Vec::new();

    // Pointer down - tap at canvas coordinates
    {
        let game = game.clone();
        let canvas_clone = canvas.clone();
        listeners.push(Listener::attach(&canvas, "pointerdown", move |event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            event.prevent_default();
            let rect = canvas_clone.get_bounding_client_rect();
            let point = canvas_point(
                event.client_x() as f32,
                event.client_y() as f32,
                rect.left() as f32,
                rect.top() as f32,
            );
            if let Some(outcome) = game.borrow_mut().handle(InputEvent::Tap(point)) {
                log::debug!("Tap at ({:.0}, {:.0}): {outcome:?}", point.x, point.y);
            }
        })?);
    }

    // Keyboard
    {
        let game = game.clone();
        let settings = settings.clone();
        listeners.push(Listener::attach(&window, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            match key_action(&event.key(), event.repeat()) {
                Some(KeyAction::Primary) => {
                    event.prevent_default();
                    game.borrow_mut().handle(InputEvent::PrimaryAction);
                }
                Some(KeyAction::ToggleMute) => {
                    let mut s = settings.borrow_mut();
                    s.muted = !s.muted;
                    s.save();
                    game.borrow_mut().audio_mut().apply_settings(&s);
                    log::info!("Muted: {}", s.muted);
                }
                None => {}
            }
        })?);
    }

    // Resize - refit canvas, regenerate hiding spots
    {
        let game = game.clone();
        let canvas_clone = canvas.clone();
        listeners.push(Listener::attach(&window, "resize", move |_event| {
            let (width, height) = fit_canvas(&canvas_clone);
            game.borrow_mut()
                .handle(InputEvent::Resize { width, height });
        })?);
    }

    // Back/forward cache: pause while cached, resume on restore, tear down
    // when the page is really leaving
    let frames = Rc::new(FrameLoop::default());
    for kind in ["pagehide", "pageshow"] {
        let frames = frames.clone();
        listeners.push(Listener::attach(&window, kind, move |event| {
            let persisted = event
                .dyn_ref::<PageTransitionEvent>()
                .is_some_and(|e| e.persisted());
            match page_lifecycle(kind, persisted) {
                PageLifecycle::Suspend => {
                    frames.pause();
                    log::info!("Game suspended");
                }
                PageLifecycle::Resume => {
                    // Never leave two frames in flight
                    frames.pause();
                    frames.schedule();
                    log::info!("Game resumed");
                }
                PageLifecycle::Teardown => stop(),
                PageLifecycle::Ignore => {}
            }
        })?);
    }

    // Frame loop: tick, then draw
    {
        let frames_clone = frames.clone();
        let settings = settings.clone();
        let game = game.clone();
        *frames.callback.borrow_mut() = Some(Closure::new(move |_time: f64| {
            {
                let mut g = game.borrow_mut();
                g.frame();
                renderer.draw(&g.snapshot(), &settings.borrow());
            }
            frames_clone.schedule();
        }));
    }

    // Replace any earlier session before starting this one
    stop();
    frames.schedule();
    SESSION.with(|s| *s.borrow_mut() = Some(Session { listeners, frames }));

    log::info!("Critter Catch running!");
    Ok(())
}
