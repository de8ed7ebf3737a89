//! Browser entry point.
//!
//! Renders into `canvas.webgl` and wires the host page's controls (see
//! [`PageControl`]): the `#width` / `#depth` fields with the
//! `#set-dimension` button, the `#move-front` / `#move-left` buttons and
//! the ambient and directional light sliders. DOM callbacks only enqueue
//! [`WebInput`]s; the animation-frame loop drains the queue into the
//! engine, so the engine has a single owner.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Event, EventTarget, HtmlCanvasElement, HtmlInputElement,
    KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use crate::assets::fetch::fetch_texture_set;
use crate::error::WoodboxError;
use crate::input::PageControl;
use crate::options::Options;
use crate::{BoxCommand, BoxEngine, InputEvent, MouseButton};

/// Device pixel ratio cap for the canvas backing store.
const MAX_PIXEL_RATIO: f64 = 2.0;

/// Something a DOM callback observed, applied on the next frame.
#[derive(Debug, Clone, PartialEq)]
pub enum WebInput {
    /// A ready-made command (page buttons and sliders).
    Command(BoxCommand),
    /// Pointer or wheel input for the orbit controls.
    Input(InputEvent),
    /// A key press, as `KeyboardEvent.code`.
    Key(String),
    /// The window was resized.
    Resize,
}

type Queue = Rc<RefCell<VecDeque<WebInput>>>;

fn web_err(msg: impl Into<String>) -> WoodboxError {
    WoodboxError::Web(msg.into())
}

fn js_err(e: &JsValue) -> WoodboxError {
    WoodboxError::Web(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

/// Module start: install the panic hook and console logger, then boot the
/// viewer asynchronously.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = run(Options::default()).await {
            log::error!("woodbox failed to start: {e}");
        }
    });
}

/// Fetch the material maps, create the engine on `canvas.webgl`, hook up
/// the page and start the frame loop.
///
/// # Errors
///
/// Returns [`WoodboxError`] if the page lacks the canvas, the textures
/// fail to load or the GPU cannot be initialized.
pub async fn run(options: Options) -> Result<(), WoodboxError> {
    let window = web_sys::window().ok_or_else(|| web_err("no window"))?;
    let document = window.document().ok_or_else(|| web_err("no document"))?;
    let canvas: HtmlCanvasElement = document
        .query_selector("canvas.webgl")
        .map_err(|e| js_err(&e))?
        .ok_or_else(|| web_err("canvas.webgl not found"))?
        .dyn_into()
        .map_err(|_| web_err("canvas.webgl is not a canvas"))?;

    let size = fit_canvas(&window, &canvas);
    let textures = fetch_texture_set(&options.model.texture_root).await?;
    let engine = BoxEngine::new(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        size,
        &textures,
        options,
    )
    .await?;
    log::info!("woodbox running at {}x{}", size.0, size.1);

    let queue: Queue = Rc::default();
    register_controls(&document, &queue)?;
    register_pointer(&window, &canvas, &queue)?;
    start_frame_loop(window, canvas, engine, queue)
}

/// Size the canvas backing store to the viewport and return it in
/// physical pixels.
fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
    let ratio = window.device_pixel_ratio().min(MAX_PIXEL_RATIO);
    let css = |v: Result<JsValue, JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0)
    };
    let width = (css(window.inner_width()) * ratio).max(1.0) as u32;
    let height = (css(window.inner_height()) * ratio).max(1.0) as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    (width, height)
}

fn pixel_ratio(window: &Window) -> f32 {
    window.device_pixel_ratio().min(MAX_PIXEL_RATIO) as f32
}

fn listen(
    target: &EventTarget,
    name: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), WoodboxError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
        .map_err(|e| js_err(&e))?;
    closure.forget();
    Ok(())
}

fn element(document: &Document, id: &str) -> Result<EventTarget, WoodboxError> {
    document
        .get_element_by_id(id)
        .map(EventTarget::from)
        .ok_or_else(|| web_err(format!("#{id} not found")))
}

fn number_field(document: &Document, id: &str) -> f32 {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map_or(f32::NAN, |input| input.value_as_number() as f32)
}

fn register_controls(document: &Document, queue: &Queue) -> Result<(), WoodboxError> {
    for control in PageControl::ALL {
        for id in control.trigger_ids() {
            let q = queue.clone();
            let doc = document.clone();
            listen(&element(document, id)?, control.event_name(), move |_| {
                let read = |field: &str| number_field(&doc, field);
                if let Some(command) = control.command(read) {
                    q.borrow_mut().push_back(WebInput::Command(command));
                }
            })?;
        }
    }
    Ok(())
}

fn register_pointer(
    window: &Window,
    canvas: &HtmlCanvasElement,
    queue: &Queue,
) -> Result<(), WoodboxError> {
    let push = |queue: &Queue, input: WebInput| queue.borrow_mut().push_back(input);

    let q = queue.clone();
    let w = window.clone();
    listen(canvas, "mousedown", move |e| {
        let Some(e) = e.dyn_ref::<MouseEvent>() else {
            return;
        };
        let ratio = pixel_ratio(&w);
        push(&q, WebInput::Input(InputEvent::ModifiersChanged { shift: e.shift_key() }));
        push(&q, WebInput::Input(InputEvent::CursorMoved {
            x: e.client_x() as f32 * ratio,
            y: e.client_y() as f32 * ratio,
        }));
        push(&q, WebInput::Input(InputEvent::MouseButton {
            button: MouseButton::from_dom_button(e.button()),
            pressed: true,
        }));
    })?;

    // Move and release are tracked on the window so a drag that leaves the
    // canvas still ends.
    let q = queue.clone();
    let w = window.clone();
    listen(window, "mousemove", move |e| {
        let Some(e) = e.dyn_ref::<MouseEvent>() else {
            return;
        };
        let ratio = pixel_ratio(&w);
        push(&q, WebInput::Input(InputEvent::CursorMoved {
            x: e.client_x() as f32 * ratio,
            y: e.client_y() as f32 * ratio,
        }));
    })?;

    let q = queue.clone();
    listen(window, "mouseup", move |e| {
        let Some(e) = e.dyn_ref::<MouseEvent>() else {
            return;
        };
        push(&q, WebInput::Input(InputEvent::MouseButton {
            button: MouseButton::from_dom_button(e.button()),
            pressed: false,
        }));
    })?;

    let q = queue.clone();
    listen(canvas, "wheel", move |e| {
        let Some(e) = e.dyn_ref::<WheelEvent>() else {
            return;
        };
        e.prevent_default();
        // DOM wheel deltas grow downward; one notch is about 100 px.
        let delta = (-e.delta_y() / 100.0) as f32;
        push(&q, WebInput::Input(InputEvent::Scroll { delta }));
    })?;

    listen(canvas, "contextmenu", |e| e.prevent_default())?;

    let q = queue.clone();
    listen(window, "keydown", move |e| {
        let Some(e) = e.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let typing = e
            .target()
            .is_some_and(|t| t.dyn_ref::<HtmlInputElement>().is_some());
        if !typing && !e.repeat() {
            push(&q, WebInput::Key(e.code()));
        }
    })?;

    let q = queue.clone();
    listen(window, "resize", move |_| push(&q, WebInput::Resize))
}

fn apply(engine: &mut BoxEngine, input: WebInput, window: &Window, canvas: &HtmlCanvasElement) {
    match input {
        WebInput::Command(command) => {
            let _ = engine.execute(&command);
        }
        WebInput::Input(event) => engine.handle_input(event),
        WebInput::Key(code) => {
            let _ = engine.handle_key_press(&code);
        }
        WebInput::Resize => {
            let (w, h) = fit_canvas(window, canvas);
            engine.resize(w, h);
        }
    }
}

fn request_frame(window: &Window, callback: &Closure<dyn FnMut()>) {
    if let Err(e) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {:?}", e);
    }
}

fn start_frame_loop(
    window: Window,
    canvas: HtmlCanvasElement,
    mut engine: BoxEngine,
    queue: Queue,
) -> Result<(), WoodboxError> {
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::default();
    let next = frame.clone();
    let w = window.clone();

    *frame.borrow_mut() = Some(Closure::new(move || {
        let pending: Vec<WebInput> = queue.borrow_mut().drain(..).collect();
        for input in pending {
            apply(&mut engine, input, &w, &canvas);
        }

        match engine.frame() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let (width, height) = fit_canvas(&w, &canvas);
                engine.resize(width, height);
                engine.recover_surface();
            }
            Err(e) => log::error!("render error: {e:?}"),
        }

        if let Some(callback) = next.borrow().as_ref() {
            request_frame(&w, callback);
        }
    }));

    let first = frame.borrow();
    let callback = first
        .as_ref()
        .ok_or_else(|| web_err("frame callback missing"))?;
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|e| js_err(&e))?;
    Ok(())
}
