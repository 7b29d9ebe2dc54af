#[cfg(not(feature = "vectors"))]
compile_error!("scrollscape-web draws through the tessellated vector surface; enable the `vectors` feature");

pub mod runner;

pub use runner::{BackdropRunner, DecorationRunner};

use std::cell::RefCell;

use scrollscape::{InputEvent, SceneConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static BACKDROP: RefCell<Option<BackdropRunner>> = RefCell::new(None);
    static DECORATIONS: RefCell<Option<DecorationRunner>> = RefCell::new(None);
}

/// Run `f` against the backdrop runner. `None` until `backdrop_init`.
fn with_backdrop<R>(f: impl FnOnce(&mut BackdropRunner) -> R) -> Option<R> {
    BACKDROP.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Run `f` against the decoration runner, creating it on first use.
fn with_decorations<R>(f: impl FnOnce(&mut DecorationRunner) -> R) -> R {
    DECORATIONS.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.get_or_insert_with(|| {
            let config = SceneConfig::default();
            DecorationRunner::new(config.seed, config.fixed_dt)
        });
        f(runner)
    })
}

fn install_hooks() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::debug_1(&"scrollscape: logger already installed".into());
    }
}

// ---- Backdrop ----

#[wasm_bindgen]
pub fn backdrop_init(width: f32, height: f32) {
    install_hooks();

    let mut runner = BackdropRunner::new(SceneConfig::default());
    runner.init(width, height);
    BACKDROP.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("scrollscape: initialized");
}

/// Apply a JSON configuration. Returns false (and keeps the current
/// configuration) when it does not parse or validate.
#[wasm_bindgen]
pub fn backdrop_load_config(json: &str) -> bool {
    with_backdrop(|r| match r.load_config(json) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("scrollscape: rejected configuration: {err}");
            false
        }
    })
    .unwrap_or(false)
}

#[wasm_bindgen]
pub fn backdrop_tick(dt: f32) {
    with_backdrop(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn backdrop_scroll(offset: f32) {
    with_backdrop(|r| r.push_input(InputEvent::Scroll { offset }));
}

#[wasm_bindgen]
pub fn backdrop_content_height(height: f32) {
    with_backdrop(|r| r.push_input(InputEvent::ContentHeight { height }));
}

#[wasm_bindgen]
pub fn backdrop_resize(width: f32, height: f32) {
    with_backdrop(|r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn backdrop_teardown() {
    with_backdrop(|r| r.teardown());
}

// ---- Backdrop data accessors ----

#[wasm_bindgen]
pub fn backdrop_vertices_ptr() -> *const f32 {
    with_backdrop(|r| r.vertices_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn backdrop_vertex_count() -> u32 {
    with_backdrop(|r| r.vertex_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn backdrop_header_ptr() -> *const f32 {
    with_backdrop(|r| r.header_ptr()).unwrap_or(std::ptr::null())
}

/// Copy of the frame header for hosts that do not read linear memory.
#[wasm_bindgen]
pub fn backdrop_header() -> js_sys::Float32Array {
    with_backdrop(|r| js_sys::Float32Array::from(r.header().as_slice()))
        .unwrap_or_else(|| js_sys::Float32Array::new_with_length(0))
}

// ---- Card decorations ----

#[wasm_bindgen]
pub fn decoration_create(kind: &str, width: f32, height: f32) -> u32 {
    with_decorations(|d| d.create(kind, width, height))
}

#[wasm_bindgen]
pub fn decoration_destroy(id: u32) {
    with_decorations(|d| d.destroy(id));
}

#[wasm_bindgen]
pub fn decoration_tick(dt: f32) {
    with_decorations(|d| d.tick(dt));
}

#[wasm_bindgen]
pub fn decoration_hover(id: u32, hovered: bool) {
    with_decorations(|d| d.set_hovered(id, hovered));
}

#[wasm_bindgen]
pub fn decoration_resize(id: u32, width: f32, height: f32) {
    with_decorations(|d| d.resize(id, width, height));
}

#[wasm_bindgen]
pub fn decoration_vertices_ptr(id: u32) -> *const f32 {
    with_decorations(|d| d.vertices_ptr(id))
}

#[wasm_bindgen]
pub fn decoration_vertex_count(id: u32) -> u32 {
    with_decorations(|d| d.vertex_count(id))
}
