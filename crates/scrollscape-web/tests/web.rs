#![cfg(target_arch = "wasm32")]

use scrollscape::bridge::protocol::{HEADER_FLOATS, HEADER_PROTOCOL_VERSION, PROTOCOL_VERSION};
use scrollscape_web::*;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn backdrop_exports_round_trip() {
    backdrop_init(640.0, 480.0);
    backdrop_content_height(2400.0);
    backdrop_tick(1.0 / 60.0);

    assert!(backdrop_vertex_count() > 0);
    assert!(!backdrop_vertices_ptr().is_null());
    assert!(!backdrop_header_ptr().is_null());

    let header = backdrop_header().to_vec();
    assert_eq!(header.len(), HEADER_FLOATS);
    assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);

    backdrop_teardown();
    backdrop_tick(1.0 / 60.0);
}

#[wasm_bindgen_test]
fn bad_config_is_rejected() {
    backdrop_init(640.0, 480.0);
    assert!(!backdrop_load_config("not json"));
    assert!(backdrop_load_config(r#"{"seed": 9}"#));
}

#[wasm_bindgen_test]
fn decoration_exports_round_trip() {
    let id = decoration_create("flock", 280.0, 160.0);
    decoration_hover(id, true);
    decoration_tick(1.0 / 60.0);
    assert!(decoration_vertex_count(id) > 0);
    decoration_resize(id, 140.0, 160.0);
    decoration_destroy(id);
    assert_eq!(decoration_vertex_count(id), 0);
}
