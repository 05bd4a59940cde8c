#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use divwin_core::{MemoryStore, MemorySurface, Position, Size};
use divwin_web::{PointerButton, WindowPointerAdapter, WindowPointerConfig, WindowPointerPhase};
use divwin_window::{CaptionTarget, HandlerCommand, WindowHost, WindowOptions};
use wasm_bindgen_test::wasm_bindgen_test;

fn adapter() -> WindowPointerAdapter<MemorySurface, MemoryStore> {
    let mut surface = MemorySurface::new(Size::new(640, 480));
    surface.insert_element(None, "w").expect("container");
    let mut host = WindowHost::new(surface, MemoryStore::new());
    host.open(
        "w",
        Some(WindowOptions::new().with_position("10px", "10px")),
    )
    .expect("open");
    WindowPointerAdapter::new(host, WindowPointerConfig::default())
}

#[wasm_bindgen_test]
fn drag_round_trip_runs_under_wasm() {
    let mut adapter = adapter();
    let down = adapter
        .pointer_down(
            "w",
            CaptionTarget::DragStrip,
            1,
            PointerButton::Primary,
            Position::new(0, 0),
        )
        .expect("pointer down");
    assert_eq!(down.command, Some(HandlerCommand::Install));

    let moved = adapter
        .pointer_move(1, Position::new(5, 5))
        .expect("pointer move");
    assert_eq!(moved.position, Some(Position::new(15, 15)));

    let up = adapter.pointer_up(1, PointerButton::Primary, Position::new(5, 5));
    assert_eq!(up.command, Some(HandlerCommand::Remove));
    assert_eq!(up.log.phase, WindowPointerPhase::PointerUp);
}

#[wasm_bindgen_test]
fn logs_serialize_to_json() {
    let mut adapter = adapter();
    adapter.blur();
    let logs = adapter.take_logs();
    let json = serde_json::to_string(&logs).expect("serialize");
    assert!(json.contains("\"phase\":\"blur\""));
    assert!(json.contains("no_active_drag"));
}
