use divwin_core::{
    MemoryStore, MemorySurface, Position, Rect, Size, StyleProperty, Surface, SurfaceError,
};
use divwin_window::{
    HostConfig, WindowError, WindowHost, WindowMode, WindowOptions, WindowResult,
};
use proptest::prelude::*;

type Host = WindowHost<MemorySurface, MemoryStore>;

fn host_with(containers: &[&str]) -> Host {
    let mut surface = MemorySurface::new(Size::new(1024, 768));
    for id in containers {
        surface.insert_element(None, id).unwrap();
    }
    WindowHost::new(surface, MemoryStore::new())
}

fn rect_of(host: &Host, id: &str) -> Rect {
    host.surface()
        .offset_rect(&format!("{id}_windowTemplate"))
        .unwrap()
}

fn root_style(host: &Host, id: &str, property: StyleProperty) -> String {
    host.surface()
        .style(&format!("{id}_windowTemplate"), property)
        .unwrap()
}

fn placed(left: i32, top: i32, width: i32, height: i32) -> WindowOptions {
    WindowOptions::new()
        .with_position(format!("{left}px"), format!("{top}px"))
        .with_size(format!("{width}px"), format!("{height}px"))
}

// ---- Construction ----

#[test]
fn missing_container_fails_construction() {
    let mut host = host_with(&[]);
    let err = host.open("nope", None).unwrap_err();
    assert!(matches!(err, WindowError::ContainerNotFound { id } if id == "nope"));
    assert!(host.registry().is_empty());
}

#[test]
fn opening_twice_is_rejected() {
    let mut host = host_with(&["w"]);
    host.open("w", None).unwrap();
    assert!(matches!(
        host.open("w", None),
        Err(WindowError::DuplicateWindow { .. })
    ));
    assert_eq!(host.registry().len(), 1);
}

#[test]
fn failed_construction_leaves_the_container_untouched() -> WindowResult<()> {
    let mut host = host_with(&["w", "w_windowContent"]);
    host.surface_mut().append_text("w", "hello")?;

    let err = host.open("w", None).map(|_| ()).unwrap_err();
    assert!(matches!(
        err,
        WindowError::Surface(SurfaceError::DuplicateElement { ref id }) if id == "w_windowContent"
    ));
    assert!(host.registry().is_empty());
    assert!(!host.surface().contains("w_windowTemplate"));
    assert!(!host.surface().contains("w_captionBar"));
    assert_eq!(host.surface().text("w")?, "hello");

    host.surface_mut().remove("w_windowContent")?;
    host.open("w", None)?;
    assert_eq!(host.surface().text("w_windowContent")?, "hello");
    Ok(())
}

#[test]
fn existing_root_identity_blocks_construction() {
    let mut host = host_with(&["w", "w_windowTemplate"]);
    let err = host.open("w", None).map(|_| ()).unwrap_err();
    assert!(matches!(
        err,
        WindowError::Surface(SurfaceError::DuplicateElement { ref id }) if id == "w_windowTemplate"
    ));
    assert!(host.surface().contains("w_windowTemplate"));
}

#[test]
fn construction_wraps_existing_content_and_reads_caption() {
    let mut host = host_with(&["w"]);
    host.surface_mut()
        .append_text("w", "All good men")
        .unwrap()
        .set_attribute("w", "caption", "Window 1")
        .unwrap();

    host.open("w", None).unwrap();

    let surface = host.surface();
    assert_eq!(surface.text("w_windowContent").unwrap(), "All good men");
    assert_eq!(surface.text("w").unwrap(), "");
    assert_eq!(surface.inner_html("w_windowCaption").unwrap(), "Window 1");
    assert_eq!(surface.window_roots(None).unwrap(), vec!["w_windowTemplate"]);
    assert_eq!(
        surface.style("w_windowTemplate", StyleProperty::Resize).unwrap(),
        "both"
    );
}

#[test]
fn declared_options_apply_when_no_explicit_options() {
    let mut host = host_with(&["w"]);
    host.surface_mut()
        .set_attribute(
            "w",
            "divWindowOptions",
            r#"{"hasClose": false, "left": "40px", "top": "60px"}"#,
        )
        .unwrap();

    host.open("w", None).unwrap();

    assert_eq!(
        host.surface().style("w_close", StyleProperty::Display).unwrap(),
        "none"
    );
    assert_eq!(rect_of(&host, "w").position(), Position::new(40, 60));
    assert!(!host.window("w").unwrap().options().has_close);
}

#[test]
fn explicit_options_override_declared_ones() {
    let mut host = host_with(&["w"]);
    host.surface_mut()
        .set_attribute("w", "divWindowOptions", r#"{"hasMaximize": false}"#)
        .unwrap();

    host.open("w", Some(WindowOptions::new().with_minimize(false)))
        .unwrap();

    let surface = host.surface();
    assert_eq!(surface.style("w_maximize", StyleProperty::Display).unwrap(), "");
    assert_eq!(
        surface.style("w_minimize", StyleProperty::Display).unwrap(),
        "none"
    );
}

#[test]
fn malformed_declared_options_fall_back_to_defaults() {
    let mut host = host_with(&["w"]);
    host.surface_mut()
        .set_attribute("w", "divWindowOptions", "{not json")
        .unwrap();
    host.open("w", None).unwrap();
    assert_eq!(host.window("w").unwrap().options(), &WindowOptions::default());
}

#[test]
fn initial_maximize_wins_over_initial_minimize() {
    let mut host = host_with(&["w"]);
    host.open("w", Some(WindowOptions::new().minimized().maximized()))
        .unwrap();
    assert_eq!(host.window("w").unwrap().mode(), WindowMode::Maximized);
}

#[test]
fn initial_minimize_parks_the_window() {
    let mut host = host_with(&["w"]);
    host.open("w", Some(placed(100, 100, 300, 200).minimized()))
        .unwrap();
    assert_eq!(
        host.window("w").unwrap().mode(),
        WindowMode::Minimized { parked: true }
    );
    assert_eq!(rect_of(&host, "w"), Rect::new(0, 743, 200, 23));
}

#[test]
fn invalid_host_config_is_rejected() {
    let config = HostConfig {
        caption_height: 0,
        ..HostConfig::default()
    };
    let result = WindowHost::with_config(
        MemorySurface::new(Size::new(800, 600)),
        MemoryStore::new(),
        config,
    );
    assert!(matches!(result, Err(WindowError::Config(_))));
}

// ---- Mutators ----

#[test]
fn setters_chain_and_write_styles() -> WindowResult<()> {
    let mut host = host_with(&["w"]);
    host.open("w", None)?
        .set_caption("Hello")?
        .set_color("#90EE90")?
        .set_position("10px", "20px")?
        .set_size("300px", "200px")?
        .set_content("<p>body</p>")?;

    assert_eq!(
        root_style(&host, "w", StyleProperty::Border),
        "1px solid #90EE90"
    );
    assert_eq!(
        host.surface()
            .style("w_captionBar", StyleProperty::BackgroundColor)?,
        "#90EE90"
    );
    assert_eq!(host.surface().inner_html("w_windowCaption")?, "Hello");
    assert_eq!(host.surface().inner_html("w_windowContent")?, "<p>body</p>");

    let window = host.window_mut("w")?;
    assert_eq!(window.position()?, Position::new(10, 20));
    assert_eq!(window.size()?, Size::new(300, 200));
    Ok(())
}

#[test]
fn width_and_height_accept_relative_units() -> WindowResult<()> {
    let mut host = host_with(&["w"]);
    host.open("w", None)?.set_width("50%")?.set_height("25%")?;
    assert_eq!(rect_of(&host, "w").size(), Size::new(512, 192));
    Ok(())
}

#[test]
fn unknown_window_handle_is_an_error() {
    let mut host = host_with(&[]);
    assert!(matches!(
        host.window_mut("ghost"),
        Err(WindowError::UnknownWindow { .. })
    ));
}

// ---- State machine ----

#[test]
fn minimize_then_restore_round_trips_bounds() -> WindowResult<()> {
    let mut host = host_with(&["w"]);
    host.open("w", Some(placed(100, 100, 300, 200)))?;
    let before = rect_of(&host, "w");

    host.window_mut("w")?.minimize(false)?;
    assert_eq!(rect_of(&host, "w"), Rect::new(0, 743, 200, 23));
    assert_eq!(root_style(&host, "w", StyleProperty::Resize), "none");
    assert_eq!(
        host.surface()
            .style("w_windowDraggableArea", StyleProperty::Cursor)?,
        "default"
    );

    host.window_mut("w")?.restore()?;
    assert_eq!(rect_of(&host, "w"), before);
    assert_eq!(before, Rect::new(100, 100, 300, 200));
    assert_eq!(root_style(&host, "w", StyleProperty::Resize), "both");
    assert_eq!(host.window("w").unwrap().mode(), WindowMode::Normal);
    Ok(())
}

#[test]
fn maximize_then_restore_round_trips_bounds() -> WindowResult<()> {
    let mut host = host_with(&["w"]);
    host.open("w", Some(placed(100, 100, 300, 200)))?;

    host.window_mut("w")?.maximize()?;
    assert_eq!(root_style(&host, "w", StyleProperty::Left), "3px");
    assert_eq!(root_style(&host, "w", StyleProperty::Width), "99%");
    assert_eq!(rect_of(&host, "w"), Rect::new(3, 3, 1013, 760));

    host.window_mut("w")?.restore()?;
    assert_eq!(rect_of(&host, "w"), Rect::new(100, 100, 300, 200));
    Ok(())
}

#[test]
fn minimize_in_place_keeps_position_and_drag() -> WindowResult<()> {
    let mut host = host_with(&["w"]);
    host.open("w", Some(placed(100, 100, 300, 200)))?;
    host.window_mut("w")?.minimize(true)?;

    assert_eq!(rect_of(&host, "w"), Rect::new(100, 100, 300, 23));
    let mode = host.window("w").unwrap().mode();
    assert_eq!(mode, WindowMode::Minimized { parked: false });
    assert!(mode.drag_enabled());
    Ok(())
}

#[test]
fn opting_out_of_parking_minimizes_in_place() -> WindowResult<()> {
    let mut host = host_with(&["w"]);
    host.open(
        "w",
        Some(placed(50, 60, 300, 200).with_move_minimized_to_bottom(false)),
    )?
    .minimize(false)?;
    assert_eq!(rect_of(&host, "w").position(), Position::new(50, 60));
    Ok(())
}

#[test]
fn parked_windows_pack_along_the_tray_row() -> WindowResult<()> {
    let mut host = host_with(&["a", "b", "c"]);
    for id in ["a", "b", "c"] {
        host.open(id, Some(placed(100, 100, 300, 200)))?;
    }
    for id in ["a", "b", "c"] {
        host.window_mut(id)?.minimize(false)?;
    }
    let lefts: Vec<i32> = ["a", "b", "c"]
        .iter()
        .map(|id| rect_of(&host, id).left())
        .collect();
    assert_eq!(lefts, vec![0, 200, 400]);
    Ok(())
}

#[test]
fn toggles_restore_from_the_named_state() -> WindowResult<()> {
    let mut host = host_with(&["w"]);
    host.open("w", Some(placed(10, 10, 300, 200)))?;

    host.window_mut("w")?.maximize_restore()?;
    assert!(host.window("w").unwrap().is_maximized());
    host.window_mut("w")?.minimize_restore()?;
    assert!(host.window("w").unwrap().is_minimized());
    host.window_mut("w")?.minimize_restore()?;
    assert_eq!(host.window("w").unwrap().mode(), WindowMode::Normal);
    Ok(())
}

#[test]
fn restore_without_snapshot_keeps_geometry() -> WindowResult<()> {
    let mut host = host_with(&["w"]);
    host.open("w", Some(placed(7, 8, 90, 80)))?.restore()?;
    assert_eq!(rect_of(&host, "w"), Rect::new(7, 8, 90, 80));
    Ok(())
}

#[test]
fn close_removes_exactly_one_registry_entry() -> WindowResult<()> {
    let mut host = host_with(&["a", "b"]);
    host.open("a", None)?;
    host.open("b", None)?;

    let closed = host.window_mut("a")?.close()?;
    assert_eq!(closed.window.id().as_str(), "a");
    assert!(closed.drag.is_none());
    assert_eq!(host.registry().len(), 1);
    assert!(host.window("b").is_some());
    assert!(!host.surface().contains("a_windowTemplate"));
    assert!(host.surface().contains("a"));
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Minimize(bool),
    Maximize,
    Restore,
    MinimizeRestore,
    MaximizeRestore,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(Op::Minimize),
        Just(Op::Maximize),
        Just(Op::Restore),
        Just(Op::MinimizeRestore),
        Just(Op::MaximizeRestore),
    ]
}

proptest! {
    #[test]
    fn minimized_and_maximized_are_never_both_set(ops in proptest::collection::vec(op_strategy(), 1..24)) {
        let mut host = host_with(&["w"]);
        host.open("w", Some(placed(100, 100, 300, 200))).unwrap();
        for op in ops {
            let mut window = host.window_mut("w").unwrap();
            match op {
                Op::Minimize(at_position) => { window.minimize(at_position).unwrap(); }
                Op::Maximize => { window.maximize().unwrap(); }
                Op::Restore => { window.restore().unwrap(); }
                Op::MinimizeRestore => { window.minimize_restore().unwrap(); }
                Op::MaximizeRestore => { window.maximize_restore().unwrap(); }
            }
            let state = host.window("w").unwrap();
            prop_assert!(!(state.is_minimized() && state.is_maximized()));
        }
    }

    #[test]
    fn restore_returns_pre_transition_bounds(
        left in 0i32..600,
        top in 0i32..500,
        width in 50i32..400,
        height in 30i32..300,
        maximize in any::<bool>(),
    ) {
        let mut host = host_with(&["w"]);
        host.open("w", Some(placed(left, top, width, height))).unwrap();
        let before = rect_of(&host, "w");
        {
            let mut window = host.window_mut("w").unwrap();
            if maximize {
                window.maximize().unwrap();
            } else {
                window.minimize(false).unwrap();
            }
            window.restore().unwrap();
        }
        prop_assert_eq!(rect_of(&host, "w"), before);
    }
}
