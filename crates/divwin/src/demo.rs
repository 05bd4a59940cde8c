#![forbid(unsafe_code)]

//! Demo page composition.
//!
//! Two plain outer windows, three positioned ones, and a `www` window hosting
//! two levels of nested windows.

use divwin_core::{KeyValueStore, MemorySurface, Size, Surface, SurfaceResult};
use divwin_window::{WindowHost, WindowId, WindowOptions, WindowResult};

/// Container ids the demo expects, in page order.
pub const DEMO_CONTAINERS: [&str; 8] = [
    "outerwindow1",
    "outerwindow2",
    "window1",
    "window2",
    "window3",
    "www",
    "innerwindow1",
    "innerwindow2",
];

/// Headless page holding every demo container at the top level.
pub fn demo_surface(viewport: Size) -> SurfaceResult<MemorySurface> {
    let mut surface = MemorySurface::new(viewport);
    for id in DEMO_CONTAINERS {
        surface
            .insert_element(None, id)?
            .set_attribute(id, "caption", id)?;
    }
    Ok(surface)
}

/// Decorate the demo containers; returns the constructed window ids.
pub fn compose_demo<S, K>(host: &mut WindowHost<S, K>) -> WindowResult<Vec<WindowId>>
where
    S: Surface,
    K: KeyValueStore,
{
    host.open("outerwindow1", None)?;
    host.open("outerwindow2", None)?;
    host.open("window1", None)?.set_position("0px", "0px")?;
    host.open("window2", Some(WindowOptions::new().with_maximize(false)))?;
    host.open("window3", None)?;

    host.open("www", None)?
        .set_position("50px", "300px")?
        .set_size("400px", "400px")?
        .create("innerwindow1", None)?
        .set_position("10px", "50px")?
        .set_color("#90EE90")?
        .create("innerwindow2", None)?
        .set_position("60px", "100px")?
        .set_color("#add8e6")?;

    tracing::info!(
        target: "divwin.window",
        windows = host.registry().len(),
        "demo composed"
    );
    Ok(host.registry().ids())
}
