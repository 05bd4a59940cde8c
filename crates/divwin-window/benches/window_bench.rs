//! Benchmarks for z-order arbitration, tray-slot search, and drag routing.
//!
//! Run with: cargo bench -p divwin-window

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use divwin_core::{MemoryStore, MemorySurface, Position, Rect, Size};
use divwin_window::arrange::{available_slot, next_z_index};
use divwin_window::{CaptionTarget, WindowHost, WindowOptions};
use std::hint::black_box;

/// Host with `n` top-level windows laid out on a grid.
fn make_host(n: usize) -> WindowHost<MemorySurface, MemoryStore> {
    let mut surface = MemorySurface::new(Size::new(4096, 4096));
    for i in 0..n {
        surface
            .insert_element(None, &format!("w{i}"))
            .expect("insert container");
    }
    let mut host = WindowHost::new(surface, MemoryStore::new());
    for i in 0..n {
        let left = (i % 16) as i32 * 200;
        let top = (i / 16) as i32 * 150;
        let options = WindowOptions::new()
            .with_position(format!("{left}px"), format!("{top}px"))
            .with_size("180px", "120px");
        host.open(&format!("w{i}"), Some(options)).expect("open window");
    }
    host
}

fn bench_next_z_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("arrange/next_z_index");
    for n in [4, 32, 256] {
        let indices: Vec<Option<i32>> = (0..n)
            .map(|i| if i % 3 == 0 { None } else { Some(i) })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &indices, |b, indices| {
            b.iter(|| black_box(next_z_index(indices.iter().copied())))
        });
    }
    group.finish();
}

fn bench_available_slot(c: &mut Criterion) {
    let mut group = c.benchmark_group("arrange/available_slot");
    for n in [4, 32, 256] {
        let rects: Vec<Rect> = (0..n)
            .map(|i| Rect::new(i * 200, if i % 2 == 0 { 743 } else { 100 }, 200, 23))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &rects, |b, rects| {
            b.iter(|| black_box(available_slot(rects.iter().copied(), 743, 200)))
        });
    }
    group.finish();
}

fn bench_raise(c: &mut Criterion) {
    let mut group = c.benchmark_group("host/update_z_order");
    for n in [4, 32, 128] {
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter_batched(
                || make_host(n),
                |mut host| {
                    for i in 0..n {
                        let z = host
                            .window_mut(&format!("w{i}"))
                            .and_then(|mut w| w.update_z_order())
                            .expect("raise");
                        black_box(z);
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_minimize_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("host/minimize_pack");
    for n in [4, 16, 64] {
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter_batched(
                || make_host(n),
                |mut host| {
                    for i in 0..n {
                        host.window_mut(&format!("w{i}"))
                            .and_then(|mut w| w.minimize(false).map(|_| ()))
                            .expect("minimize");
                    }
                    black_box(host.registry().len())
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    c.bench_function("host/drag_100_moves", |b| {
        b.iter_batched(
            || {
                let mut host = make_host(8);
                host.caption_pointer_down("w0", CaptionTarget::DragStrip, 1, Position::new(0, 0))
                    .expect("pointer down");
                host
            },
            |mut host| {
                for step in 0..100 {
                    let moved = host
                        .pointer_move(1, Position::new(step * 3, step * 2))
                        .expect("pointer move");
                    black_box(moved.position);
                }
                host.pointer_up(1, Position::new(300, 200))
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_layout_round_trip(c: &mut Criterion) {
    c.bench_function("host/layout_save_load_64", |b| {
        b.iter_batched(
            || make_host(64),
            |mut host| {
                host.save_layout(None).expect("save");
                black_box(host.load_layout(None).expect("load"))
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_next_z_index,
    bench_available_slot,
    bench_raise,
    bench_minimize_pack,
    bench_drag,
    bench_layout_round_trip,
);
criterion_main!(benches);
