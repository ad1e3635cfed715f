#[macro_use]
extern crate criterion;
extern crate labyrinth;

use criterion::Criterion;
use labyrinth::generators::{seeded_rng, RecursiveBacktracker};
use labyrinth::renderers;
use labyrinth::units::{Height, KeepChance, Width};

fn full_maze(w: usize, h: usize) -> RecursiveBacktracker {
    let mut maze = RecursiveBacktracker::new(Width(w), Height(h), KeepChance(0.7))
        .expect("bench arguments are valid");
    let mut rng = seeded_rng(42);
    maze.generate(&mut rng, true);
    maze
}

fn bench_render_text_32x32(c: &mut Criterion) {
    let maze = full_maze(32, 32);
    c.bench_function("render_text_32x32", move |b| {
        b.iter(|| renderers::render_text(&maze))
    });
}

fn bench_render_html_32x32(c: &mut Criterion) {
    let maze = full_maze(32, 32);
    c.bench_function("render_html_32x32", move |b| {
        b.iter(|| renderers::render_html(&maze))
    });
}

criterion_group!(benches, bench_render_text_32x32, bench_render_html_32x32);
criterion_main!(benches);
