use std::hint::black_box;
use std::time::Instant;

use astro_mesh::{Vertex, compute_face_normals, ship_mesh};

fn make_strip(triangle_count: usize) -> Vec<Vertex> {
    let color = [1.0, 1.0, 1.0];
    (0..triangle_count)
        .flat_map(|i| {
            let x = i as f32;
            [
                Vertex::new([x, 0.0, 0.0], color),
                Vertex::new([x + 1.0, 0.0, 0.0], color),
                Vertex::new([x, 1.0, (i % 7) as f32], color),
            ]
        })
        .collect()
}

fn bench_face_normals(triangle_count: usize, iterations: usize) {
    let mut verts = make_strip(triangle_count);
    assert!(compute_face_normals(&mut verts).is_ok());

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(compute_face_normals(black_box(&mut verts)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  face normals ({triangle_count} triangles, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_ship_build(iterations: usize) {
    assert!(ship_mesh().is_ok());

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(ship_mesh());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  ship mesh build ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== astro-mesh benchmarks ===");
    bench_ship_build(10_000);
    for count in [26, 1_000, 100_000] {
        bench_face_normals(count, 100);
    }
}
