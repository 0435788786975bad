use std::hint::black_box;
use std::time::Instant;

use starlight_geo::{GeoPoint, build_arc, project};

fn endpoints() -> (starlight_geo::SpherePoint, starlight_geo::SpherePoint) {
    let a = project(GeoPoint::from_degrees(37.56668, 126.97841), 1.3).expect("valid coordinate");
    let b = project(GeoPoint::from_degrees(5.55363, -0.196481), 1.3).expect("valid coordinate");
    (a, b)
}

fn bench_project(iterations: usize) {
    let start = Instant::now();
    for i in 0..iterations {
        let lat = (i % 180) as f64 - 90.0;
        let lng = (i % 360) as f64 - 180.0;
        let _ = black_box(project(black_box(GeoPoint::from_degrees(lat, lng)), 1.3));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  project ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_build_arc(segments: u32, iterations: usize) {
    let (a, b) = endpoints();
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(build_arc(black_box(a), black_box(b), 1.3, segments));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  build_arc (segments={segments}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_spline(segments: u32, samples: usize, iterations: usize) {
    let (a, b) = endpoints();
    let arc = build_arc(a, b, 1.3, segments).expect("valid arc");
    let start = Instant::now();
    for _ in 0..iterations {
        let spline = arc.spline().expect("arc has points");
        let _ = black_box(spline.spaced_points(black_box(samples)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  spline + {samples} samples (segments={segments}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("=== Geo Benchmarks ===\n");

    println!("Projection:");
    bench_project(100_000);

    println!("\nArc construction:");
    bench_build_arc(10, 10_000);
    bench_build_arc(100, 10_000);
    bench_build_arc(1000, 1_000);

    println!("\nSpline fit and sampling:");
    bench_spline(100, 20, 1_000);
    bench_spline(100, 200, 1_000);

    println!("\n=== Done ===");
}
