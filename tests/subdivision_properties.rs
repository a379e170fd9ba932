use edge_split_sketch::geometry::{normal, perpendicular_line, Point, Triangle};
use edge_split_sketch::sketch::{assemble_frame, SketchConfig};
use edge_split_sketch::subdivision::{split, triangle_count};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Rounding the peak offset to the grid moves it by at most half a unit per axis.
const QUANTIZATION: f64 = 0.75;

fn random_segment(rng: &mut StdRng) -> (Point, Point) {
    loop {
        let a = Point::new(rng.gen_range(-500..500), rng.gen_range(-500..500));
        let b = Point::new(rng.gen_range(-500..500), rng.gen_range(-500..500));
        if a != b {
            return (a, b);
        }
    }
}

fn assert_peak_on_bisector(t: &Triangle, length: f64) {
    let base = t.base_c - t.base_b;
    if base == Point::default() {
        return;
    }
    let displacement = t.peak_a - t.base_midpoint();
    let distance = displacement.to_vec2().length();
    assert!(
        (distance - length).abs() <= QUANTIZATION,
        "peak of {t:?} is {distance} from its base midpoint, expected {length}"
    );

    let base_len = base.to_vec2().length();
    let dot = base.dot(&displacement) as f64;
    assert!(
        dot.abs() <= base_len * QUANTIZATION,
        "displacement of {t:?} is not perpendicular to its base (dot {dot})"
    );
}

#[test]
fn triangle_counts_follow_depth() {
    let mut rng = StdRng::seed_from_u64(1);
    for max_depth in 0..7 {
        let (a, b) = random_segment(&mut rng);
        let triangles = split(a, b, rng.gen_range(5.0..60.0), 0, max_depth);
        assert_eq!(triangles.len(), (1usize << (max_depth + 1)) - 1);
        assert_eq!(triangles.len(), triangle_count(max_depth));
    }
}

#[test]
fn every_peak_sits_on_its_bisector() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..50 {
        let (a, b) = random_segment(&mut rng);
        let length = rng.gen_range(5.0..60.0);
        for t in split(a, b, length, 0, 5) {
            assert_peak_on_bisector(&t, length);
        }
    }
}

#[test]
fn depth_zero_matches_perpendicular_line() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let (a, b) = random_segment(&mut rng);
        let length = rng.gen_range(0.0..80.0);
        let expected = Triangle::new(a, b, perpendicular_line(a, b, length).b);
        assert_eq!(split(a, b, length, 0, 0), vec![expected]);
        assert_eq!(split(a, b, length, 0, -1), vec![expected]);
    }
}

#[test]
fn normals_are_unit_and_opposite() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..200 {
        let (a, b) = random_segment(&mut rng);
        let n = normal(a, b);
        assert!((n.length() - 1.0).abs() < 1e-9);
        assert!((n + normal(b, a)).length() < 1e-9);
    }
}

#[test]
fn output_is_pre_order() {
    fn check(triangles: &[Triangle], depth: i32, max_depth: i32) -> usize {
        let root = triangles[0];
        if depth >= max_depth {
            return 1;
        }
        let left = &triangles[1..];
        assert_eq!((left[0].base_b, left[0].base_c), (root.base_b, root.peak_a));
        let left_size = check(left, depth + 1, max_depth);

        let right = &triangles[1 + left_size..];
        assert_eq!((right[0].base_b, right[0].base_c), (root.peak_a, root.base_c));
        let right_size = check(right, depth + 1, max_depth);

        1 + left_size + right_size
    }

    let triangles = split(Point::new(-160, 100), Point::new(0, -170), 35.0, 0, 4);
    assert_eq!(check(&triangles, 0, 4), triangles.len());
}

#[test]
fn horizontal_segment_scenario() {
    let triangles = split(Point::new(0, 0), Point::new(10, 0), 5.0, 0, 1);
    assert_eq!(triangles.len(), 3);
    assert_eq!(triangles[0].get(), [0, 0, 10, 0, 5, -5]);
    assert_eq!((triangles[1].base_b, triangles[1].base_c), (Point::new(0, 0), Point::new(5, -5)));
    assert_eq!((triangles[2].base_b, triangles[2].base_c), (Point::new(5, -5), Point::new(10, 0)));
}

#[test]
fn default_frame_keeps_every_peak_on_its_bisector() {
    let config = SketchConfig::default();
    let frame = assemble_frame(&config, 100.0);
    assert_eq!(frame.len(), 189);
    for t in &frame {
        assert_peak_on_bisector(t, 100.0);
    }
}
