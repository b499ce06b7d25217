use bvh_skeleton_probe::{load_skeleton_from_string, suggest_name_map};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A long chain of spine-like joints with a toe chain at the end, followed by many motion lines.
fn generated_bvh(num_joints: usize, num_frames: usize) -> String {
    let mut bvh = String::from("HIERARCHY\nROOT Hips\n{\n  OFFSET 0 90 0\n");
    for i in 0..num_joints {
        let name = if i + 3 >= num_joints {
            format!("LeftToe_{:02}", i)
        } else {
            format!("Spine{}", i)
        };
        bvh.push_str(&format!("  JOINT {}\n  {{\n    OFFSET 0 {}.5 0\n", name, i % 20));
    }
    bvh.push_str("  End Site\n  {\n    OFFSET 0 1 0\n  }\n");
    for _ in 0..=num_joints {
        bvh.push_str("}\n");
    }
    bvh.push_str(&format!("MOTION\nFrames: {}\nFrame Time: 0.0083333\n", num_frames));
    let frame = vec!["0.0"; 3 * (num_joints + 2)].join(" ");
    for _ in 0..num_frames {
        bvh.push_str(&frame);
        bvh.push('\n');
    }
    bvh
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let bvh = generated_bvh(200, 2000);

    let mut group = c.benchmark_group("sample-size-example");
    group.sample_size(10);
    group.bench_function("probe generated", |b| {
        b.iter(|| {
            let skeleton = load_skeleton_from_string(black_box(&bvh));
            black_box(suggest_name_map(&skeleton.hierarchy.order))
        })
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
