use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use twelvedays_core::*;

fn scratched_surface(width: f64, height: f64, ratio: f64) -> SoftwareSurface {
    let mut surface = SoftwareSurface::new();
    let layout = SurfaceLayout::new(LogicalSize::new(width, height), ratio);
    render_cover(&mut surface, layout, &CoverStyle::default()).unwrap();
    for y in (0..height as u32).step_by(60) {
        for x in (0..width as u32).step_by(30) {
            surface.erase_circle(Point::new(f64::from(x), f64::from(y)), 30.0);
        }
    }
    surface
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal_sampling");
    for (name, ratio) in [("dpr1", 1.0), ("dpr2", 2.0), ("dpr3", 3.0)] {
        let surface = scratched_surface(320.0, 420.0, ratio);
        for stride in [1, 40] {
            let detector = RevealDetector::new(ScratchConfig::DEFAULT_THRESHOLD, stride);
            group.bench_function(format!("{name}/stride{stride}"), |b| {
                b.iter(|| black_box(detector.check(black_box(&surface))))
            });
        }
    }
    group.finish();
}

fn bench_stroke(c: &mut Criterion) {
    c.bench_function("stroke_across_card", |b| {
        b.iter(|| {
            let mut card = Card::covered(CardId::from(1u8), ScratchConfig::default());
            card.attach_surface(SoftwareSurface::new(), LogicalSize::new(320.0, 420.0), 2.0)
                .unwrap();
            card.stroke_start(Point::new(0.0, 0.0));
            card.stroke_move(Point::new(320.0, 420.0));
            black_box(card.stroke_end())
        })
    });
}

criterion_group!(benches, bench_sampling, bench_stroke);
criterion_main!(benches);
