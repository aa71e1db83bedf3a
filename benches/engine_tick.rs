use criterion::{black_box, criterion_group, criterion_main, Criterion};
use termination::core::{compose, movements, Engine, Position, Rect, Shape, SpatialIndex};
use termination::term::FrameBuffer;
use termination::types::{ColorSpec, EntityId};

fn ball() -> Shape {
    Shape::single(["<-0->", "<0-->", "<-0->", "<--0>"])
}

fn bench_tick(c: &mut Criterion) {
    let mut fb = FrameBuffer::new(200, 60);
    let mut engine: Engine<()> = Engine::for_surface(&fb);
    for y in 0..60 {
        for x in [0, 50, 100, 150] {
            let e = engine.spawn(Position::new(x, y, y % 3));
            e.shape = ball();
            e.on_move(movements::right);
        }
    }

    c.bench_function("tick_240_entities", |b| {
        b.iter(|| {
            engine.tick(black_box(&mut fb)).unwrap();
        })
    });
}

fn bench_compose(c: &mut Criterion) {
    let mut fb = FrameBuffer::new(80, 24);
    let frame = "  (>'-')>\n <('-'<)\n^('-')^";
    let mask = "  yyyyyyy\n rrrrrrr\nBBBBBBB";

    c.bench_function("compose_three_lines", |b| {
        b.iter(|| {
            compose(
                &mut fb,
                black_box(frame),
                Some(mask),
                Position::new(10, 10, 0),
                ColorSpec::default(),
                '?',
            )
        })
    });
}

fn bench_spatial_query(c: &mut Criterion) {
    let mut index = SpatialIndex::new();
    for i in 0..1_000 {
        let rect = Rect::new((i * 7) % 200, (i * 13) % 60, 5, 1);
        index.insert(EntityId(i as u64), rect).unwrap();
    }

    c.bench_function("spatial_query_1000", |b| {
        b.iter(|| index.query(black_box(Rect::new(40, 20, 10, 4))))
    });
}

criterion_group!(benches, bench_tick, bench_compose, bench_spatial_query);
criterion_main!(benches);
