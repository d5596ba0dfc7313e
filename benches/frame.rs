use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flycam::input::InputIntent;
use flycam::prelude::*;
use flycam::render::{EdgeFunctionRasterizer, FrameBuffer, Rasterizer};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn create_buffer() -> Vec<u32> {
    vec![0u32; (BUFFER_WIDTH * BUFFER_HEIGHT) as usize]
}

fn corner_camera() -> Camera {
    let mut camera = Camera::new(CameraSettings {
        start_position: Vec3::new(-4.0, -4.0, -4.0),
        ..CameraSettings::default()
    });
    // Face the cube from its corner, three faces visible.
    camera.rotate(-std::f32::consts::FRAC_PI_4, 0.615, 1.0 / camera.settings().turn_speed);
    camera
}

fn benchmark_frame_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_assembly");

    let cube = Scene::cube();
    let with_terrain = Scene::cube().with_terrain(
        FlatTerrain::new(100.0, 10.0, 10).expect("terrain parameters are valid"),
    );

    for mode in [
        RenderMode::Wireframe,
        RenderMode::Filled,
        RenderMode::FilledWireframe,
    ] {
        let mut engine = Engine::new(Projection::pinhole(200.0, BUFFER_WIDTH, BUFFER_HEIGHT, 0.1));
        engine.set_render_mode(mode);

        for (name, scene) in [("cube", &cube), ("cube_terrain", &with_terrain)] {
            group.bench_with_input(
                BenchmarkId::new(format!("{mode:?}"), name),
                scene,
                |b, scene| {
                    let mut camera = corner_camera();
                    b.iter(|| engine.frame(&mut camera, black_box(scene), 0.0, &InputIntent::IDLE));
                },
            );
        }
    }

    group.finish();
}

fn benchmark_polygon_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("polygon_fill");
    let rasterizer = EdgeFunctionRasterizer::new();

    for (name, half) in [("small", 10), ("medium", 100), ("large", 280)] {
        let (cx, cy) = (BUFFER_WIDTH as i32 / 2, BUFFER_HEIGHT as i32 / 2);
        let quad = [
            ScreenPoint::new(cx - half, cy - half),
            ScreenPoint::new(cx - half, cy + half),
            ScreenPoint::new(cx + half, cy + half),
            ScreenPoint::new(cx + half, cy - half),
        ];
        group.bench_with_input(BenchmarkId::new("quad", name), &quad, |b, quad| {
            let mut buffer = create_buffer();
            b.iter(|| {
                let mut fb = FrameBuffer::new(&mut buffer, BUFFER_WIDTH, BUFFER_HEIGHT);
                rasterizer.fill_polygon(black_box(quad), &mut fb, 0xFF46_6EC8);
            });
        });
    }

    group.bench_function("full_frame_draw", |b| {
        let mut engine = Engine::new(Projection::pinhole(200.0, BUFFER_WIDTH, BUFFER_HEIGHT, 0.1));
        engine.set_render_mode(RenderMode::FilledWireframe);
        let frame = engine.render(&corner_camera(), &Scene::cube());
        let mut renderer = Renderer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| renderer.draw(black_box(&frame)));
    });

    group.finish();
}

criterion_group!(benches, benchmark_frame_assembly, benchmark_polygon_fill);
criterion_main!(benches);
