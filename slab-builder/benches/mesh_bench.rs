use std::hint::black_box;
use std::path::Path;

use criterion::{Criterion, criterion_group, criterion_main};
use formwork_rs::io::import::{BuildRequest, Importer};
use formwork_rs::mesh::generate_meshes;
use formwork_rs::placement::{World, run_placement};
use formwork_rs::util::CancelToken;
use slab_builder::io;

pub const HALL_PATH: &str = "../assets/hall.json";

fn load_request(path: &str) -> BuildRequest {
    let ext_request = io::read_build_request(Path::new(path)).unwrap();
    Importer::default().import_request(&ext_request).unwrap()
}

fn mesh_bench(c: &mut Criterion) {
    let request = load_request(HALL_PATH);
    let props = request.properties().unwrap();
    let cancel = CancelToken::new();

    let mut group = c.benchmark_group("meshes");
    group.bench_function("generate_hall", |b| {
        b.iter(|| black_box(generate_meshes(&props, &request.environment, &cancel).unwrap()))
    });
    group.finish();
}

fn placement_bench(c: &mut Criterion) {
    let request = load_request(HALL_PATH);
    let props = request.properties().unwrap();
    let cancel = CancelToken::new();
    let meshes = generate_meshes(&props, &request.environment, &cancel).unwrap();

    let mut group = c.benchmark_group("placement");
    group.sample_size(20);
    group.bench_function("place_hall", |b| {
        b.iter(|| {
            let mut world = World::new();
            let result = run_placement(
                &meshes,
                &props,
                &request.environment,
                &request.catalog,
                &mut world,
                &cancel,
            )
            .unwrap();
            black_box(result)
        })
    });
    group.finish();
}

criterion_group!(benches, mesh_bench, placement_bench);
criterion_main!(benches);
