//! Parsing and generation benchmarks.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use umlgen_bench::{ModelShape, synthetic_model_xml};
use umlgen_codegen::{Generator, GeneratorConfig, MemorySink};
use umlgen_model::parse_model;

fn benchmark_parse(c: &mut Criterion) {
    let xml = synthetic_model_xml(ModelShape::default());

    c.bench_function("parse_model", |b| {
        b.iter(|| parse_model(black_box(&xml)))
    });
}

fn benchmark_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for classes in [4, 16, 64] {
        let shape = ModelShape {
            classes,
            ..ModelShape::default()
        };
        let model = parse_model(&synthetic_model_xml(shape)).expect("synthetic model parses");
        let config = GeneratorConfig::default().strict_types(true);

        group.bench_with_input(BenchmarkId::from_parameter(classes), &model, |b, model| {
            b.iter(|| {
                let mut sink = MemorySink::new();
                Generator::new(model, &config)
                    .generate_all(&mut sink)
                    .expect("generation failed");
                black_box(sink.files().len())
            })
        });
    }

    group.finish();
}

fn benchmark_render_unit(c: &mut Criterion) {
    let model =
        parse_model(&synthetic_model_xml(ModelShape::default())).expect("synthetic model parses");
    let config = GeneratorConfig::default();
    let entity = model.lookup("c1_0").expect("synthetic entity exists");
    let generator = Generator::new(&model, &config);

    c.bench_function("render_unit", |b| {
        b.iter(|| generator.render(black_box(entity)))
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_generate,
    benchmark_render_unit
);
criterion_main!(benches);
