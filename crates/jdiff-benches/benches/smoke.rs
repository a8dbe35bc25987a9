use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jdiff_benches::available_corpora;
use jdiff_core::{DiffOptions, RenderConfig};

fn bench_diff(c: &mut Criterion) {
    for options in [DiffOptions::default(), DiffOptions::default().keep_array_order()] {
        let mut group = c.benchmark_group(format!("diff-{}", options.array_order()));
        for corpus in available_corpora() {
            let dataset = corpus.load().expect("failed to load dataset");
            group.throughput(Throughput::Bytes(dataset.byte_len() as u64));
            group.bench_with_input(
                BenchmarkId::from_parameter(corpus.name()),
                &dataset,
                |b, dataset| {
                    b.iter(|| {
                        let diff = dataset.diff(&options);
                        black_box(diff);
                    });
                },
            );
        }
        group.finish();
    }
}

fn bench_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical-hash");
    for corpus in available_corpora() {
        let dataset = corpus.load().expect("failed to load dataset");
        group.bench_function(corpus.name(), {
            let value = dataset.before().clone();
            move |b| {
                b.iter(|| black_box(value.canonical_hash()));
            }
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let options = DiffOptions::default();
    let config = RenderConfig::default();

    let mut group = c.benchmark_group("render");
    for corpus in available_corpora() {
        let diff = corpus.load().expect("failed to load dataset").diff(&options);
        group.bench_function(corpus.name(), {
            move |b| {
                b.iter(|| {
                    let rendered = diff.render(&config);
                    black_box(rendered);
                });
            }
        });
    }
    group.finish();
}

criterion_group!(benches, bench_diff, bench_hash, bench_render);
criterion_main!(benches);
