//! Parser and printer benchmarks.
//!
//! Run with: `cargo bench --package kdl`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use kdl::{parse_str, PrintConfig};

fn parse_node_count(source: &str) -> usize {
    parse_str(source).map(|doc| doc.len()).unwrap_or(0)
}

fn bench_parse_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let source = "node 1 2 3 a=1 b=\"two\" {\n    child 0xFF\n}\n";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("bare_node", |b| {
        b.iter(|| parse_node_count(black_box("node")))
    });

    group.bench_function("node_with_entries", |b| {
        b.iter(|| parse_node_count(black_box(source)))
    });

    group.finish();
}

fn bench_parse_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_complex");

    let source = r##"
        package {
            name "kdl"
            version "0.1.0"
            dependencies platform="linux" {
                // comments are discarded
                winapi path="./crates/my-winapi-fork" optional=true
                miette version="1.0.0" dev=true
            }
            numbers 0xDEADBEEF 0o777 0b1010 3.14159e0 -42
            strings "plain" r"raw" r#"fenced "quotes""# "\u{1F600}"
            /- skipped 1 2 3
        }
    "##;
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("package_manifest", |b| {
        b.iter(|| parse_node_count(black_box(source)))
    });

    group.finish();
}

fn bench_parse_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_strings");

    group.bench_function("escaped", |b| {
        b.iter(|| parse_node_count(black_box("n \"a\\nb\\tc\\u{41}d\"")))
    });

    group.bench_function("raw", |b| {
        b.iter(|| parse_node_count(black_box("n r##\"no \"escapes\"# here\"##")))
    });

    group.finish();
}

fn bench_print(c: &mut Criterion) {
    let mut group = c.benchmark_group("print");

    let document = parse_str(
        "a 1 2 3 {\n b x=1 y=2 {\n  c \"deep\" 0x10\n }\n}\nd null true false\n",
    )
    .unwrap();

    group.bench_function("pretty", |b| {
        let config = PrintConfig::pretty_default();
        b.iter(|| black_box(&document).to_kdl_with(&config))
    });

    group.bench_function("raw_style", |b| {
        let config = PrintConfig::raw_default();
        b.iter(|| black_box(&document).to_kdl_with(&config))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_simple,
    bench_parse_complex,
    bench_parse_strings,
    bench_print
);
criterion_main!(benches);
