//! Interface extraction benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kiln_parser::extract_interfaces;

const SIMPLE_TYPES: &str = r#"
interface Button {
  styleMap: {
    "--button-bg-color": string;
  };
  data: {
    buttonContent: string;
  };
  children?: React.ReactNode;
}
"#;

fn many_interfaces(count: usize) -> String {
    (0..count)
        .map(|i| {
            format!(
                "/** Card {i} */\ninterface Card{i} {{\n  styleMap: {{ \"--card{i}-bg\": string; \"--card{i}-radius\": string; }};\n  data: {{ card{i}Title: string; card{i}Items: Array<{{ id: number }}>; }};\n}}\n"
            )
        })
        .collect()
}

fn extract_simple(c: &mut Criterion) {
    c.bench_function("extract_simple", |b| {
        b.iter(|| extract_interfaces(black_box(SIMPLE_TYPES)))
    });
}

fn extract_large(c: &mut Criterion) {
    let source = many_interfaces(200);
    c.bench_function("extract_200_interfaces", |b| {
        b.iter(|| extract_interfaces(black_box(&source)))
    });
}

criterion_group!(benches, extract_simple, extract_large);
criterion_main!(benches);
