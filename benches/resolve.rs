//! Benchmarks for reference resolution and index search.
//!
//! `resolve` runs once per `add`, but `find` scans every record on each call,
//! so the index benchmarks use workspace-sized record counts.

use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use projj::cache::{RepositoryIndex, RepositoryRecord};
use projj::identity::{resolve, AliasTable};
use projj::path::map_path;

const REFERENCES: &[(&str, &str)] = &[
    ("ssh", "git@github.com:golang/go.git"),
    ("https", "https://github.com/golang/go.git"),
    ("bare", "github.com/golang/go"),
    ("shorthand", "golang/go"),
    ("alias", "github://golang/go"),
];

fn bench_resolve(c: &mut Criterion) {
    let aliases = AliasTable::builtin();
    let mut group = c.benchmark_group("resolve");

    for (label, reference) in REFERENCES {
        group.bench_with_input(BenchmarkId::from_parameter(label), reference, |b, r| {
            b.iter(|| {
                let identity = resolve(black_box(r), &aliases).unwrap();
                map_path(&identity, Path::new("/home/me/projj"))
            })
        });
    }

    group.finish();
}

fn populated_index(size: usize) -> RepositoryIndex {
    let mut index = RepositoryIndex::empty("/tmp/projj-bench/cache.json");
    for i in 0..size {
        let owner = format!("owner{}", i % 50);
        let name = format!("repo{}", i);
        index.add(RepositoryRecord::new(
            name.clone(),
            format!("git@github.com:{}/{}.git", owner, name),
            format!("/home/me/projj/github.com/{}/{}", owner, name),
            "github.com",
        ));
    }
    index
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");

    for size in [100, 1_000, 5_000] {
        let index = populated_index(size);
        group.bench_with_input(BenchmarkId::new("substring", size), &index, |b, index| {
            b.iter(|| index.find(black_box("Repo42")).len())
        });
        group.bench_with_input(BenchmarkId::new("all", size), &index, |b, index| {
            b.iter(|| index.find(black_box("")).len())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_find);
criterion_main!(benches);
