use criterion::{black_box, criterion_group, criterion_main, Criterion};
use version_stamp::prelude::*;

fn strict_inputs() -> Vec<&'static str> {
    vec![
        "1.2.3",
        "10.20.30-beta.4",
        "1.0.0-alpha.beta.11+exp.sha.5114f85",
    ]
}

fn loose_inputs() -> Vec<&'static str> {
    vec!["v1", "v1.2", "1.2-rc.1", "v1.2.3+build"]
}

fn parse_all(inputs: &[&str], strict: bool) {
    for input in inputs {
        let res = Version::parse(input, strict);
        assert!(res.is_ok());
    }
}

fn sort_versions(versions: &mut [Version]) {
    versions.sort();
}

fn update_all(kinds: &[UpdateKind]) {
    for kind in kinds {
        let request = UpdateRequest::new(*kind)
            .version_name("1.0.0-beta.400")
            .version_code(400)
            .postfix("beta");
        let res = update(&request, &StoreKeys::default(), None);
        assert!(res.is_ok());
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("parse_strict", |b| {
        b.iter(|| parse_all(black_box(&strict_inputs()), true))
    });
    c.bench_function("parse_loose", |b| {
        b.iter(|| parse_all(black_box(&loose_inputs()), false))
    });

    let versions: Vec<Version> = [
        "1.0.0", "1.0.0-rc.1", "1.0.0-alpha", "1.0.0-alpha.1", "0.9.9", "1.0.0-beta.11",
        "1.0.0-beta.2", "2.0.0", "1.0.0-alpha.beta",
    ]
    .iter()
    .map(|s| s.parse().unwrap())
    .collect();
    c.bench_function("sort_versions", |b| {
        b.iter(|| sort_versions(black_box(&mut versions.clone())))
    });

    c.bench_function("update", |b| b.iter(|| update_all(black_box(&UpdateKind::ALL))));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
