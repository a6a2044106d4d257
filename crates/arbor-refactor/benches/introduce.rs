use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use arbor_refactor::{
    Event, FileId, IntroduceMode, IntroduceParams, IntroduceSession, Step, TextRange,
};

fn duplicates_fixture() -> (String, TextRange) {
    let mut out = String::from("class Fixture {\n  void run() {\n");
    for i in 0..200u32 {
        out.push_str(&format!("    sink{i}(base + offset);\n"));
    }
    out.push_str("  }\n}\n");
    let start = out.find("base + offset").expect("fixture occurrence");
    (out, TextRange::new(start, start + "base + offset".len()))
}

fn bench_introduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("introduce");
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));
    group.sample_size(20);

    let (source, selection) = duplicates_fixture();

    group.bench_function("replace_all_200_occurrences", |b| {
        b.iter(|| {
            let params = IntroduceParams::with_selection(
                FileId::new("Fixture.java"),
                source.clone(),
                selection,
                IntroduceMode::Dialog,
            );
            let (mut session, _) = IntroduceSession::start(params).expect("start");
            let step = session
                .resume(Event::DialogConfirmed {
                    name: "combined".to_string(),
                    replace_all: true,
                })
                .expect("commit");
            assert!(matches!(step, Step::Committed(_)));
            black_box(step)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_introduce);
criterion_main!(benches);
