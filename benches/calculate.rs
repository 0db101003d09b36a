use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sizhu::chinese::{Annus, eight_char};
use sizhu::{Calculator, DateTime, Gender, UserInput};

fn calculate_bench(c: &mut Criterion) {
    let calculator = Calculator::new();
    let input = UserInput::new("1990-12-05", "08:15", "Beijing", Gender::Male);

    let mut group = c.benchmark_group("calculate");
    group.bench_function("full_chart", |b| {
        b.iter(|| calculator.calculate(black_box(&input)).expect("chart should compute"))
    });
    group.finish();
}

fn calendar_bench(c: &mut Criterion) {
    let at = DateTime::from_gregorian(2017, 7, 23, 10, 0).expect("valid date");

    let mut group = c.benchmark_group("calendar");
    group.bench_function("pillars", |b| b.iter(|| eight_char::pillars(black_box(at))));
    group.bench_function("luck_cycle", |b| {
        b.iter(|| eight_char::luck_cycle(black_box(at), black_box(1)))
    });
    group.bench_function("annus_from_date", |b| {
        b.iter(|| Annus::from_date(black_box(at.date)).expect("date in range"))
    });
    group.finish();
}

criterion_group!(benches, calculate_bench, calendar_bench);
criterion_main!(benches);
