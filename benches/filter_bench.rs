use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sheetsift_core::aggregate::{categorical, histogram};
use sheetsift_core::clean::remove_duplicates;
use sheetsift_core::sort::sort_indices;
use sheetsift_core::{apply_filters, DatePreset, FilterCriteria, FindReplace, SortConfig};
use sheetsift_sheet::Table;

const CITIES: [&str; 6] = ["Oslo", "Rome", "Lima", "Kyiv", "Pune", "Accra"];

fn sample_table(size: usize) -> Table {
    let mut rows = vec![vec![
        "id".to_string(),
        "name".to_string(),
        "email".to_string(),
        "city".to_string(),
        "amount".to_string(),
        "placed".to_string(),
    ]];
    for i in 0..size {
        rows.push(vec![
            i.to_string(),
            format!("Customer {}", i % 97),
            format!("user{}@example.com", i % 500),
            CITIES[i % CITIES.len()].to_string(),
            format!("{:.2}", (i as f64 * 7.31) % 1000.0),
            format!("2024-{:02}-{:02}", i % 12 + 1, i % 28 + 1),
        ]);
    }
    Table::from_rows(rows).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    let literal = FilterCriteria {
        global_search: "customer 4".into(),
        ..Default::default()
    };
    let regex = FilterCriteria {
        global_search: r"user\d{2}@".into(),
        regex_enabled: true,
        ..Default::default()
    };
    let ranges = FilterCriteria {
        numeric_column: Some("amount".into()),
        numeric_min: Some(100.0),
        numeric_max: Some(500.0),
        date_column: Some("placed".into()),
        date_preset: Some(DatePreset::Last30Days),
        ..Default::default()
    };

    for size in [1_000, 10_000].iter() {
        let table = sample_table(*size);

        group.bench_with_input(BenchmarkId::new("literal", size), size, |b, _| {
            b.iter(|| apply_filters(black_box(&table), black_box(&literal), today()))
        });

        group.bench_with_input(BenchmarkId::new("regex", size), size, |b, _| {
            b.iter(|| apply_filters(black_box(&table), black_box(&regex), today()))
        });

        group.bench_with_input(BenchmarkId::new("ranges", size), size, |b, _| {
            b.iter(|| apply_filters(black_box(&table), black_box(&ranges), today()))
        });
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for size in [1_000, 10_000].iter() {
        let table = sample_table(*size);
        let indices: Vec<usize> = (0..table.row_count()).collect();

        group.bench_with_input(BenchmarkId::new("numeric", size), size, |b, _| {
            b.iter(|| {
                let mut order = indices.clone();
                sort_indices(&table, &mut order, &SortConfig::ascending("amount"))
            })
        });

        group.bench_with_input(BenchmarkId::new("text", size), size, |b, _| {
            b.iter(|| {
                let mut order = indices.clone();
                sort_indices(&table, &mut order, &SortConfig::descending("name"))
            })
        });
    }

    group.finish();
}

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("transforms");
    let table = sample_table(10_000);
    let all: Vec<usize> = (0..table.row_count()).collect();

    group.bench_function("dedup", |b| {
        b.iter(|| {
            let mut copy = table.clone();
            remove_duplicates(black_box(&mut copy))
        })
    });

    let request = FindReplace::new("example.com", "example.org").with_column("email");
    group.bench_function("replace_preview", |b| {
        b.iter(|| request.preview(black_box(&table), 5))
    });

    group.bench_function("categorical", |b| {
        b.iter(|| categorical(black_box(&table), &all, "city", 20))
    });

    group.bench_function("histogram", |b| {
        b.iter(|| histogram(black_box(&table), &all, "amount", 10))
    });

    group.finish();
}

criterion_group!(benches, bench_filters, bench_sort, bench_transforms);
criterion_main!(benches);
