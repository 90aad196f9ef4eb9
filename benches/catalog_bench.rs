use cbcexams::db;
use cbcexams::directories::group_by_directory;
use cbcexams::search::{normalize_level_keyword, search_resources, ResourceQuery};
use cbcexams::types::DirectoryMember;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::hint::black_box;
use tokio::runtime::Runtime;
use uuid::Uuid;

const PREFIX: &str = "/srv/media/downloaded_files/";
const LEVELS: &[&str] = &["grade-4", "grade-7", "grade-9", "form-2", "form-4"];
const SUBJECTS: &[&str] = &["mathematics", "english", "kiswahili", "biology", "chemistry"];

async fn seeded_pool(rows: usize) -> SqlitePool {
    let pool = SqlitePoolOptions::new().max_connections(1).connect("sqlite::memory:").await.unwrap();
    db::init_db(&pool).await.unwrap();
    for i in 0..rows {
        let level = LEVELS[i % LEVELS.len()];
        let subject = SUBJECTS[(i / LEVELS.len()) % SUBJECTS.len()];
        sqlx::query(
            "INSERT INTO web_crawler_resources (id, name, parent_directory, extracted_content) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(format!("{} {} opener exam {}.pdf", level.replace('-', " "), subject, i))
        .bind(format!("{}{}/{}", PREFIX, level, subject))
        .bind("term one questions and marking scheme")
        .execute(&pool)
        .await
        .unwrap();
    }
    pool
}

fn query(q1: &str, q2: &str, q3: &str) -> ResourceQuery {
    ResourceQuery {
        q1: Some(q1.to_string()),
        q2: Some(q2.to_string()),
        q3: Some(q3.to_string()),
        ..Default::default()
    }
}

fn benchmark_search(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("search_resources");

    for rows in [1_000usize, 10_000] {
        let pool = rt.block_on(seeded_pool(rows));

        // every parameter matches on the first attempt
        let direct = query("grade9", "mathematics", "opener");
        group.bench_with_input(BenchmarkId::new("direct", rows), &direct, |b, q| {
            b.iter(|| rt.block_on(async { black_box(search_resources(&pool, q).await.unwrap()) }));
        });

        // two relaxation steps before falling back to the first parameter
        let relaxed = query("grade9", "no-such-subject", "no-such-type");
        group.bench_with_input(BenchmarkId::new("relaxed", rows), &relaxed, |b, q| {
            b.iter(|| rt.block_on(async { black_box(search_resources(&pool, q).await.unwrap()) }));
        });
    }
    group.finish();
}

fn benchmark_query_helpers(c: &mut Criterion) {
    let q = query("Grade9", "Mathematics", "Opener Exam");
    c.bench_function("cache_key", |b| b.iter(|| black_box(q.cache_key())));
    c.bench_function("normalize_level_keyword", |b| {
        b.iter(|| black_box(normalize_level_keyword(black_box("grade9 form4 kcse revision"))))
    });
}

fn benchmark_grouping(c: &mut Criterion) {
    let members: Vec<DirectoryMember> = (0..5_000)
        .map(|i| DirectoryMember {
            id: Uuid::new_v4(),
            parent_directory: format!("{}{}/{}", PREFIX, LEVELS[i % LEVELS.len()], SUBJECTS[i % SUBJECTS.len()]),
            name: format!("file_{}.pdf", i),
            google_cloud_storage_link: String::new(),
        })
        .collect();

    c.bench_function("group_by_directory_5000", |b| {
        b.iter(|| black_box(group_by_directory(members.clone(), PREFIX)))
    });
}

criterion_group!(benches, benchmark_search, benchmark_query_helpers, benchmark_grouping);
criterion_main!(benches);
