use criterion::{Criterion, criterion_group, criterion_main};
use polyglot::path::{route_key, strip_locale_prefix};
use polyglot::prelude::*;
use polyglot::polyglot_i18n::{MemorySource, TranslationTable};
use std::hint::black_box;

fn settings() -> LocaleSettings {
    LocaleSettings::parse("en", &["it", "de", "fr", "es", "pt-BR"]).unwrap()
}

fn base_routes(count: usize) -> Vec<BaseRoute> {
    (0..count)
        .map(|i| {
            let kind = match i % 3 {
                0 => PageKind::Template,
                1 => PageKind::Post,
                _ => PageKind::Documentation,
            };
            BaseRoute::new(PageHandle::new(format!("section-{}/page-{}", i % 10, i), kind))
        })
        .collect()
}

fn bench_path_derivation(c: &mut Criterion) {
    let settings = settings();
    let default = settings.default_locale().clone();
    let it = Locale::new("it");

    let mut group = c.benchmark_group("path");
    group.bench_function("route_key", |b| {
        b.iter(|| route_key(black_box("docs/getting-started"), &it, &default))
    });
    group.bench_function("strip_locale_prefix", |b| {
        b.iter(|| strip_locale_prefix(black_box("/de/it/docs/getting-started"), &settings))
    });
    group.finish();
}

fn bench_expansion(c: &mut Criterion) {
    let expander = RouteExpander::new(LocalizedPageFactory::new(settings()));

    let mut group = c.benchmark_group("expand");
    for count in [10, 100, 1000] {
        let routes = base_routes(count);
        group.bench_function(format!("{}_routes", count), |b| {
            b.iter(|| expander.expand(black_box(&routes)).unwrap())
        });
    }
    group.finish();
}

fn bench_translation_lookup(c: &mut Criterion) {
    let table: TranslationTable = (0..500)
        .map(|i| (format!("key.{}", i), format!("valore {}", i)))
        .collect();
    let store = TranslationStore::new(
        MemorySource::new().with_table(Locale::new("it"), table),
        Locale::new("en"),
    );
    let it = Locale::new("it");

    let mut group = c.benchmark_group("translations");
    group.bench_function("resolve_hit", |b| b.iter(|| store.resolve(black_box("key.250"), &it)));
    group.bench_function("resolve_miss", |b| {
        b.iter(|| store.resolve(black_box("missing.key"), &it))
    });
    group.bench_function("render", |b| {
        let content = "<h1>{{ __('key.1') }}</h1><p>{{ __(\"key.2\") }}</p>";
        b.iter(|| store.render(black_box(content), &it))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_path_derivation,
    bench_expansion,
    bench_translation_lookup
);
criterion_main!(benches);
