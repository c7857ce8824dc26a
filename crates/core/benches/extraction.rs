use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cocktails_core::{Document, extract_categories, extract_infobox, normalize_text};

const ORIGIN: &str = "https://en.wikipedia.org";

fn bench_parse(c: &mut Criterion) {
    let listing = std::fs::read_to_string("../../tests/fixtures/list_of_cocktails.html").unwrap();
    let article = std::fs::read_to_string("../../tests/fixtures/negroni.html").unwrap();

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("listing", "list_of_cocktails"), &listing, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("article", "negroni"), &article, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.finish();
}

fn bench_categories(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/list_of_cocktails.html").unwrap();
    let doc = Document::parse(&html);

    c.bench_function("category_extraction", |b| {
        b.iter(|| extract_categories(black_box(&doc), ORIGIN))
    });
}

fn bench_infobox(c: &mut Criterion) {
    let mut group = c.benchmark_group("infobox_extraction");

    for page in ["negroni", "mojito"] {
        let html = std::fs::read_to_string(format!("../../tests/fixtures/{page}.html")).unwrap();
        let doc = Document::parse(&html);
        group.bench_with_input(BenchmarkId::from_parameter(page), &doc, |b, doc| {
            b.iter(|| extract_infobox(black_box(doc), ORIGIN))
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let residue = ".mw-parser-output .frac{white-space:nowrap}.mw-parser-output .frac .num,.mw-parser-output .frac .den{font-size:80%;line-height:0;vertical-align:super}45\u{a0}ml White rum, 20 ml fresh lime lime juice, 2 OZ soda";

    c.bench_function("normalize_text", |b| b.iter(|| normalize_text(black_box(residue))));
}

criterion_group!(benches, bench_parse, bench_categories, bench_infobox, bench_normalize);
criterion_main!(benches);
