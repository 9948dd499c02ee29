//! Performance benchmarks for rs-crawlkit.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - A small synthetic article page for discovery and scraping
//! - Generated link listings of increasing size for discovery throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rs_crawlkit::{
    discover_links, scrape_document, ContentFormat, ExtractConfig, LinkFilters, LinkSelectors, PageSource,
    ProcessingConfig,
};

const BASE_URL: &str = "https://news.example/section";

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Article</title>
    <meta name="author" content="Jane Roe">
    <meta name="description" content="A sample article for benchmarking.">
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about">About</a>
        <a href="https://other.example/partner">Partner</a>
    </nav>
    <article>
        <h1>Sample Article Title</h1>
        <p class="byline">By Jane Roe</p>
        <p>This is the first paragraph of the article. It links to
        <a href="/article/1">an earlier story</a> and carries enough words to matter.</p>
        <p>Here is a second paragraph with more content. It points at
        <a href="/article/2?ref=body">a follow-up</a> and <a href="#top">the top</a>.</p>
        <p>A third paragraph ensures we have enough content for meaningful
        benchmarking of selection and normalization.</p>
        <aside class="promo">Subscribe now!</aside>
    </article>
    <footer>
        <p>Copyright 2026</p>
    </footer>
</body>
</html>
"#;

fn bench_discover_default(c: &mut Criterion) {
    let selectors = LinkSelectors::default();
    let filters = LinkFilters::default();

    c.bench_function("discover_default", |b| {
        b.iter(|| discover_links(black_box(SAMPLE_HTML), BASE_URL, &selectors, &filters));
    });
}

fn bench_discover_with_patterns(c: &mut Criterion) {
    let selectors = LinkSelectors {
        css: vec!["article a[href]".to_string()],
        url_patterns: vec!["/article/\\d+".to_string()],
        text_patterns: Vec::new(),
    };
    let filters = LinkFilters {
        exclude_patterns: vec!["ref=".to_string()],
        min_text_length: 3,
        ..LinkFilters::default()
    };

    c.bench_function("discover_with_patterns", |b| {
        b.iter(|| discover_links(black_box(SAMPLE_HTML), BASE_URL, &selectors, &filters));
    });
}

fn bench_scrape_text(c: &mut Criterion) {
    let mut config = ExtractConfig::default();
    config.content.selectors = vec![".missing".to_string(), "article".to_string()];
    config.content.remove_selectors = vec![".promo".to_string()];
    config.content.format = ContentFormat::Text;
    config.metadata = vec!["author".to_string(), "description".to_string()];
    let processing = ProcessingConfig {
        min_content_length: 50,
        ..ProcessingConfig::default()
    };
    let page = PageSource {
        html: SAMPLE_HTML,
        markdown: "",
    };

    c.bench_function("scrape_text", |b| {
        b.iter(|| scrape_document(black_box(page), &config, &processing, None));
    });
}

/// Discovery over generated listings of increasing size
fn bench_discover_listing(c: &mut Criterion) {
    let selectors = LinkSelectors::default();
    let filters = LinkFilters {
        max_links: 1000,
        ..LinkFilters::default()
    };

    let mut group = c.benchmark_group("discover_listing");

    for count in [100usize, 1_000, 5_000] {
        let html = listing(count);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("links", count), &html, |b, html| {
            b.iter(|| discover_links(black_box(html), BASE_URL, &selectors, &filters));
        });
    }

    group.finish();
}

fn listing(count: usize) -> String {
    let mut html = String::from("<html><body><ul>");
    for i in 0..count {
        // Every fourth link repeats an earlier URL
        let target = if i % 4 == 3 { i - 1 } else { i };
        html.push_str(&format!("<li><a href=\"/article/{target}\">Story number {i}</a></li>"));
    }
    html.push_str("</ul></body></html>");
    html
}

criterion_group!(
    benches,
    bench_discover_default,
    bench_discover_with_patterns,
    bench_scrape_text,
    bench_discover_listing
);
criterion_main!(benches);
