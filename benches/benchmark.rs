//! Performance benchmarks for rs-html2md.
//!
//! Run with: `cargo bench`
//!
//! - extraction of a small synthetic article
//! - extraction of a synthetic page scaled by paragraph count
//! - content assembly with growing media lists

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rs_html2md::{build_content_markdown, extract, extract_with_options, insertion_positions, Options};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Article</title>
    <meta name="author" content="John Doe">
    <meta property="article:published_time" content="2024-03-05T10:00:00Z">
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about">About</a>
    </nav>
    <article>
        <h1>Sample Article Title</h1>
        <p>This is the first paragraph of the article. It contains some meaningful
        content that should end up in the document body.</p>
        <img src="/images/first.png" alt="First">
        <p>Here is a second paragraph with more content. Extraction should
        keep the text while dropping navigation and other boilerplate.</p>
        <video><source src="/media/clip.mp4" type="video/mp4"></video>
        <p>A third paragraph links to <a href="https://example.org/more">more reading</a>.</p>
    </article>
    <aside>
        <h3>Related Articles</h3>
        <ul>
            <li><a href="/r1">Related article 1</a></li>
            <li><a href="/r2">Related article 2</a></li>
        </ul>
    </aside>
    <footer>
        <p>Copyright 2024</p>
    </footer>
</body>
</html>
"#;

fn synthetic_page(paragraphs: usize) -> String {
    let body: String = (0..paragraphs)
        .map(|i| {
            format!(
                "<p>Paragraph {i} talks about parsing, rendering and validation at some length.</p>\
                 <img src=\"/img/{i}.jpg\">"
            )
        })
        .collect();
    format!("<html><head><title>Scaled</title></head><body><article>{body}</article></body></html>")
}

fn bench_extract_default(c: &mut Criterion) {
    c.bench_function("extract_default", |b| {
        b.iter(|| extract(black_box(SAMPLE_HTML), black_box("https://example.com/post")));
    });
}

fn bench_extract_without_fallback(c: &mut Criterion) {
    let options = Options {
        use_readability_fallback: false,
        ..Options::default()
    };

    c.bench_function("extract_without_fallback", |b| {
        b.iter(|| {
            extract_with_options(
                black_box(SAMPLE_HTML),
                black_box("https://example.com/post"),
                black_box(&options),
            )
        });
    });
}

fn bench_extract_scaled(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_scaled");

    for paragraphs in [10, 100, 1000] {
        let html = synthetic_page(paragraphs);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("paragraphs", paragraphs), &html, |b, html| {
            b.iter(|| extract(black_box(html), "https://example.com/"));
        });
    }

    group.finish();
}

fn bench_build_content_markdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_content_markdown");
    let paragraphs: Vec<String> = (0..200).map(|i| format!("Paragraph number {i}.")).collect();
    let links: Vec<String> = (0..50).map(|i| format!("https://example.com/l/{}", i % 25)).collect();

    for media_count in [0, 10, 500] {
        let media: Vec<String> = (0..media_count).map(|i| format!("![image](media/{i}.png)")).collect();
        group.bench_with_input(BenchmarkId::new("media", media_count), &media, |b, media| {
            b.iter(|| build_content_markdown(black_box(&paragraphs), black_box(media), black_box(&links)));
        });
    }

    group.bench_function("insertion_positions", |b| {
        b.iter(|| insertion_positions(black_box(1000), black_box(1000)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_extract_default,
    bench_extract_without_fallback,
    bench_extract_scaled,
    bench_build_content_markdown
);
criterion_main!(benches);
