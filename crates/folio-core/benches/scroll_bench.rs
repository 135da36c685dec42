//! Benchmark: per-event cost of carousel scroll handling and page updates.
//!
//! Run with: `cargo bench -p folio-core --bench scroll_bench`
//!
//! Scroll events arrive at display refresh rate while a list animates, so
//! handling one must stay constant-time regardless of list length.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use folio_core::{
    CarouselConfig, CarouselController, Event, Key, PageScroll, Portfolio, Section,
    SectionAttach, SectionBounds, SectionMetrics,
};

fn metrics(scroll_left: f64, slides: usize) -> SectionMetrics {
    let content = slides as f64 * 324.0;
    SectionMetrics::new(scroll_left, 900.0, content).with_slide_width(300.0)
}

fn bench_on_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel/on_scroll");
    for slides in [5usize, 50, 500] {
        let mut carousel = CarouselController::new(Section::Projects, CarouselConfig::projects());
        let mut out = Vec::with_capacity(4);
        carousel.attach(SectionAttach::present(metrics(0.0, slides)), &mut out);
        let max = slides as f64 * 324.0 - 900.0;
        group.bench_with_input(BenchmarkId::from_parameter(slides), &slides, |b, &slides| {
            let mut x = 0.0;
            b.iter(|| {
                out.clear();
                x = if x >= max { 0.0 } else { x + 7.0 };
                carousel.on_scroll(black_box(metrics(x, slides)), &mut out);
                black_box(out.len())
            });
        });
    }
    group.finish();
}

fn bench_navigate_settle(c: &mut Criterion) {
    c.bench_function("portfolio/key_then_settle", |b| {
        let mut page = Portfolio::default();
        page.update(Event::Attach {
            section: Section::Projects,
            attach: SectionAttach::present(metrics(0.0, 50)),
        });
        let mut forward = true;
        b.iter(|| {
            let key = if forward { Key::ArrowRight } else { Key::ArrowLeft };
            let moved = page.update(black_box(Event::Key(key)));
            if moved.is_empty() {
                forward = !forward;
            }
            black_box(page.advance(core::time::Duration::from_millis(300)))
        });
    });
}

fn bench_scroll_spy(c: &mut Criterion) {
    let sections: Vec<SectionBounds> = ["home", "about", "skills", "projects", "certificates", "contact"]
        .iter()
        .enumerate()
        .map(|(i, id)| SectionBounds::new(*id, i as f64 * 800.0, 800.0))
        .collect();
    c.bench_function("portfolio/page_scroll_frame", |b| {
        let mut page = Portfolio::default();
        let mut y = 0.0;
        b.iter(|| {
            y = if y > 4800.0 { 0.0 } else { y + 13.0 };
            page.update(Event::PageScroll(PageScroll {
                scroll_y: y,
                sections: sections.clone(),
            }));
            black_box(page.frame())
        });
    });
}

criterion_group!(benches, bench_on_scroll, bench_navigate_settle, bench_scroll_spy);
criterion_main!(benches);
