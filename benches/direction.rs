use std::hint::black_box;
use std::time::{Duration, Instant};

use criterion::{criterion_group, criterion_main, Criterion};
use slide_routes::router::{PatternMatcher, RouteMatcher};
use slide_routes::routes::parse_routes;
use slide_routes::{DirectionTracker, RouteTable, SlideRoutes};

fn example_routes() -> &'static str {
    r#"routes:
  - index: true
    view: home
  - path: /zoo/animals
    view: animals
  - path: /zoo/animals/:id
    view: animal
  - path: /zoo/animals/:id/toys/:toy_id
    view: toy
  - path: /zoo/:category/animals/:id/habitats/:habitat_id
    view: habitat
  - path: /inventory
    view: inventory
    children:
      - index: true
        view: inventory_list
      - path: ":warehouse_id/feeds/:feed_id"
        view: feed
      - path: ":warehouse_id/*"
        view: warehouse
  - path: /:lang?/about
    view: about
  - path: "*"
    redirect: /
"#
}

const NAVIGATION: [&str; 6] = [
    "/zoo/animals/123",
    "/zoo/animals/123/toys/456",
    "/zoo/cats/animals/123/habitats/88",
    "/inventory/1/feeds/2",
    "/en/about",
    "/zoo/animals",
];

fn build_table() -> RouteTable<String> {
    let file = parse_routes(example_routes(), true).expect("failed to parse routes");
    RouteTable::build(file.routes, None)
}

fn bench_match(c: &mut Criterion) {
    let table = build_table();
    c.bench_function("route_match", |b| {
        b.iter(|| {
            for path in NAVIGATION.iter() {
                let res = PatternMatcher.match_routes(table.entries(), path);
                black_box(&res);
            }
        })
    });
}

fn bench_direction(c: &mut Criterion) {
    let table = build_table();
    c.bench_function("direction_resolve", |b| {
        let mut tracker = DirectionTracker::new();
        b.iter(|| {
            for path in NAVIGATION.iter() {
                let res = tracker.resolve(&table, &PatternMatcher, path);
                black_box(&res);
            }
        })
    });

    c.bench_function("direction_resolve_memoized", |b| {
        let mut tracker = DirectionTracker::new();
        tracker
            .resolve(&table, &PatternMatcher, NAVIGATION[0])
            .expect("route matches");
        b.iter(|| black_box(tracker.resolve(&table, &PatternMatcher, NAVIGATION[0])))
    });
}

fn bench_render(c: &mut Criterion) {
    let file = parse_routes(example_routes(), true).expect("failed to parse routes");
    c.bench_function("slide_routes_render", |b| {
        let mut router = SlideRoutes::new(file.options, file.routes.clone());
        let start = Instant::now();
        b.iter(|| {
            for path in NAVIGATION.iter() {
                let out = router.render(path, None);
                black_box(&out);
                router.frame(start);
                router.advance(start + Duration::from_millis(250));
            }
        })
    });
}

criterion_group!(benches, bench_match, bench_direction, bench_render);
criterion_main!(benches);
