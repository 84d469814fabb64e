use common::Money;
use criterion::{Criterion, criterion_group, criterion_main};
use reporting::{AnalyticsService, SalesGranularity};
use store::{InMemoryStore, NewFruit, NewOrder, NewOrderLine, Store};

/// Populate a store with N orders spread over 10 fruits.
async fn populate_store(store: &InMemoryStore, n: usize) {
    let mut ids = Vec::new();
    for i in 0..10 {
        let fruit = store
            .create_fruit(NewFruit::new(format!("Fruit {i}"), Money::from_cents(100), i64::MAX / 2))
            .await
            .unwrap();
        ids.push(fruit.id);
    }

    for i in 0..n {
        let lines = vec![
            NewOrderLine::new(ids[i % ids.len()], 2, Money::from_cents(100)),
            NewOrderLine::new(ids[(i + 3) % ids.len()], 1, Money::from_cents(150)),
        ];
        store
            .place_order(NewOrder {
                customer_name: format!("customer-{i}"),
                total_amount: Money::from_cents(350),
                lines,
            })
            .await
            .unwrap();
    }
}

fn bench_report(c: &mut Criterion, n: usize) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new();
    rt.block_on(populate_store(&store, n));
    let analytics = AnalyticsService::new(store);

    c.bench_function(&format!("reporting/report_{n}_orders"), |b| {
        b.iter(|| {
            rt.block_on(async {
                analytics.report(SalesGranularity::Day).await.unwrap();
            });
        });
    });
}

fn bench_report_100_orders(c: &mut Criterion) {
    bench_report(c, 100);
}

fn bench_report_1000_orders(c: &mut Criterion) {
    bench_report(c, 1000);
}

criterion_group!(benches, bench_report_100_orders, bench_report_1000_orders);
criterion_main!(benches);
