use criterion::{Criterion, criterion_group, criterion_main};
use store::{FruitId, InMemoryStore, Money, NewFruit, NewOrder, NewOrderLine, Store, StoreExt};

fn order_for(fruit_id: FruitId, quantity: i64) -> NewOrder {
    NewOrder {
        customer_name: "bench".to_string(),
        total_amount: Money::from_cents(100).multiply(quantity),
        lines: vec![NewOrderLine::new(
            fruit_id,
            quantity,
            Money::from_cents(100),
        )],
    }
}

fn bench_place_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new();
    let fruit_id = rt.block_on(async {
        store
            .create_fruit(NewFruit::new("Apple", Money::from_cents(100), i64::MAX / 2))
            .await
            .unwrap()
            .id
    });

    c.bench_function("store/place_order_single_line", |b| {
        b.iter(|| {
            rt.block_on(async {
                store.place_order(order_for(fruit_id, 1)).await.unwrap();
            });
        });
    });
}

fn bench_list_fruits(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new();

    rt.block_on(async {
        let fruits = (0..100)
            .map(|i| NewFruit::new(format!("Fruit {i}"), Money::from_cents(100), 10))
            .collect();
        store.seed(fruits).await.unwrap();
    });

    c.bench_function("store/list_fruits_100", |b| {
        b.iter(|| {
            rt.block_on(async {
                store.list_fruits().await.unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_place_order, bench_list_fruits);
criterion_main!(benches);
