use criterion::{Criterion, black_box, criterion_group, criterion_main};

use bookkeeper_categorization::TransactionCategorizer;

const SAMPLES: &[(&str, &str, bool)] = &[
    ("Stripe", "Card processing services", true),
    ("Harbour Cafe Ltd", "Payment from customer INV-0042", true),
    ("Countdown", "Baking ingredients", false),
    ("Adobe", "Creative Cloud subscription", false),
    ("Unknown Supplier", "Miscellaneous purchase", false),
];

fn bench_categorize(c: &mut Criterion) {
    let categorizer = TransactionCategorizer::default();

    c.bench_function("categorize_mixed_batch", |b| {
        b.iter(|| {
            for (supplier, description, income) in SAMPLES {
                black_box(categorizer.categorize(
                    black_box(supplier),
                    black_box(description),
                    *income,
                ));
            }
        })
    });
}

criterion_group!(benches, bench_categorize);
criterion_main!(benches);
