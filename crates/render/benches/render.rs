use std::hint::black_box;

use arve_invoicing::{CompanyProfile, InvoiceBuilder, InvoiceConfig, InvoiceInput, ItemInput};
use arve_parties::{BankAccount, Party};
use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use rust_decimal::Decimal;

fn input(lines: usize) -> InvoiceInput {
    (0..lines).fold(
        InvoiceInput::new("2025000123").recipient(Party::new("Klient AS").with_city("Tartu")),
        |input, i| {
            input.item(ItemInput::line(
                format!("Detail {i}"),
                Decimal::new(i as i64 % 7 + 1, 0),
                Decimal::new(1999 + i as i64, 2),
            ))
        },
    )
}

fn bench_build_and_render(c: &mut Criterion) {
    let builder = InvoiceBuilder::new(InvoiceConfig::default().with_company(CompanyProfile::new(
        Party::new("Kolmas Mõõde OÜ"),
        BankAccount::new("LHV Pank", "LHVBEE22", "EE717700771001234567"),
    )))
    .unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    c.bench_function("build_20_lines", |b| {
        b.iter(|| builder.build(black_box(input(20)), today).unwrap())
    });

    let invoice = builder.build(input(20), today).unwrap();
    c.bench_function("render_20_lines", |b| {
        b.iter(|| arve_render::render(black_box(&invoice)))
    });
}

criterion_group!(benches, bench_build_and_render);
criterion_main!(benches);
