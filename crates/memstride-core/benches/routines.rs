//! Comparative Criterion benchmark of the copy routines.
//!
//! The main harness does its own duration-based timing; this bench exists
//! for quick side-by-side numbers during routine development.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use memstride_core::{routines, CopyFn, CopyVariant, PAGE_SIZE};

fn bench_length_copies(c: &mut Criterion) {
    let sizes: [usize; 4] = [64, 256, 1024, 4096];
    let mut group = c.benchmark_group("copy_routines");

    let variants: [(&str, CopyFn); 3] = [
        ("standard", routines::standard_copy),
        ("kernel_orig", routines::kernel_copy_orig),
        ("kernel_opt", routines::kernel_copy_opt),
    ];

    for size in sizes {
        let src = vec![0xABu8; size];
        group.throughput(Throughput::Bytes(size as u64));
        for (name, copy) in variants {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, &size| {
                let mut dst = vec![0u8; size];
                b.iter(|| {
                    // SAFETY: disjoint heap buffers of exactly `size` bytes.
                    unsafe {
                        copy(dst.as_mut_ptr(), src.as_ptr(), black_box(size));
                    }
                    black_box(&mut dst);
                });
            });
        }
    }

    group.finish();
}

fn bench_page_copies(c: &mut Criterion) {
    let src = vec![0xCDu8; PAGE_SIZE];
    let mut group = c.benchmark_group("page_copy");
    group.throughput(Throughput::Bytes(PAGE_SIZE as u64));

    for variant in [CopyVariant::PageOrig, CopyVariant::PageOpt] {
        let copy = variant.callable();
        group.bench_function(variant.name(), |b| {
            let mut dst = vec![0u8; PAGE_SIZE];
            b.iter(|| {
                // SAFETY: disjoint full-page buffers; length is ignored.
                unsafe {
                    copy(dst.as_mut_ptr(), src.as_ptr(), PAGE_SIZE);
                }
                black_box(&mut dst);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_length_copies, bench_page_copies);
criterion_main!(benches);
