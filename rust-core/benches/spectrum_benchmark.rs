//! Throughput of the three spectral products over one second of audio

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use windowed_spectrum::{calculate_fft, spectrogram, welch, WindowType};

fn test_signal(sample_rate: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| {
            let t = n as f64 / sample_rate;
            0.5 * (2.0 * std::f64::consts::PI * 440.0 * t).sin()
                + 0.1 * (2.0 * std::f64::consts::PI * 3150.0 * t).sin()
        })
        .collect()
}

fn bench_products(c: &mut Criterion) {
    let sample_rate = 48000.0;
    let signal = test_signal(sample_rate, 48000);
    let mut group = c.benchmark_group("spectral_products");

    for window_size in [256usize, 1024, 4096] {
        group.bench_with_input(
            BenchmarkId::new("calculate_fft", window_size),
            &window_size,
            |b, &size| b.iter(|| calculate_fft(black_box(&signal), sample_rate, size, None, None)),
        );
        group.bench_with_input(
            BenchmarkId::new("welch", window_size),
            &window_size,
            |b, &size| b.iter(|| welch(black_box(&signal), sample_rate, size, None, None)),
        );
        group.bench_with_input(
            BenchmarkId::new("spectrogram", window_size),
            &window_size,
            |b, &size| {
                b.iter(|| {
                    spectrogram(
                        black_box(&signal),
                        sample_rate,
                        size,
                        Some(0.75),
                        Some(WindowType::BlackmanHarris),
                    )
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_products);
criterion_main!(benches);
