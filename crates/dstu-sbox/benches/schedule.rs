use criterion::{criterion_group, criterion_main, Criterion};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use dstu_sbox::{KeySchedule, PackedSbox, SBOX_BYTES};

fn bench_schedule(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
    let mut bytes = [0u8; SBOX_BYTES];
    rng.fill_bytes(&mut bytes);
    let packed = PackedSbox::new(bytes);
    let schedule = KeySchedule::from_packed(Some(&packed));

    let mut group = c.benchmark_group("schedule");
    group.bench_function("from_packed", |b| {
        b.iter(|| KeySchedule::from_packed(Some(&packed)));
    });
    group.bench_function("to_packed", |b| {
        b.iter(|| schedule.to_packed());
    });
    group.bench_function("unpack_pack", |b| {
        b.iter(|| packed.unpack().pack());
    });
    group.finish();
}

criterion_group!(benches, bench_schedule);
criterion_main!(benches);
