//! Synthetic workload generation.
//!
//! Most processes are short, interactive ones (small CPU bursts, many
//! repetitions); a few are long CPU bound jobs that get fewer repetitions,
//! longer I/O and lean towards high priority.

use rand::Rng;

use crate::simulator::{Priority, ProcessDescriptor};

/// Bursts above this are considered CPU bound.
const LONG_BURST: u32 = 8;

// (upper bound of r in [0, 530), burst)
const CPU_BURSTS: [(u32, u32); 12] = [
    (150, 1),
    (270, 2),
    (360, 3),
    (420, 4),
    (450, 5),
    (475, 6),
    (495, 7),
    (510, 8),
    (520, 20),
    (525, 40),
    (528, 80),
    (530, 160),
];

pub fn cpu_burst<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    let r = rng.gen_range(0..530);
    CPU_BURSTS
        .iter()
        .find(|(bound, _)| r < *bound)
        .map_or(160, |(_, burst)| *burst)
}

pub fn io_burst<R: Rng + ?Sized>(rng: &mut R, cpu_burst: u32) -> u32 {
    let r: u32 = rng.gen_range(0..100);
    if cpu_burst > LONG_BURST {
        (9 * r) / 10 + 10
    } else {
        r / 10 + 10
    }
}

pub fn reps<R: Rng + ?Sized>(rng: &mut R, cpu_burst: u32) -> u32 {
    let r: u32 = rng.gen_range(0..100);
    if cpu_burst > LONG_BURST {
        r / 20 + 1
    } else {
        r / 2 + 50
    }
}

pub fn priority<R: Rng + ?Sized>(rng: &mut R, cpu_burst: u32) -> Priority {
    let r: u32 = rng.gen_range(0..10);
    let level = if cpu_burst > LONG_BURST {
        3 - (r * r) / 50
    } else {
        r % 3 + 1
    };
    match level {
        3 => Priority::High,
        2 => Priority::Medium,
        _ => Priority::Low,
    }
}

/// Generate `count` descriptors with ids `0..count`.
pub fn generate<R: Rng + ?Sized>(count: u32, rng: &mut R) -> Vec<ProcessDescriptor> {
    (0..count)
        .map(|id| {
            let cpu_burst = cpu_burst(rng);
            ProcessDescriptor {
                id,
                cpu_burst,
                io_burst: io_burst(rng, cpu_burst),
                reps: reps(rng, cpu_burst),
                priority: priority(rng, cpu_burst),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn same_seed_same_traffic() {
        let a = generate(20, &mut StdRng::seed_from_u64(7));
        let b = generate(20, &mut StdRng::seed_from_u64(7));

        assert_eq!(a, b);
        assert_eq!(a.iter().map(|d| d.id).collect::<Vec<_>>(), (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(1);

        for d in generate(500, &mut rng) {
            assert!(CPU_BURSTS.iter().any(|(_, burst)| *burst == d.cpu_burst));
            assert!(d.reps >= 1);
            if d.cpu_burst > LONG_BURST {
                assert!((10..=99).contains(&d.io_burst));
                assert!((1..=5).contains(&d.reps));
                // 3 - r*r/50 with r < 10 never goes below 2
                assert_ne!(d.priority, Priority::Low);
            } else {
                assert!((10..=19).contains(&d.io_burst));
                assert!((50..=99).contains(&d.reps));
            }
        }
    }

    #[test]
    fn short_bursts_dominate() {
        let mut rng = StdRng::seed_from_u64(3);
        let short = (0..1000)
            .filter(|_| cpu_burst(&mut rng) <= LONG_BURST)
            .count();

        // 510 of 530 outcomes are short
        assert!(short > 900);
    }

    #[test]
    fn zero_processes() {
        assert!(generate(0, &mut StdRng::seed_from_u64(0)).is_empty());
    }
}
