use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::error::TrainingError;

/// Seeded shuffle split into (train, test) index lists.
///
/// The test partition holds `ceil(n * test_ratio)` rows; both partitions must
/// end up non-empty.
pub fn train_test_split(
    n: usize,
    test_ratio: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>), TrainingError> {
    let n_test = (n as f64 * test_ratio).ceil() as usize;
    if n_test == 0 || n_test >= n || !(0.0..1.0).contains(&test_ratio) {
        return Err(TrainingError::TooSmall { rows: n, test_ratio });
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok((train, indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eighty_twenty() {
        let (train, test) = train_test_split(1000, 0.2, 42).unwrap();
        assert_eq!(train.len(), 800);
        assert_eq!(test.len(), 200);

        let mut all: Vec<usize> = train.iter().chain(&test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn test_test_size_rounds_up() {
        let (train, test) = train_test_split(11, 0.2, 42).unwrap();
        assert_eq!(test.len(), 3);
        assert_eq!(train.len(), 8);
    }

    #[test]
    fn test_reproducible() {
        assert_eq!(
            train_test_split(50, 0.2, 42).unwrap(),
            train_test_split(50, 0.2, 42).unwrap()
        );
        assert_ne!(
            train_test_split(50, 0.2, 42).unwrap(),
            train_test_split(50, 0.2, 7).unwrap()
        );
    }

    #[test]
    fn test_too_small() {
        assert!(matches!(
            train_test_split(1, 0.2, 42),
            Err(TrainingError::TooSmall { rows: 1, .. })
        ));
        assert!(train_test_split(0, 0.2, 42).is_err());
        assert!(train_test_split(10, 0.0, 42).is_err());
    }
}
