//! Enemy shot scheduling
//!
//! One armed column and a countdown. When the countdown hits zero the
//! front-runner of the armed column may fire; firing re-arms with a fresh
//! random column and cooldown.

use rand::Rng;

/// Which column fires next, and when
#[derive(Debug, Clone)]
pub struct ShotScheduler {
    cooldown_low: f32,
    cooldown_high: f32,
    /// `None` until the first successful reset
    target_column: Option<usize>,
    cooldown: f32,
}

impl ShotScheduler {
    pub fn new(cooldown_low: f32, cooldown_high: f32) -> Self {
        Self {
            cooldown_low,
            cooldown_high,
            target_column: None,
            cooldown: 0.0,
        }
    }

    #[inline]
    pub fn target_column(&self) -> Option<usize> {
        self.target_column
    }

    #[inline]
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Count the cooldown down, clamped at zero
    pub fn tick(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    /// Pick a new target among `alive_columns` and a new cooldown.
    ///
    /// With no alive columns the previous state is kept as is.
    pub fn reset<R: Rng + ?Sized>(&mut self, alive_columns: &[usize], rng: &mut R) {
        if alive_columns.is_empty() {
            return;
        }
        let column = alive_columns[rng.random_range(0..alive_columns.len())];
        self.target_column = Some(column);
        self.cooldown = self.draw_cooldown(rng);
    }

    fn draw_cooldown<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.cooldown_high > self.cooldown_low {
            rng.random_range(self.cooldown_low..self.cooldown_high)
        } else {
            self.cooldown_low
        }
    }

    /// True if the cell in column `x` may fire right now
    pub fn may_fire(&self, x: usize, front_runner: bool) -> bool {
        self.target_column == Some(x) && self.cooldown <= 0.0 && front_runner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_starts_unarmed() {
        let shots = ShotScheduler::new(1.0, 2.0);
        assert_eq!(shots.target_column(), None);
        assert!(!shots.may_fire(0, true));
    }

    #[test]
    fn test_reset_picks_alive_column() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut shots = ShotScheduler::new(1.0, 2.0);
        for _ in 0..50 {
            shots.reset(&[2, 5], &mut rng);
            assert!(matches!(shots.target_column(), Some(2) | Some(5)));
        }
    }

    #[test]
    fn test_reset_empty_keeps_state() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut shots = ShotScheduler::new(1.0, 2.0);
        shots.reset(&[3], &mut rng);
        let cooldown = shots.cooldown();

        shots.reset(&[], &mut rng);
        assert_eq!(shots.target_column(), Some(3));
        assert_eq!(shots.cooldown(), cooldown);
    }

    #[test]
    fn test_tick_clamps_at_zero() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut shots = ShotScheduler::new(1.0, 2.0);
        shots.reset(&[0], &mut rng);
        assert!(!shots.may_fire(0, true));

        shots.tick(0.5);
        assert!(shots.cooldown() > 0.0);
        shots.tick(10.0);
        assert_eq!(shots.cooldown(), 0.0);
        shots.tick(1.0);
        assert_eq!(shots.cooldown(), 0.0);

        assert!(shots.may_fire(0, true));
        assert!(!shots.may_fire(0, false));
        assert!(!shots.may_fire(1, true));
    }

    #[test]
    fn test_equal_bounds() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut shots = ShotScheduler::new(1.5, 1.5);
        shots.reset(&[0], &mut rng);
        assert_eq!(shots.cooldown(), 1.5);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = ShotScheduler::new(0.5, 3.0);
        let mut b = ShotScheduler::new(0.5, 3.0);
        let mut rng_a = Pcg32::seed_from_u64(42);
        let mut rng_b = Pcg32::seed_from_u64(42);
        let columns = [0, 1, 2, 3, 4];
        for _ in 0..20 {
            a.reset(&columns, &mut rng_a);
            b.reset(&columns, &mut rng_b);
            assert_eq!(a.target_column(), b.target_column());
            assert_eq!(a.cooldown(), b.cooldown());
        }
    }

    proptest! {
        #[test]
        fn prop_cooldown_within_bounds(
            seed in any::<u64>(),
            low in 0.0f32..5.0,
            span in 0.0f32..5.0,
            ticks in proptest::collection::vec(0.0f32..1.0, 0..20),
        ) {
            let high = low + span;
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut shots = ShotScheduler::new(low, high);
            shots.reset(&[0, 1, 2], &mut rng);
            let c = shots.cooldown();
            prop_assert!(c >= low);
            prop_assert!(c < high || (high == low && c == low));

            for dt in ticks {
                shots.tick(dt);
                prop_assert!(shots.cooldown() >= 0.0);
            }
        }
    }
}
