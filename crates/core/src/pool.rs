//! # Subject Pool
//!
//! Uniform random draws over every loaded subject. A draw ignores the day,
//! the time and earlier draws; there is no load balancing and no faculty
//! clash avoidance across sections. Randomness always comes from the caller
//! so runs are reproducible from a seed.

use rand::{Rng, seq::SliceRandom};
use tracing::debug;

use crate::{
    errors::{TimetableError, TimetableResult},
    models::{clock::ClockTime, timetable::Subject},
    preferences::PreferenceSet,
};

/// Outcome of one draw for a non-break slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw<'a> {
    Subject(&'a Subject),
    /// A subject was drawn but a preference left the slot empty.
    Free,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectPool {
    subjects: Vec<Subject>,
}

impl SubjectPool {
    /// Duplicate codes are kept; each entry is a separate candidate.
    pub fn load(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Draws the subject for the slot at `day`/`time`.
    ///
    /// The draw happens before the early-morning check, so a suppressed slot
    /// still consumes one value from `rng`.
    ///
    /// # Errors
    ///
    /// * `TimetableError::Configuration` - the pool is empty
    pub fn pick_for_slot<'a, R>(
        &'a self,
        rng: &mut R,
        day: &str,
        time: ClockTime,
        preferences: &PreferenceSet,
    ) -> TimetableResult<Draw<'a>>
    where
        R: Rng + ?Sized,
    {
        let subject = self.subjects.choose(rng).ok_or_else(|| {
            TimetableError::Configuration(format!(
                "subject pool is empty, cannot fill {} {}",
                day, time
            ))
        })?;

        if preferences.suppresses(time) {
            debug!(%day, %time, "early slot left free");
            return Ok(Draw::Free);
        }

        Ok(Draw::Subject(subject))
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn subject(code: &str) -> Subject {
        Subject {
            code: code.to_string(),
            name: format!("{} name", code),
            faculty_name: format!("{} faculty", code),
            lab: false,
        }
    }

    #[test]
    fn empty_pool_is_a_configuration_error() {
        let pool = SubjectPool::load(vec![]);
        let mut rng = StdRng::seed_from_u64(1);
        let err = pool
            .pick_for_slot(&mut rng, "Monday", ClockTime::at(11, 0), &PreferenceSet::default())
            .unwrap_err();
        assert!(matches!(err, TimetableError::Configuration(_)));
    }

    #[test]
    fn draws_come_from_the_pool() {
        let pool = SubjectPool::load(vec![subject("CS101"), subject("CS102")]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            match pool
                .pick_for_slot(&mut rng, "Monday", ClockTime::at(11, 0), &PreferenceSet::default())
                .unwrap()
            {
                Draw::Subject(s) => assert!(s.code == "CS101" || s.code == "CS102"),
                Draw::Free => panic!("no preference should free this slot"),
            }
        }
    }

    #[test]
    fn suppressed_draw_still_advances_rng() {
        let pool = SubjectPool::load(vec![subject("A"), subject("B"), subject("C")]);
        let early = PreferenceSet {
            avoid_early_mornings: true,
            ..Default::default()
        };

        let mut suppressed = StdRng::seed_from_u64(42);
        let mut plain = StdRng::seed_from_u64(42);
        assert_eq!(
            pool.pick_for_slot(&mut suppressed, "Monday", ClockTime::at(9, 0), &early)
                .unwrap(),
            Draw::Free
        );
        pool.pick_for_slot(&mut plain, "Monday", ClockTime::at(9, 0), &PreferenceSet::default())
            .unwrap();

        let next_after_suppressed = pool
            .pick_for_slot(&mut suppressed, "Monday", ClockTime::at(11, 0), &early)
            .unwrap();
        let next_after_plain = pool
            .pick_for_slot(&mut plain, "Monday", ClockTime::at(11, 0), &early)
            .unwrap();
        assert_eq!(next_after_suppressed, next_after_plain);
    }
}
