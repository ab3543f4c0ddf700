use log::{debug, warn};
use rand::Rng;

/// The names that are still eligible for the next draws.
///
/// The pool is a list and not a set: a name that appears twice in the
/// uploaded list is two separate entries, each of them with its own chance
/// to be drawn.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ParticipantPool {
    names: Vec<String>,
}

impl ParticipantPool {
    /// Builds the pool from an uploaded list.
    ///
    /// One occurrence of each excluded name is removed. Excluded names that
    /// are not in the list are ignored.
    pub fn initialize(names: &[String], excluded: &[String]) -> ParticipantPool {
        let mut pool = ParticipantPool {
            names: names.to_vec(),
        };
        for name in excluded {
            if !pool.remove_one(name) {
                debug!("initialize: excluded name {:?} is not in the list", name);
            }
        }
        pool
    }

    /// Picks `min(k, size)` distinct entries, uniformly and in random order.
    ///
    /// The pool itself is left untouched.
    pub fn sample_without_replacement<R: Rng + ?Sized>(&self, k: usize, rng: &mut R) -> Vec<String> {
        let amount = k.min(self.names.len());
        rand::seq::index::sample(rng, self.names.len(), amount)
            .into_iter()
            .map(|idx| self.names[idx].clone())
            .collect()
    }

    /// Removes one occurrence of each given name.
    pub fn remove(&mut self, names: &[String]) {
        for name in names {
            if !self.remove_one(name) {
                warn!("remove: {:?} is not in the pool", name);
            }
        }
    }

    pub fn size(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    fn remove_one(&mut self, name: &str) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(idx) => {
                self.names.remove(idx);
                true
            }
            None => false,
        }
    }
}
