//! Specialized collection types

pub use slotmap::{Key, SecondaryMap, SlotMap};

/// Registry holding at most one live job per handle
///
/// Starting a job for a handle that already owns one drops the previous job
/// before the new one is stored. Jobs are plain per-tick state objects, so
/// dropping one is the cancellation.
pub struct JobRegistry<K: Key, J> {
    jobs: SecondaryMap<K, J>,
}

impl<K: Key, J> JobRegistry<K, J> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            jobs: SecondaryMap::new(),
        }
    }

    /// Store a job for `key`, returning the job it superseded
    pub fn start(&mut self, key: K, job: J) -> Option<J> {
        let previous = self.jobs.remove(key);
        self.jobs.insert(key, job);
        previous
    }

    /// Remove the job for `key`, if any
    pub fn cancel(&mut self, key: K) -> Option<J> {
        self.jobs.remove(key)
    }

    /// Whether a job is live for `key`
    pub fn contains(&self, key: K) -> bool {
        self.jobs.contains_key(key)
    }

    /// Get a live job
    pub fn get(&self, key: K) -> Option<&J> {
        self.jobs.get(key)
    }

    /// Get a live job mutably
    pub fn get_mut(&mut self, key: K) -> Option<&mut J> {
        self.jobs.get_mut(key)
    }

    /// Number of live jobs
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether no job is live
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Drop every job
    pub fn clear(&mut self) {
        self.jobs.clear();
    }

    /// Run `step` on every live job and unregister the ones that finished
    ///
    /// `step` returns `true` once its job is done. Finished keys are returned
    /// in no particular order.
    pub fn advance(&mut self, mut step: impl FnMut(K, &mut J) -> bool) -> Vec<K> {
        let mut finished = Vec::new();
        for (key, job) in &mut self.jobs {
            if step(key, job) {
                finished.push(key);
            }
        }
        for key in &finished {
            self.jobs.remove(*key);
        }
        finished
    }
}

impl<K: Key, J> Default for JobRegistry<K, J> {
    fn default() -> Self {
        Self::new()
    }
}
