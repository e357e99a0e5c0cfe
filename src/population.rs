use bevy::utils::HashSet;

use crate::error::PopulationError;
use crate::moth::{Moth, MothId, Morph};

/// Moths that entered and left the population in one commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    pub born: Vec<Moth>,
    pub eaten: Vec<Moth>,
}

/// Authoritative set of moths with a two-phase stage/commit mutation protocol.
///
/// Staged removals and births are invisible to every query until [`commit`]
/// applies them together, so decisions made during a generation all see the
/// population as it was when the generation started.
///
/// [`commit`]: PopulationStore::commit
#[derive(Debug, Default)]
pub struct PopulationStore {
    moths: Vec<Moth>,
    staged_removals: HashSet<MothId>,
    staged_births: Vec<Moth>,
    next_id: u64,
}

impl PopulationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the population with `size` fresh moths, `dark_percent` of them dark.
    ///
    /// Dark moths are created first, then light ones. Identifiers keep counting
    /// up from wherever the allocator left off.
    pub fn initialize(&mut self, size: usize, dark_percent: u32) {
        self.clear();

        let number_dark = dark_count_for(size, dark_percent);
        let number_light = size - number_dark;

        self.moths.reserve(size);
        for _ in 0..number_dark {
            let moth = self.allocate(Morph::Dark);
            self.moths.push(moth);
        }
        for _ in 0..number_light {
            let moth = self.allocate(Morph::Light);
            self.moths.push(moth);
        }
    }

    pub fn count_by_morph(&self, morph: Morph) -> usize {
        self.moths.iter().filter(|m| m.morph == morph).count()
    }

    /// Committed moths of one morph, in insertion order
    pub fn moths_by_morph(&self, morph: Morph) -> impl Iterator<Item = &Moth> + '_ {
        self.moths.iter().filter(move |m| m.morph == morph)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Moth> + '_ {
        self.moths.iter()
    }

    pub fn len(&self) -> usize {
        self.moths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moths.is_empty()
    }

    pub fn contains(&self, id: MothId) -> bool {
        self.moths.iter().any(|m| m.id == id)
    }

    /// Number of removals and births waiting for the next commit
    pub fn staged(&self) -> (usize, usize) {
        (self.staged_removals.len(), self.staged_births.len())
    }

    /// Marks a committed moth for removal at the next commit.
    pub fn stage_removal(&mut self, id: MothId) -> Result<(), PopulationError> {
        if !self.contains(id) {
            return Err(PopulationError::UnknownMoth(id));
        }
        if !self.staged_removals.insert(id) {
            return Err(PopulationError::AlreadyStaged(id));
        }
        Ok(())
    }

    /// Queues a newborn of `morph`; its id is allocated now but it stays hidden until commit.
    pub fn stage_birth(&mut self, morph: Morph) -> MothId {
        let moth = self.allocate(morph);
        self.staged_births.push(moth);
        moth.id
    }

    /// Applies every staged removal and birth as a single transaction.
    pub fn commit(&mut self) -> CommitReport {
        let mut eaten = Vec::with_capacity(self.staged_removals.len());
        if !self.staged_removals.is_empty() {
            let removals = &self.staged_removals;
            self.moths.retain(|m| {
                if removals.contains(&m.id) {
                    eaten.push(*m);
                    false
                } else {
                    true
                }
            });
            self.staged_removals.clear();
        }

        let born = std::mem::take(&mut self.staged_births);
        self.moths.extend_from_slice(&born);

        CommitReport { born, eaten }
    }

    /// Empties the population and drops anything staged. The id allocator is left alone.
    pub fn clear(&mut self) {
        self.moths.clear();
        self.staged_removals.clear();
        self.staged_births.clear();
    }

    fn allocate(&mut self, morph: Morph) -> Moth {
        self.next_id += 1;
        Moth::new(MothId(self.next_id), morph)
    }
}

/// `round(dark_percent / 100 * size)`, rounding halves up
fn dark_count_for(size: usize, dark_percent: u32) -> usize {
    let exact = dark_percent as f64 / 100.0 * size as f64;
    (exact + 0.5).floor().min(size as f64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_count_rounds_half_up() {
        assert_eq!(dark_count_for(100, 2), 2);
        assert_eq!(dark_count_for(30, 5), 2); // 1.5
        assert_eq!(dark_count_for(20, 100), 20);
        assert_eq!(dark_count_for(0, 50), 0);
    }
}
