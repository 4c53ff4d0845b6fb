use glam::{IVec2, Vec2};

use crate::error::SphError;

/// Start-index sentinel for a cell key with no particles.
const EMPTY: u32 = u32::MAX;

const HASH_X: i64 = 15823;
const HASH_Y: i64 = 9737333;

/// One row of the sorted lookup table.
///
/// Plain-old-data so the table can be uploaded to a GPU buffer unchanged.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LookupEntry {
    pub particle_index: u32,
    pub cell_key: u32,
}

/// Uniform spatial hash grid over one position snapshot.
///
/// Particles are bucketed by `hash(cell) mod table_size` and sorted by that
/// key, so every key owns one contiguous run of the lookup table. Distinct
/// cells may share a key; queries walk the whole run and filter by distance,
/// which keeps the result exact regardless of collisions.
///
/// The index is only valid for the positions it was built from. Rebuild it
/// after every position update.
#[derive(Clone, Debug)]
pub struct GridIndex {
    cell_size: f32,
    table_size: usize,
    /// Particle indices sorted by cell key
    lookup: Vec<LookupEntry>,
    /// start_indices[key] = first row of `lookup` carrying `key`, or EMPTY
    start_indices: Vec<u32>,
}

/// Cell containing `position` for a grid of the given cell size.
#[inline]
pub fn cell_coord(position: Vec2, cell_size: f32) -> IVec2 {
    (position / cell_size).floor().as_ivec2()
}

/// Mix integer cell coordinates into a signed hash.
#[inline]
pub fn hash_cell(cell: IVec2) -> i64 {
    (cell.x as i64)
        .wrapping_mul(HASH_X)
        .wrapping_add((cell.y as i64).wrapping_mul(HASH_Y))
}

/// Reduce a cell hash into `[0, table_size)`.
///
/// `table_size` must be non-zero.
#[inline]
pub fn key_from_hash(hash: i64, table_size: usize) -> u32 {
    hash.rem_euclid(table_size as i64) as u32
}

impl GridIndex {
    /// Build the index with one key slot per particle.
    ///
    /// O(N log N) because of the sort. An empty snapshot gives an empty grid.
    pub fn rebuild(positions: &[Vec2], radius: f32) -> Result<Self, SphError> {
        Self::rebuild_with_table_size(positions, radius, positions.len())
    }

    /// Build the index with a fixed number of key slots, independent of the
    /// particle count.
    pub fn rebuild_with_table_size(
        positions: &[Vec2],
        radius: f32,
        table_size: usize,
    ) -> Result<Self, SphError> {
        if !(radius > 0.0) || !radius.is_finite() {
            log::warn!("rejecting grid rebuild with smoothing radius {}", radius);
            return Err(SphError::InvalidRadius(radius));
        }
        if table_size == 0 && !positions.is_empty() {
            log::warn!(
                "rejecting grid rebuild of {} particles with an empty key table",
                positions.len()
            );
            return Err(SphError::InvalidTableSize);
        }

        let mut lookup: Vec<LookupEntry> = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| LookupEntry {
                particle_index: i as u32,
                cell_key: key_from_hash(hash_cell(cell_coord(p, radius)), table_size),
            })
            .collect();
        lookup.sort_unstable_by_key(|entry| entry.cell_key);

        let mut start_indices = vec![EMPTY; table_size];
        let mut occupied = 0usize;
        for (row, entry) in lookup.iter().enumerate() {
            let slot = &mut start_indices[entry.cell_key as usize];
            if *slot == EMPTY {
                *slot = row as u32;
                occupied += 1;
            }
        }

        log::trace!(
            "grid rebuilt: {} particles, {} keys, {} occupied",
            lookup.len(),
            table_size,
            occupied
        );

        Ok(Self {
            cell_size: radius,
            table_size,
            lookup,
            start_indices,
        })
    }

    /// Visit every particle within `radius` of `sample`, itself included.
    ///
    /// Scans the 3x3 block of cells around the sample. A `radius` larger
    /// than the cell size the grid was built with widens the block to
    /// cover it, falling back to a full scan once the block would touch
    /// every key.
    pub fn for_each_neighbor<F: FnMut(u32)>(
        &self,
        sample: Vec2,
        positions: &[Vec2],
        radius: f32,
        mut callback: F,
    ) {
        if self.lookup.is_empty() {
            return;
        }
        let centre = cell_coord(sample, self.cell_size);

        if radius <= self.cell_size {
            // Several of the nine cells can share a key; each run is walked once.
            let mut visited = [EMPTY; 9];
            let mut visited_len = 0;
            for dx in -1..=1_i32 {
                for dy in -1..=1_i32 {
                    let key = self.key_at(centre, dx, dy);
                    if visited[..visited_len].contains(&key) {
                        continue;
                    }
                    visited[visited_len] = key;
                    visited_len += 1;
                    self.walk_run(key, sample, positions, radius, &mut callback);
                }
            }
            return;
        }

        let reach = (radius / self.cell_size).ceil();
        let span = 2.0 * reach + 1.0;
        if !(span * span < self.table_size as f32) {
            for entry in &self.lookup {
                let j = entry.particle_index;
                if sample.distance(positions[j as usize]) <= radius {
                    callback(j);
                }
            }
            return;
        }

        let reach = reach as i32;
        let mut visited: Vec<u32> = Vec::with_capacity((span * span) as usize);
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                let key = self.key_at(centre, dx, dy);
                if visited.contains(&key) {
                    continue;
                }
                visited.push(key);
                self.walk_run(key, sample, positions, radius, &mut callback);
            }
        }
    }

    /// Key of the cell offset by `(dx, dy)` from `centre`.
    #[inline]
    fn key_at(&self, centre: IVec2, dx: i32, dy: i32) -> u32 {
        let cell = IVec2::new(centre.x.wrapping_add(dx), centre.y.wrapping_add(dy));
        key_from_hash(hash_cell(cell), self.table_size)
    }

    /// Walk the contiguous run of `key`, reporting particles within `radius`.
    #[inline]
    fn walk_run<F: FnMut(u32)>(
        &self,
        key: u32,
        sample: Vec2,
        positions: &[Vec2],
        radius: f32,
        callback: &mut F,
    ) {
        let start = self.start_indices[key as usize];
        if start == EMPTY {
            return;
        }
        for entry in self.lookup[start as usize..]
            .iter()
            .take_while(|entry| entry.cell_key == key)
        {
            let j = entry.particle_index;
            if sample.distance(positions[j as usize]) <= radius {
                callback(j);
            }
        }
    }

    /// Indices of all particles within `radius` of `sample`, itself included.
    ///
    /// Same coverage rules as [`GridIndex::for_each_neighbor`].
    pub fn query_neighbors(&self, sample: Vec2, positions: &[Vec2], radius: f32) -> Vec<u32> {
        let mut neighbors = Vec::new();
        self.for_each_neighbor(sample, positions, radius, |j| neighbors.push(j));
        neighbors
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn table_size(&self) -> usize {
        self.table_size
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Sorted (particle, key) rows.
    pub fn lookup(&self) -> &[LookupEntry] {
        &self.lookup
    }

    /// Per-key first row, `u32::MAX` for unused keys.
    pub fn start_indices(&self) -> &[u32] {
        &self.start_indices
    }

    /// Lookup table as raw bytes, ready for a storage buffer upload.
    pub fn lookup_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lookup)
    }
}

/// Brute-force O(N) neighbor scan with the same inclusion rule as
/// [`GridIndex::query_neighbors`].
pub fn query_exhaustive(sample: Vec2, positions: &[Vec2], radius: f32) -> Vec<u32> {
    positions
        .iter()
        .enumerate()
        .filter(|(_, p)| sample.distance(**p) <= radius)
        .map(|(i, _)| i as u32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_hash_reduces_to_valid_key() {
        let h = hash_cell(IVec2::new(-3, -1));
        assert!(h < 0);
        let key = key_from_hash(h, 7);
        assert!(key < 7);
        assert_eq!(key as i64, h.rem_euclid(7));
    }

    #[test]
    fn test_cell_coord_floors_toward_negative_infinity() {
        assert_eq!(cell_coord(Vec2::new(-0.1, 0.1), 1.0), IVec2::new(-1, 0));
        assert_eq!(cell_coord(Vec2::new(2.5, -2.5), 0.5), IVec2::new(5, -5));
    }

    #[test]
    fn test_start_indices_point_at_first_row_of_each_run() {
        let positions: Vec<Vec2> = (0..20)
            .map(|i| Vec2::new((i % 5) as f32 * 0.7, (i / 5) as f32 * 1.3 - 2.0))
            .collect();
        let grid = GridIndex::rebuild(&positions, 1.0).unwrap();

        let lookup = grid.lookup();
        for pair in lookup.windows(2) {
            assert!(pair[0].cell_key <= pair[1].cell_key, "lookup not sorted by key");
        }
        for (key, &start) in grid.start_indices().iter().enumerate() {
            if start == EMPTY {
                assert!(lookup.iter().all(|e| e.cell_key != key as u32));
                continue;
            }
            let start = start as usize;
            assert_eq!(lookup[start].cell_key, key as u32);
            assert!(start == 0 || lookup[start - 1].cell_key != key as u32);
        }
    }

    #[test]
    fn test_lookup_bytes_layout() {
        let positions = vec![Vec2::ZERO, Vec2::new(3.0, 0.0)];
        let grid = GridIndex::rebuild(&positions, 1.0).unwrap();
        assert_eq!(grid.lookup_bytes().len(), 2 * std::mem::size_of::<LookupEntry>());
        assert_eq!(std::mem::size_of::<LookupEntry>(), 8);
    }
}
