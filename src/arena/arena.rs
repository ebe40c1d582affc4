use std::mem::size_of;

use thiserror::Error;
use tracing::debug;

/// Default capacity of a single region, in bytes.
pub const REGION_INIT_CAP: usize = 8 * 1024;

/// Every allocation starts on a multiple of this many bytes.
pub const ALIGNMENT: usize = 8;

/// Upper bound for a configured region capacity. Offsets inside a region
/// must fit in a `u32`.
pub const MAX_REGION_CAP: usize = (u32::MAX as usize) & !(ALIGNMENT - 1);

const WORD: usize = size_of::<u64>();

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    #[error("not enough memory for a region of {requested} bytes")]
    OutOfMemory { requested: usize },
    #[error("allocation of {size} bytes does not fit in a region of {capacity} bytes")]
    AllocationTooLarge { size: usize, capacity: usize },
}

/// Arena construction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Capacity in bytes of every region the arena creates.
    pub region_capacity: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            region_capacity: REGION_INIT_CAP,
        }
    }
}

impl ArenaConfig {
    /// Builds a config whose capacity is rounded up to the alignment and
    /// clamped to `ALIGNMENT..=MAX_REGION_CAP`.
    pub fn with_region_capacity(region_capacity: usize) -> Self {
        let clamped = region_capacity.clamp(ALIGNMENT, MAX_REGION_CAP);
        ArenaConfig {
            region_capacity: align_forward(clamped),
        }
    }
}

/// Rounds `size` up to the next multiple of [`ALIGNMENT`].
pub fn align_forward(size: usize) -> usize {
    size.next_multiple_of(ALIGNMENT)
}

/// A contiguous buffer with a used-byte cursor.
///
/// Backed by `u64` words so the buffer start is always 8-byte aligned, which
/// makes every aligned offset an aligned address.
#[derive(Debug)]
struct Region {
    memory: Box<[u64]>,
    used: usize,
}

impl Region {
    fn new(capacity: usize) -> Result<Self, ArenaError> {
        let words = capacity / WORD;
        let mut memory: Vec<u64> = Vec::new();
        memory
            .try_reserve_exact(words)
            .map_err(|_| ArenaError::OutOfMemory {
                requested: capacity,
            })?;
        memory.resize(words, 0);

        Ok(Region {
            memory: memory.into_boxed_slice(),
            used: 0,
        })
    }

    fn capacity(&self) -> usize {
        self.memory.len() * WORD
    }

    fn fits(&self, size: usize) -> bool {
        self.used + size <= self.capacity()
    }

    fn base_address(&self) -> usize {
        self.memory.as_ptr() as usize
    }
}

/// Opaque handle to a block of arena memory.
///
/// Handles remember the arena generation they were created in; once the
/// arena is reset they are stale and any access through them panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Allocation {
    region: u32,
    offset: u32,
    size: u32,
    generation: u64,
}

impl Allocation {
    pub(crate) fn from_parts(region: u32, offset: u32, size: u32, generation: u64) -> Self {
        Allocation {
            region,
            offset,
            size,
            generation,
        }
    }

    /// Index of the region this allocation lives in, counted from the
    /// first region of the chain.
    pub fn region(&self) -> u32 {
        self.region
    }

    /// Byte offset from the start of the region.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Requested size in bytes (before alignment padding).
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Per-region usage snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionStats {
    pub capacity: usize,
    pub used: usize,
}

/// Bump allocator over a chain of fixed-capacity regions.
///
/// The first region (`begin`) is where every allocation search starts, the
/// last one (`end`) is where new regions get appended. The chain is never
/// empty.
#[derive(Debug)]
pub struct Arena {
    regions: Vec<Region>,
    region_capacity: usize,
    generation: u64,
}

impl Arena {
    /// Creates an arena with one region of [`REGION_INIT_CAP`] bytes.
    pub fn new() -> Result<Self, ArenaError> {
        Self::with_config(ArenaConfig::default())
    }

    pub fn with_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        let region_capacity =
            ArenaConfig::with_region_capacity(config.region_capacity).region_capacity;
        let first = Region::new(region_capacity)?;

        debug!(region_capacity, "arena initialised");

        Ok(Arena {
            regions: vec![first],
            region_capacity,
            generation: 0,
        })
    }

    /// Reserves `size` bytes.
    ///
    /// Regions are scanned from the first one in chain order and the first
    /// region with room is used. When none fits, a new region is appended
    /// at the end of the chain. The cursor of the chosen region advances by
    /// `size` rounded up to [`ALIGNMENT`].
    pub fn alloc(&mut self, size: usize) -> Result<Allocation, ArenaError> {
        if size > self.region_capacity {
            return Err(ArenaError::AllocationTooLarge {
                size,
                capacity: self.region_capacity,
            });
        }

        let index = match self.regions.iter().position(|region| region.fits(size)) {
            Some(index) => index,
            None => {
                self.regions.push(Region::new(self.region_capacity)?);
                debug!(
                    regions = self.regions.len(),
                    region_capacity = self.region_capacity,
                    "appended arena region"
                );
                self.regions.len() - 1
            }
        };

        let region_index = u32::try_from(index).map_err(|_| ArenaError::OutOfMemory {
            requested: self.region_capacity,
        })?;

        let region = &mut self.regions[index];
        let start = region.used;
        assert!(
            (region.base_address() + start) % ALIGNMENT == 0,
            "starting address of region is not aligned"
        );

        region.used = start + align_forward(size);
        assert!(
            region.used <= region.capacity(),
            "region cursor moved past its capacity"
        );

        // Both fit: start <= capacity <= MAX_REGION_CAP and size <= capacity.
        Ok(Allocation::from_parts(
            region_index,
            start as u32,
            size as u32,
            self.generation,
        ))
    }

    /// Rewinds every region to empty without giving memory back.
    ///
    /// All previously returned allocations become stale.
    pub fn reset(&mut self) {
        for region in self.regions.iter_mut() {
            region.used = 0;
        }
        self.generation += 1;

        debug!(
            regions = self.regions.len(),
            generation = self.generation,
            "arena reset"
        );
    }

    /// Frees every region. The arena cannot be used afterwards.
    pub fn release(self) {
        debug!(
            regions = self.regions.len(),
            capacity = self.capacity(),
            "arena released"
        );
        drop(self);
    }

    /// Whether `allocation` was handed out since the last reset.
    pub fn is_live(&self, allocation: Allocation) -> bool {
        allocation.generation == self.generation
            && (allocation.region as usize) < self.regions.len()
    }

    /// Absolute address of the allocation's first byte.
    pub fn address(&self, allocation: Allocation) -> usize {
        self.check_live(allocation);
        self.regions[allocation.region as usize].base_address() + allocation.offset as usize
    }

    /// The allocation's memory as whole words, alignment padding included.
    pub fn words(&self, allocation: Allocation) -> &[u64] {
        self.check_live(allocation);
        let range = Self::word_range(allocation);
        &self.regions[allocation.region as usize].memory[range]
    }

    pub fn words_mut(&mut self, allocation: Allocation) -> &mut [u64] {
        self.check_live(allocation);
        let range = Self::word_range(allocation);
        &mut self.regions[allocation.region as usize].memory[range]
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn region_capacity(&self) -> usize {
        self.region_capacity
    }

    /// Total bytes owned by the arena across all regions.
    pub fn capacity(&self) -> usize {
        self.regions.iter().map(Region::capacity).sum()
    }

    /// Total bytes handed out (padding included) since the last reset.
    pub fn used(&self) -> usize {
        self.regions.iter().map(|region| region.used).sum()
    }

    pub fn stats(&self) -> Vec<RegionStats> {
        self.regions
            .iter()
            .map(|region| RegionStats {
                capacity: region.capacity(),
                used: region.used,
            })
            .collect()
    }

    fn word_range(allocation: Allocation) -> std::ops::Range<usize> {
        let start = allocation.offset as usize / WORD;
        let end = start + align_forward(allocation.size as usize) / WORD;
        start..end
    }

    fn check_live(&self, allocation: Allocation) {
        assert!(
            self.is_live(allocation),
            "stale arena allocation used after reset (allocation generation {}, arena generation {})",
            allocation.generation,
            self.generation
        );
    }
}
