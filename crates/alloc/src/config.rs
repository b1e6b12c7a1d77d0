/// Controls how an [`Array`](crate::Array) computes a new capacity when it runs out of room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthPolicy {
    /// The smallest capacity any non-empty allocation will have.
    min_capacity: usize,
    /// The multiplier applied to the current capacity when more room is needed.
    growth_factor: usize,
}

impl GrowthPolicy {
    /// Default floor capacity.
    pub const MIN_CAPACITY: usize = 10;

    /// Default growth factor.
    pub const GROWTH_FACTOR: usize = 2;

    /// Constructs a new `GrowthPolicy`.
    ///
    /// # Panics
    ///
    /// Panics if
    /// - `min_capacity` is zero
    /// - `growth_factor` is smaller than 2
    pub const fn new(min_capacity: usize, growth_factor: usize) -> Self {
        assert!(min_capacity > 0, "floor capacity must be non-zero");
        assert!(growth_factor >= 2, "growth factor must be at least 2");
        Self {
            min_capacity,
            growth_factor,
        }
    }

    #[inline]
    pub const fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    #[inline]
    pub const fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    /// Returns the capacity to grow to from `current` when the buffer is full.
    ///
    /// Saturates instead of overflowing, the allocation then fails with a capacity overflow.
    #[inline]
    pub const fn grown(&self, current: usize) -> usize {
        let next = current.saturating_mul(self.growth_factor);
        if next < self.min_capacity {
            self.min_capacity
        } else {
            next
        }
    }

    /// Returns the capacity of a fresh allocation holding `len` elements.
    #[inline]
    pub const fn floored(&self, len: usize) -> usize {
        if len == 0 {
            0
        } else if len < self.min_capacity {
            self.min_capacity
        } else {
            len
        }
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::new(Self::MIN_CAPACITY, Self::GROWTH_FACTOR)
    }
}
