//! Slot storage for [`Array`](crate::Array).
//!
//! Reserving memory and constructing values in it are separate steps here. A `RawBuf` only ever
//! hands out raw slots; which of them hold live values is tracked by the owner.

use core::{alloc::Layout, marker::PhantomData, mem, ptr, ptr::NonNull};
use std::alloc;

use bytesize::ByteSize;
use log::error;

use crate::error::AllocError;

/// Returns the layout of a block holding `capacity` slots of `T`.
fn slot_layout<T>(capacity: usize) -> Result<Layout, AllocError> {
    Layout::array::<T>(capacity).map_err(|_| AllocError::CapacityOverflow)
}

/// Allocates an uninitialized block of `capacity` slots.
///
/// Zero-sized types and zero capacities never touch the allocator.
fn allocate<T>(capacity: usize) -> Result<NonNull<T>, AllocError> {
    let layout = slot_layout::<T>(capacity)?;
    if layout.size() == 0 {
        return Ok(NonNull::dangling());
    }

    // SAFETY: layout has non-zero size
    let ptr = unsafe { alloc::alloc(layout) };
    match NonNull::new(ptr) {
        Some(ptr) => Ok(ptr.cast()),
        None => {
            error!(
                "failed to allocate {} slots: {}",
                capacity,
                ByteSize::b(layout.size() as u64).to_string_as(true)
            );
            Err(AllocError::OutOfMemory {
                bytes: layout.size(),
            })
        }
    }
}

/// Frees a block returned by [`allocate`]. Does not drop anything stored in it.
///
/// ## Safety
/// - `ptr` must have come from `allocate::<T>(capacity)` and not have been freed yet.
unsafe fn deallocate<T>(ptr: NonNull<T>, capacity: usize) {
    let size = mem::size_of::<T>() * capacity;
    if size != 0 {
        let layout = Layout::from_size_align_unchecked(size, mem::align_of::<T>());
        alloc::dealloc(ptr.as_ptr().cast(), layout);
    }
}

/// Turns an allocation failure into the fatal failure of an infallible operation.
pub(crate) fn fatal<T>(err: AllocError, capacity: usize) -> ! {
    match err {
        AllocError::CapacityOverflow => panic!("capacity overflow"),
        AllocError::OutOfMemory { .. } => match slot_layout::<T>(capacity) {
            Ok(layout) => alloc::handle_alloc_error(layout),
            Err(_) => panic!("capacity overflow"),
        },
    }
}

/// An owned block of `capacity` slots that may or may not hold values.
///
/// The pointer is `None` iff the capacity is zero. Dropping a `RawBuf` frees the block
/// without running any destructors.
pub(crate) struct RawBuf<T> {
    ptr: Option<NonNull<T>>,
    cap: usize,
    _marker: PhantomData<T>,
}

impl<T> RawBuf<T> {
    pub const fn new() -> Self {
        Self {
            ptr: None,
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Reserves exactly `capacity` uninitialized slots.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the block size overflows or the allocator is exhausted.
    pub fn with_capacity(capacity: usize) -> Result<Self, AllocError> {
        if capacity == 0 {
            return Ok(Self::new());
        }
        Ok(Self {
            ptr: Some(allocate::<T>(capacity)?),
            cap: capacity,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.ptr.is_some()
    }

    /// Returns a pointer to the first slot, dangling if nothing is allocated.
    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.unwrap_or(NonNull::dangling()).as_ptr()
    }

    /// Places `value` into slot `index`.
    ///
    /// ## Safety
    /// - `index` must be below the capacity.
    /// - The slot must not hold a live value (it would be leaked).
    #[inline]
    pub unsafe fn construct(&mut self, index: usize, value: T) {
        debug_assert!(index < self.cap);
        ptr::write(self.as_ptr().add(index), value);
    }

    /// Drops the values in slots `[0, count)` in place. The slots become raw again.
    ///
    /// ## Safety
    /// - Every slot in `[0, count)` must hold a live value.
    pub unsafe fn destroy(&mut self, count: usize) {
        debug_assert!(count <= self.cap);
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_ptr(), count));
    }

    /// Moves the values in slots `[0, len)` into a new block of `capacity` slots and frees
    /// the old block.
    ///
    /// If this fails, the old block and its values are left untouched.
    ///
    /// ## Safety
    /// - Every slot in `[0, len)` must hold a live value.
    /// - `len` must not exceed `capacity`.
    pub unsafe fn relocate(&mut self, capacity: usize, len: usize) -> Result<(), AllocError> {
        debug_assert!(len <= self.cap && len <= capacity);
        let new = allocate::<T>(capacity)?;
        if let Some(old) = self.ptr {
            ptr::copy_nonoverlapping(old.as_ptr(), new.as_ptr(), len);
            deallocate(old, self.cap);
        }
        self.ptr = Some(new);
        self.cap = capacity;
        Ok(())
    }

    /// Frees the block. The buffer goes back to holding no slots.
    ///
    /// ## Safety
    /// - No slot may still hold a live value (it would be leaked).
    pub unsafe fn release(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            deallocate(ptr, self.cap);
        }
        self.cap = 0;
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        // SAFETY: the owner destroys live values before the buffer goes away
        unsafe { self.release() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_unallocated() {
        let buf = RawBuf::<u64>::with_capacity(0).unwrap();
        assert!(!buf.is_allocated());
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn zero_sized_types_get_a_dangling_block() {
        let buf = RawBuf::<()>::with_capacity(16).unwrap();
        assert!(buf.is_allocated());
        assert_eq!(buf.capacity(), 16);
    }

    #[test]
    fn oversized_request_is_capacity_overflow() {
        let result = RawBuf::<u64>::with_capacity(usize::MAX);
        assert_eq!(result.err(), Some(AllocError::CapacityOverflow));
    }

    #[test]
    fn relocate_moves_values() {
        let mut buf = RawBuf::<String>::with_capacity(2).unwrap();
        unsafe {
            buf.construct(0, "a".to_owned());
            buf.construct(1, "b".to_owned());
            buf.relocate(8, 2).unwrap();
            assert_eq!(buf.capacity(), 8);
            assert_eq!(&*buf.as_ptr(), "a");
            assert_eq!(&*buf.as_ptr().add(1), "b");
            buf.destroy(2);
        }
    }
}
