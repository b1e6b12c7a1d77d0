use core::{
    fmt, mem,
    ops::{Deref, DerefMut, Index, IndexMut},
    slice::{self, SliceIndex},
};

use bytesize::ByteSize;
use log::{debug, trace};

use crate::{
    config::GrowthPolicy,
    error::{AllocError, OutOfRange},
    ptr::Cursor,
    raw::{self, RawBuf},
};

/// A contiguous growable array type, written as `Array<T>`.
///
/// Slots `[0, len)` hold live values and slots `[len, capacity)` are raw memory. Appending to a
/// full array relocates every element into a buffer `growth_factor` times larger (never smaller
/// than `min_capacity`), which keeps [`push`](Self::push) amortized O(1).
///
/// Growth moves the buffer. Every reference and [`Cursor`] obtained before it is invalidated,
/// which the borrow checker enforces since both borrow the array.
///
/// The array only gets smaller through [`clear`](Self::clear), which destroys every element and
/// gives the buffer back.
pub struct Array<T> {
    buf: RawBuf<T>,
    len: usize,
    policy: GrowthPolicy,
}

// SAFETY: the array owns its elements like a `Box<[T]>` would
unsafe impl<T: Send> Send for Array<T> {}
unsafe impl<T: Sync> Sync for Array<T> {}

impl<T> Array<T> {
    /// Floor capacity of the default growth policy.
    pub const MIN_CAPACITY: usize = GrowthPolicy::MIN_CAPACITY;

    /// Growth factor of the default growth policy.
    pub const GROWTH_FACTOR: usize = GrowthPolicy::GROWTH_FACTOR;

    /// Constructs a new, empty `Array<T>`. Does not allocate.
    pub const fn new() -> Self {
        Self::with_policy(GrowthPolicy::new(Self::MIN_CAPACITY, Self::GROWTH_FACTOR))
    }

    /// Constructs a new, empty `Array<T>` that grows according to `policy`.
    pub const fn with_policy(policy: GrowthPolicy) -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
            policy,
        }
    }

    /// Constructs an array of `len` default values.
    ///
    /// The capacity is `len` raised to the policy floor, or zero when `len` is zero.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::from_elem_with(len, T::default)
    }

    /// Constructs an array of `len` elements equal to `value`.
    ///
    /// The first `len - 1` elements are clones and `value` itself is moved into the last slot.
    /// If `len` is zero, `value` is dropped.
    pub fn from_elem(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut array = Self::new();
        array.allocate_exact(array.policy.floored(len));
        array.fill(len, value);
        array
    }

    /// Constructs an array of `len` elements, each returned by a call to `f`.
    pub fn from_elem_with<F>(len: usize, f: F) -> Self
    where
        F: FnMut() -> T,
    {
        let mut array = Self::new();
        array.allocate_exact(array.policy.floored(len));
        array.fill_with(len, f);
        array
    }

    /// Moves everything out of `self` into a new array, leaving `self` empty and unallocated.
    ///
    /// This is O(1): the buffer changes hands, no element is touched.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::with_policy(self.policy))
    }

    /// Returns the growth policy this array was built with.
    #[inline]
    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the buffer, live or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are live, the pointer is non-null and aligned even when unallocated
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: see `as_slice`
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_ptr()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `index` is not below [`len`](Self::len). The array is left untouched.
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        let len = self.len;
        self.as_slice().get(index).ok_or(OutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `index` is not below [`len`](Self::len). The array is left untouched.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(OutOfRange { index, len })
    }

    /// Returns a reference to the element at `index` without a bounds check.
    ///
    /// ## Safety
    /// - `index` must be below [`len`](Self::len).
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        &*self.buf.as_ptr().add(index)
    }

    /// Returns a mutable reference to the element at `index` without a bounds check.
    ///
    /// ## Safety
    /// - `index` must be below [`len`](Self::len).
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        &mut *self.buf.as_ptr().add(index)
    }

    /// Appends `value` to the back of the array.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    pub fn push(&mut self, value: T) {
        self.grow_for(1);
        // SAFETY: grow_for made room for slot `len`, which is raw
        unsafe { self.buf.construct(self.len, value) };
        self.len += 1;
    }

    /// Appends the value built by `f` and returns a reference to it.
    ///
    /// Any growth happens before `f` runs, and the value goes straight into its slot. `T` needs
    /// neither `Default` nor `Clone`.
    pub fn emplace_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.grow_for(1);
        let index = self.len;
        // SAFETY: grow_for made room for slot `len`, which is raw
        unsafe {
            self.buf.construct(index, f());
            self.len += 1;
            self.get_unchecked_mut(index)
        }
    }

    /// Destroys every element and frees the buffer. The capacity goes back to zero.
    pub fn clear(&mut self) {
        if !self.buf.is_allocated() {
            return;
        }
        debug!(
            "clearing array of {} elements, releasing {} slots",
            self.len,
            self.capacity()
        );
        let len = mem::replace(&mut self.len, 0);
        // SAFETY: slots [0, len) were live and len is already zero if a destructor panics
        unsafe {
            self.buf.destroy(len);
            self.buf.release();
        }
    }

    /// Grows the array to `new_len` elements built by [`Default`].
    ///
    /// Does nothing if `new_len` is not larger than [`len`](Self::len): this never shrinks.
    pub fn resize_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Grows the array to `new_len` elements by appending copies of `value`.
    ///
    /// The last new slot receives `value` itself, the others get clones. Does nothing (and
    /// drops `value`) if `new_len` is not larger than [`len`](Self::len).
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        if new_len <= self.len {
            return;
        }
        self.grow_for(new_len - self.len);
        self.fill(new_len, value);
    }

    /// Grows the array to `new_len` elements, each returned by a call to `f`.
    ///
    /// Does nothing if `new_len` is not larger than [`len`](Self::len).
    pub fn resize_with<F>(&mut self, new_len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            return;
        }
        self.grow_for(new_len - self.len);
        self.fill_with(new_len, f);
    }

    /// Makes the capacity at least `capacity` slots.
    ///
    /// Does nothing if the capacity is already large enough, otherwise relocates to exactly
    /// `capacity` slots raised to the policy floor.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    pub fn reserve(&mut self, capacity: usize) {
        if let Err(err) = self.try_reserve(capacity) {
            raw::fatal::<T>(err, capacity.max(self.policy.min_capacity()));
        }
    }

    /// Fallible version of [`reserve`](Self::reserve).
    ///
    /// # Errors
    ///
    /// Returns `Err` if the new capacity overflows or the allocator is exhausted. The array is
    /// left untouched in that case.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), AllocError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        self.relocate(capacity.max(self.policy.min_capacity()))
    }

    /// Returns cursors to the first element and one past the last element.
    ///
    /// The array stays borrowed while either cursor is in use, so it cannot grow under them:
    ///
    /// ```compile_fail
    /// let mut array = stdlike_alloc::Array::from([1, 2, 3]);
    /// let (begin, end) = array.cursors();
    /// array.push(4);
    /// assert_eq!(end - begin, 3);
    /// ```
    pub fn cursors(&mut self) -> (Cursor<'_, T>, Cursor<'_, T>) {
        let base = self.buf.as_ptr();
        (Cursor::new(base, 0), Cursor::new(base, self.len))
    }

    /// Returns a cursor to the first element.
    #[inline]
    pub fn begin(&mut self) -> Cursor<'_, T> {
        Cursor::new(self.buf.as_ptr(), 0)
    }

    /// Returns a cursor one past the last element.
    #[inline]
    pub fn end(&mut self) -> Cursor<'_, T> {
        Cursor::new(self.buf.as_ptr(), self.len)
    }

    /// Makes room for `additional` more elements, growing by the policy if needed.
    fn grow_for(&mut self, additional: usize) {
        let required = match self.len.checked_add(additional) {
            Some(required) => required,
            None => raw::fatal::<T>(AllocError::CapacityOverflow, usize::MAX),
        };
        if required <= self.capacity() {
            return;
        }
        let capacity = required.max(self.policy.grown(self.capacity()));
        if let Err(err) = self.relocate(capacity) {
            raw::fatal::<T>(err, capacity);
        }
    }

    /// Allocates exactly `capacity` slots for an array that has none yet.
    fn allocate_exact(&mut self, capacity: usize) {
        debug_assert!(!self.buf.is_allocated());
        match RawBuf::with_capacity(capacity) {
            Ok(buf) => self.buf = buf,
            Err(err) => raw::fatal::<T>(err, capacity),
        }
    }

    /// Moves the live elements into a buffer of exactly `capacity` slots.
    fn relocate(&mut self, capacity: usize) -> Result<(), AllocError> {
        trace!(
            "relocating array of {} elements: {} -> {} slots ({})",
            self.len,
            self.capacity(),
            capacity,
            ByteSize::b(capacity.saturating_mul(mem::size_of::<T>()) as u64).to_string_as(true)
        );
        // SAFETY: slots [0, len) are live and len <= capacity
        unsafe { self.buf.relocate(capacity, self.len) }
    }

    /// Appends clones of `value` up to `new_len - 1`, then `value` itself.
    ///
    /// The capacity must already hold `new_len` elements.
    fn fill(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        if new_len <= self.len {
            return;
        }
        debug_assert!(new_len <= self.capacity());
        // SAFETY: slots [len, new_len) are raw and in bounds, len tracks each write
        unsafe {
            while self.len + 1 < new_len {
                self.buf.construct(self.len, value.clone());
                self.len += 1;
            }
            self.buf.construct(self.len, value);
        }
        self.len += 1;
    }

    /// Appends values from `f` up to `new_len`. The capacity must already hold `new_len` elements.
    fn fill_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        debug_assert!(new_len <= self.capacity());
        while self.len < new_len {
            // SAFETY: slot `len` is raw and in bounds
            unsafe { self.buf.construct(self.len, f()) };
            self.len += 1;
        }
    }
}

impl<T> Drop for Array<T> {
    fn drop(&mut self) {
        // SAFETY: slots [0, len) are live, the buffer frees itself afterwards
        unsafe { self.buf.destroy(self.len) }
    }
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Array<T> {
    /// Copies every element into a new buffer with the same capacity.
    fn clone(&self) -> Self {
        let mut array = Self::with_policy(self.policy);
        array.allocate_exact(self.capacity());
        array.extend_cloned(self.as_slice());
        array
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.policy = source.policy;
        self.allocate_exact(source.capacity());
        self.extend_cloned(source.as_slice());
    }
}

impl<T: Clone> Array<T> {
    fn extend_cloned(&mut self, values: &[T]) {
        debug_assert!(self.len + values.len() <= self.capacity());
        for value in values {
            // SAFETY: the caller allocated room for every value
            unsafe { self.buf.construct(self.len, value.clone()) };
            self.len += 1;
        }
    }
}

impl<T> Deref for Array<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Array<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for Array<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for Array<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T, U> PartialEq<Array<U>> for Array<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Array<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Array<T> {}

impl<T: fmt::Debug> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const N: usize> From<[T; N]> for Array<T> {
    /// Moves the elements in order. The capacity is `N` raised to the policy floor, so even an
    /// empty literal allocates the floor capacity.
    fn from(values: [T; N]) -> Self {
        let mut array = Self::new();
        array.allocate_exact(N.max(array.policy.min_capacity()));
        for value in values {
            // SAFETY: room for N elements was allocated above
            unsafe { array.buf.construct(array.len, value) };
            array.len += 1;
        }
        array
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T> Extend<T> for Array<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if lower > 0 {
            self.grow_for(lower);
        }
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Array<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
