use core::{
    cmp::Ordering,
    fmt,
    marker::PhantomData,
    ops::{Add, AddAssign, Sub, SubAssign},
    ptr,
};

use num_traits::PrimInt;

fn to_offset<I: PrimInt>(n: I) -> isize {
    match n.to_isize() {
        Some(offset) => offset,
        None => panic!("cursor offset does not fit in isize"),
    }
}

/// A random-access position inside an [`Array`](crate::Array).
///
/// A `Cursor` is a position, not a reference: moving it anywhere is safe, reading or writing
/// through it is not. It holds the base of the array's buffer plus a signed element index, so
/// cursors into zero-sized element types still measure distances correctly.
///
/// Cursors borrow the array mutably for `'a`. Growth relocates the buffer, and the borrow makes
/// the compiler reject any growth while a cursor is alive.
///
/// Nothing is bounds checked. Dereferencing a cursor outside `[begin, end)` is undefined behavior.
pub struct Cursor<'a, T> {
    base: *mut T,
    pos: isize,
    _marker: PhantomData<&'a mut [T]>,
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(base: *mut T, pos: usize) -> Self {
        Self {
            base,
            pos: pos as isize,
            _marker: PhantomData,
        }
    }

    /// Returns the element index this cursor points at.
    #[inline]
    pub fn position(self) -> isize {
        self.pos
    }

    /// Returns the address of the element this cursor points at.
    #[inline]
    pub fn as_ptr(self) -> *mut T {
        self.base.wrapping_offset(self.pos)
    }

    /// Returns `true` if both cursors were taken from the same buffer.
    #[inline]
    pub fn same_buffer(self, other: Self) -> bool {
        ptr::eq(self.base, other.base)
    }
}

// pointer arithmetic
impl<T> Cursor<'_, T> {
    /// Returns a cursor `n` elements away.
    #[inline]
    pub fn offset(self, n: isize) -> Self {
        Self {
            pos: self.pos.wrapping_add(n),
            ..self
        }
    }

    /// Returns the signed number of elements from `origin` to `self`.
    #[inline]
    pub fn distance_from(self, origin: Self) -> isize {
        debug_assert!(self.same_buffer(origin));
        self.pos.wrapping_sub(origin.pos)
    }

    /// Advances one element and returns the moved cursor.
    #[inline]
    pub fn inc(&mut self) -> &mut Self {
        self.pos = self.pos.wrapping_add(1);
        self
    }

    /// Steps back one element and returns the moved cursor.
    #[inline]
    pub fn dec(&mut self) -> &mut Self {
        self.pos = self.pos.wrapping_sub(1);
        self
    }

    /// Advances one element and returns the position from before the move.
    #[inline]
    pub fn post_inc(&mut self) -> Self {
        let old = *self;
        self.inc();
        old
    }

    /// Steps back one element and returns the position from before the move.
    #[inline]
    pub fn post_dec(&mut self) -> Self {
        let old = *self;
        self.dec();
        old
    }
}

// read
impl<'a, T> Cursor<'a, T> {
    /// Returns a shared reference to the current element.
    ///
    /// ## Safety
    /// - The cursor must point at a live element of its array.
    /// - No mutable reference to that element may exist for the returned lifetime.
    #[inline]
    pub unsafe fn as_ref(self) -> &'a T {
        &*self.as_ptr()
    }

    /// Returns a shared reference to the element `n` positions away.
    ///
    /// ## Safety
    /// Same as [`as_ref`](Self::as_ref), for the element at `self + n`.
    #[inline]
    pub unsafe fn at(self, n: isize) -> &'a T {
        self.offset(n).as_ref()
    }

    /// Moves the current element out bitwise, leaving the slot logically uninitialized.
    ///
    /// ## Safety
    /// - The cursor must point at a live element of its array.
    /// - The slot must be refilled with [`write`](Self::write) before the array is used again.
    #[inline]
    pub unsafe fn read(self) -> T {
        ptr::read(self.as_ptr())
    }
}

// write
impl<'a, T> Cursor<'a, T> {
    /// Returns a mutable reference to the current element.
    ///
    /// ## Safety
    /// - The cursor must point at a live element of its array.
    /// - No other reference to that element may exist for the returned lifetime.
    #[inline]
    pub unsafe fn as_mut(self) -> &'a mut T {
        &mut *self.as_ptr()
    }

    /// Returns a mutable reference to the element `n` positions away.
    ///
    /// ## Safety
    /// Same as [`as_mut`](Self::as_mut), for the element at `self + n`.
    #[inline]
    pub unsafe fn at_mut(self, n: isize) -> &'a mut T {
        self.offset(n).as_mut()
    }

    /// Overwrites the current slot without dropping what was there.
    ///
    /// ## Safety
    /// - The cursor must point inside its array's live range.
    /// - The slot must have been emptied with [`read`](Self::read), or its value is leaked.
    #[inline]
    pub unsafe fn write(self, value: T) {
        ptr::write(self.as_ptr(), value);
    }

    /// Puts `value` in the current slot and returns the old element.
    ///
    /// ## Safety
    /// - The cursor must point at a live element of its array.
    #[inline]
    pub unsafe fn replace(self, value: T) -> T {
        ptr::replace(self.as_ptr(), value)
    }

    /// Exchanges the elements under two cursors. They may point at the same element.
    ///
    /// ## Safety
    /// - Both cursors must point at live elements of their arrays.
    #[inline]
    pub unsafe fn swap(self, with: Self) {
        ptr::swap(self.as_ptr(), with.as_ptr());
    }
}

impl<T, I: PrimInt> Add<I> for Cursor<'_, T> {
    type Output = Self;

    #[inline]
    fn add(self, n: I) -> Self {
        self.offset(to_offset(n))
    }
}

impl<T, I: PrimInt> Sub<I> for Cursor<'_, T> {
    type Output = Self;

    #[inline]
    fn sub(self, n: I) -> Self {
        self.offset(to_offset(n).wrapping_neg())
    }
}

impl<T, I: PrimInt> AddAssign<I> for Cursor<'_, T> {
    #[inline]
    fn add_assign(&mut self, n: I) {
        *self = *self + n;
    }
}

impl<T, I: PrimInt> SubAssign<I> for Cursor<'_, T> {
    #[inline]
    fn sub_assign(&mut self, n: I) {
        *self = *self - n;
    }
}

impl<'a, T> Sub<Cursor<'a, T>> for Cursor<'a, T> {
    type Output = isize;

    #[inline]
    fn sub(self, origin: Cursor<'a, T>) -> isize {
        self.distance_from(origin)
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.same_buffer(*other) && self.pos == other.pos
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Cursor<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.base as usize)
            .cmp(&(other.base as usize))
            .then(self.pos.cmp(&other.pos))
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("base", &self.base)
            .field("pos", &self.pos)
            .finish()
    }
}
