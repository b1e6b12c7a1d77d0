//! A growable array container with cursor-based generic algorithms.
//!
//! ```
//! use stdlike::{algorithm, array};
//!
//! let mut a = array![3, 4, 1, -1, 0];
//! assert_eq!(a.capacity(), stdlike::Array::<i32>::MIN_CAPACITY);
//!
//! let (begin, end) = a.cursors();
//! // SAFETY: both cursors bound the live range of `a`
//! unsafe { algorithm::sort(begin, end) };
//! assert_eq!(a.as_slice(), &[-1, 0, 1, 3, 4]);
//! ```

pub mod algorithm;

pub use stdlike_alloc::{AllocError, Array, Cursor, GrowthPolicy, OutOfRange};

/// Creates an [`Array`] containing the arguments.
///
/// - `array![a, b, c]` moves the elements in order, capacity raised to the floor. `array![]`
///   is an empty literal and allocates the floor capacity as well.
/// - `array![value; n]` holds `n` copies of `value`.
#[macro_export]
macro_rules! array {
    () => {
        $crate::Array::from([])
    };
    ($elem:expr; $n:expr) => {
        $crate::Array::from_elem($n, $elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::Array::from([$($x),+])
    };
}
