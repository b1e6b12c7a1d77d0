use std::mem;

use stdlike::{algorithm, array, Array, OutOfRange};

/// Can be moved but not cloned or defaulted.
#[derive(Debug)]
struct MoveOnly(Box<u32>);

#[derive(Clone, Debug, PartialEq)]
struct NoDefault {
    i: i32,
}

impl NoDefault {
    fn new(i: i32) -> Self {
        Self { i }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct TwoStrings {
    s1: String,
    s2: String,
    i: usize,
}

impl TwoStrings {
    fn new(s1: impl Into<String>, s2: impl Into<String>, i: usize) -> Self {
        Self {
            s1: s1.into(),
            s2: s2.into(),
            i,
        }
    }
}

#[test]
fn construction() {
    let a = Array::<i32>::new();
    assert_eq!(a.len(), 0);
    assert_eq!(a.capacity(), 0);

    let b = Array::<i32>::with_len(4);
    assert_eq!(b.len(), 4);
    assert_eq!(b.capacity(), Array::<i32>::MIN_CAPACITY);

    let c = array![11; 11];
    assert_eq!(c.len(), 11);
    assert_eq!(c.capacity(), 11);
    for element in &c {
        assert_eq!(*element, 11);
    }

    let empty: Array<i32> = array![];
    assert_eq!(empty.len(), 0);
    assert_eq!(empty.capacity(), Array::<i32>::MIN_CAPACITY);

    let mut d = array![1, 2, 3];
    assert_eq!(d.len(), 3);
    assert_eq!(d.capacity(), Array::<i32>::MIN_CAPACITY);
    assert_eq!(d[0], 1);
    assert_eq!(d[1], 2);
    assert_eq!(d[2], 3);

    let mut e = d.clone();
    {
        let (d_begin, d_end) = d.cursors();
        let (e_begin, e_end) = e.cursors();
        assert!(unsafe { algorithm::equal(d_begin, d_end, e_begin, e_end) });
    }

    let mut f = mem::take(&mut e);
    assert_eq!(e.len(), 0);
    assert_eq!(e.capacity(), 0);
    {
        let (d_begin, d_end) = d.cursors();
        let (f_begin, f_end) = f.cursors();
        assert!(unsafe { algorithm::equal(d_begin, d_end, f_begin, f_end) });
    }

    d.clone_from(&b);
    assert_eq!(d.len(), 4);
    assert_eq!(d.capacity(), Array::<i32>::MIN_CAPACITY);

    let mut b = b;
    let a = b.take();
    assert_eq!(a.len(), 4);
    assert_eq!(a.capacity(), Array::<i32>::MIN_CAPACITY);
    assert_eq!(b.len(), 0);
    assert_eq!(b.capacity(), 0);
}

#[test]
fn checked_access() {
    let mut a = array![2.0_f64, 3.19];
    assert_eq!(a.at(3), Err(OutOfRange { index: 3, len: 2 }));
    assert!(a.at_mut(3).is_err());
    // the failed access leaves the array usable
    *a.at_mut(1).unwrap() += 1.0;
    assert!((a.at(1).unwrap() - 4.19).abs() < 1e-12);

    let err: Box<dyn std::error::Error> = Box::new(a.at(2).unwrap_err());
    assert!(err.to_string().contains("index out of range"));
}

#[test]
fn resize_and_reserve() {
    let mut a = Array::<i32>::new();
    a.resize_default(5);
    assert_eq!(a.len(), 5);
    assert_eq!(a.capacity(), Array::<i32>::MIN_CAPACITY);

    a.resize_default(4);
    a.reserve(9);
    assert_eq!(a.len(), 5);
    assert_eq!(a.capacity(), Array::<i32>::MIN_CAPACITY);

    a.clear();
    assert_eq!(a.len(), 0);
    assert_eq!(a.capacity(), 0);

    a.reserve(11);
    assert_eq!(a.len(), 0);
    assert_eq!(a.capacity(), 11);
    for i in 0..12 {
        a.push(i);
    }
    assert_eq!(a.len(), 12);
    assert_eq!(a.capacity(), 11 * Array::<i32>::GROWTH_FACTOR);
}

#[test]
fn push_back() {
    let mut a = Array::new();
    for i in 0..10_000_usize {
        a.push(i);
    }
    for i in 0..10_000_usize {
        assert_eq!(a[i], i);
    }
}

#[test]
fn emplace_back() {
    let mut a = Array::new();
    let s1 = String::from("I'm a movable string");
    let s2 = String::from("I'm a copyable string");

    a.emplace_with(|| TwoStrings::new(s1, s2.clone(), 0));
    assert!(!s2.is_empty());
    {
        let obj = &a[0];
        assert_eq!(obj.s1, "I'm a movable string");
        assert_eq!(obj.s2, "I'm a copyable string");
        assert_eq!(obj.i, 0);
    }

    a.clear();

    for i in 0..10_000 {
        a.emplace_with(|| TwoStrings::new("a", "aa", i));
    }
    for i in 0..10_000 {
        let obj = &a[i];
        assert_eq!(obj.s1, "a");
        assert_eq!(obj.s2, "aa");
        assert_eq!(obj.i, i);
    }
}

#[test]
fn cursors_drive_algorithms() {
    let mut a = array![3, 4, 1, -1, 0];
    let mut v = vec![3, 4, 1, -1, 0];

    let (begin, end) = a.cursors();
    unsafe { algorithm::sort(begin, end) };
    v.sort();
    assert_eq!(a.as_slice(), v.as_slice());

    let (begin, end) = a.cursors();
    let (max, min) = unsafe {
        (
            *algorithm::max_element(begin, end).as_ref(),
            *algorithm::min_element(begin, end).as_ref(),
        )
    };
    assert_eq!(Some(&max), v.iter().max());
    assert_eq!(Some(&min), v.iter().min());
}

#[test]
fn cursor_traversal_matches_indexing() {
    let mut a: Array<usize> = (0..50).collect();
    let (mut cursor, end) = a.cursors();
    let mut expected = 0;
    while cursor != end {
        assert_eq!(unsafe { *cursor.as_ref() }, expected);
        cursor += 1;
        expected += 1;
    }
    assert_eq!(expected, 50);

    let (begin, end) = a.cursors();
    assert_eq!(end - begin, 50);
    assert_eq!(unsafe { *(end - 1).as_ref() }, 49);
    assert_eq!(unsafe { *begin.at(10) }, 10);
}

#[test]
fn compare() {
    let a = array![0, 3, 2, -6];
    let mut b = a.clone();
    assert_eq!(b, a);

    let (begin, end) = b.cursors();
    unsafe { algorithm::sort(begin, end) };
    assert_ne!(b, a);
    assert_ne!(a, array![0, 3, 2]);
}

#[test]
fn move_only() {
    let mut a = Array::new();
    a.push(MoveOnly(Box::new(1)));
    a.emplace_with(|| MoveOnly(Box::new(2)));

    let mut a2 = Array::from_elem_with(5, || MoveOnly(Box::new(0)));
    assert_eq!(a2.len(), 5);
    a2 = mem::take(&mut a);
    assert_eq!(a.len(), 0);
    assert_eq!(a2.len(), 2);

    let mut next = 10;
    a2.resize_with(40, || {
        next += 1;
        MoveOnly(Box::new(next))
    });
    assert_eq!(a2.len(), 40);
    assert_eq!(*a2[0].0, 1);
    assert_eq!(*a2[1].0, 2);
    assert_eq!(*a2[39].0, 48);
}

#[test]
fn non_default_construction() {
    let mut a = Array::from_elem(1, NoDefault::new(5));
    {
        let a2 = array![NoDefault::new(1)];
        assert_eq!(a2.capacity(), Array::<NoDefault>::MIN_CAPACITY);
    }

    a.push(NoDefault::new(6));
    a.emplace_with(|| NoDefault::new(8));

    let o = NoDefault::new(10);
    a.resize(15, o.clone());
    a.resize(18, o);
    assert_eq!(a.len(), 18);
    assert!(a[3..].iter().all(|x| x.i == 10));

    a.reserve(50);
    assert_eq!(a.capacity(), 50);
    {
        let a2 = a.clone();
        assert_eq!(a2, a);
        assert_eq!(a2.capacity(), 50);
    }

    a.clear();
    for i in 0..10_000 {
        a.push(NoDefault::new(i));
    }
    for i in 0..10_000 {
        assert_eq!(a[i as usize].i, i);
    }
}

#[test]
fn default_strings_fill() {
    let a = Array::<TwoStrings>::with_len(3);
    assert!(a.iter().all(|x| *x == TwoStrings::default()));
}
