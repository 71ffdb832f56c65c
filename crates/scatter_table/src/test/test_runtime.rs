// Runtime context: root list, strings, userdata, options
use crate::test::int;
use crate::*;
use std::rc::Rc;

#[test]
fn test_root_list_newest_first() {
    let mut rt = Runtime::default();
    let a = rt.new_table(0).unwrap();
    let b = rt.new_table(0).unwrap();
    let c = rt.new_table(0).unwrap();

    let live = rt.live_tables();
    assert_eq!(live.len(), 3);
    assert!(Rc::ptr_eq(&live[0], &c));
    assert!(Rc::ptr_eq(&live[1], &b));
    assert!(Rc::ptr_eq(&live[2], &a));
    drop(live);

    assert!(rt.free_table(b));
    assert_eq!(rt.live_tables().len(), 2);

    // still referenced elsewhere: not released
    let alias = a.clone();
    assert!(!rt.free_table(a));
    assert_eq!(rt.live_tables().len(), 2);
    drop(alias);
    assert_eq!(rt.sweep_roots(), 1);
    assert_eq!(rt.live_tables().len(), 1);
    drop(c);
}

#[test]
fn test_unregistered_table() {
    let rt = Runtime::default();
    let t = LuaTable::new(&rt, 4).unwrap();
    assert!(rt.live_tables().is_empty());
    assert_eq!(rt.nblocks(), gcsize(t.size()));
}

#[test]
fn test_free_table_releases_blocks() {
    let mut rt = Runtime::default();
    let t = rt.new_table(100).unwrap();
    let size = t.borrow().size();
    assert_eq!(rt.nblocks(), gcsize(size));

    assert!(rt.free_table(t));
    assert_eq!(rt.nblocks(), 0);
}

#[test]
fn test_strings_are_interned() {
    let mut rt = Runtime::default();
    let a = rt.new_string("hello");
    let b = rt.new_string("hello");
    let c = rt.new_string("world");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.key_hash(), b.key_hash());
    assert_eq!(rt.strings().len(), 2);

    drop(c);
    assert_eq!(rt.strings_mut().remove_dead(), 1);
    assert_eq!(rt.strings().len(), 1);
}

#[test]
fn test_userdata_identity() {
    let mut rt = Runtime::default();
    let u1 = rt.new_userdata(Box::new(String::from("file")), 5);
    let u2 = rt.new_userdata(Box::new(String::from("file")), 5);

    assert_ne!(u1, u2);
    let ud = u1.as_userdata().unwrap();
    assert_eq!(ud.tag(), 5);
    assert_eq!(ud.downcast_ref::<String>().map(String::as_str), Some("file"));
    assert!(ud.downcast_ref::<u32>().is_none());
}

#[test]
fn test_gcsize() {
    assert_eq!(gcsize(0), 1);
    assert_eq!(gcsize(15), 1);
    assert_eq!(gcsize(16), 2);
    assert_eq!(gcsize(197), 13);
}

#[test]
fn test_prime_dimension() {
    let dim = PrimeDimension;
    assert_eq!(dim.redimension(0), Ok(3));
    assert_eq!(dim.redimension(3), Ok(3));
    assert_eq!(dim.redimension(4), Ok(5));
    assert_eq!(dim.redimension(12), Ok(23));
    assert_eq!(dim.redimension(2147483647), Ok(2147483647));
    assert_eq!(dim.redimension(usize::MAX), Err(TableError::AllocationFailure));

    let mut last = 0;
    for n in 0..2000 {
        let d = dim.redimension(n).unwrap();
        assert!(d >= n && d >= last);
        last = d;
    }
}

#[test]
fn test_power_of_two_dimension() {
    let dim = PowerOfTwoDimension;
    assert_eq!(dim.redimension(0), Ok(1));
    assert_eq!(dim.redimension(1), Ok(1));
    assert_eq!(dim.redimension(5), Ok(8));
    assert_eq!(dim.redimension(64), Ok(64));
    assert_eq!(dim.redimension(usize::MAX), Err(TableError::AllocationFailure));
}

#[test]
fn test_option_defaults() {
    let option = RuntimeOption::default();
    assert_eq!(option.dimension, DimensionPolicy::Primes);
    assert_eq!(option.max_table_size, runtime::lua_limits::MAX_TABLE_SIZE);
    assert!(!option.check_invariants);
}

#[test]
fn test_checked_runtime() {
    let rt = Runtime::new(RuntimeOption {
        check_invariants: true,
        ..RuntimeOption::default()
    });
    assert!(rt.option().check_invariants);
    let mut t = LuaTable::new(&rt, 0).unwrap();
    for i in 0..50 {
        t.set_int(i * 11, int(i)).unwrap();
    }
    assert_eq!(t.len(), 50);
}

#[test]
fn test_error_display() {
    assert_eq!(
        TableError::UnexpectedKeyType.to_string(),
        "unexpected type to index table"
    );
    assert_eq!(TableError::AllocationFailure.to_string(), "not enough memory");
}

#[test]
fn test_block_counter_balances() {
    let global = GlobalState::new(&RuntimeOption::default());
    global.charge(40);
    global.charge(3);
    global.release(40);
    assert_eq!(global.nblocks(), gcsize(3));
    global.release(3);
    assert_eq!(global.nblocks(), 0);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "never charged")]
fn test_release_without_charge_panics() {
    let global = GlobalState::new(&RuntimeOption::default());
    global.charge(3);
    global.release(40);
}

#[cfg(feature = "serde")]
#[test]
fn test_option_from_json() {
    let option = RuntimeOption::from_json(r#"{"dimension": "power_of_two", "max_table_size": 1024}"#)
        .unwrap();
    assert_eq!(option.dimension, DimensionPolicy::PowerOfTwo);
    assert_eq!(option.max_table_size, 1024);
    assert!(!option.check_invariants);
}
