//! Delayed-binding behavior: descriptors always read the live variable state

use latebind::{attr, AllocError, AttrValue, BindError, VarSpace};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn read_after_write_through_indirection() {
    init_logs();
    let mut space = VarSpace::new();
    space.assign_int("$iosize", 4096).unwrap();
    let iosize = space.ref_attr("$iosize").unwrap();

    assert_eq!(iosize.get_int(&space), 4096);

    // A later `set` command is observed through the existing descriptor
    space.assign_int("$iosize", 1048576).unwrap();
    assert_eq!(iosize.get_int(&space), 1048576);
    assert_eq!(iosize.get_dbl(&space), 1048576.0);
}

#[test]
fn string_round_trip() {
    let mut space = VarSpace::new();
    space.assign_str("$s", "hello").unwrap();

    let avd = space.ref_attr("$s").unwrap();
    assert_eq!(avd.get_str(&space).as_deref(), Some("hello"));
    assert_eq!(space.var_to_string("$s").unwrap(), "hello");
}

#[test]
fn literal_descriptors_return_constructed_values() {
    let mut space = VarSpace::new();

    assert_eq!(AttrValue::literal_int(8192).get_int(&space), 8192);
    assert_eq!(AttrValue::literal_int(8192).get_dbl(&space), 8192.0);
    assert!(AttrValue::literal_bool(true).get_bool(&space));
    assert_eq!(AttrValue::literal_double(0.75).get_dbl(&space), 0.75);

    let s = AttrValue::literal_str(&mut space, "tmpfile").unwrap();
    assert_eq!(s.get_str(&space).as_deref(), Some("tmpfile"));

    // Mismatched accessors read the documented zero value, never crash
    assert_eq!(s.get_int(&space), 0);
    assert_eq!(s.get_dbl(&space), 0.0);
    assert!(!s.get_bool(&space));
    assert!(AttrValue::literal_int(5).get_str(&space).is_none());
}

#[test]
fn integer_descriptors_coerce_to_bool() {
    let mut space = VarSpace::new();
    space.assign_int("$flag", 1).unwrap();
    let flag = space.ref_attr("$flag").unwrap();

    assert!(flag.get_bool(&space));
    space.assign_int("$flag", 0).unwrap();
    assert!(!flag.get_bool(&space));
}

#[test]
fn reference_before_set_reads_zero_then_binds_fresh() {
    let mut space = VarSpace::new();

    // Referencing an undeclared name is legal: it creates the variable,
    // but the descriptor cannot be typed yet
    let early = space.ref_attr("$nfiles");
    assert!(early.is_none());
    assert_eq!(attr::get_int(&space, early.as_ref()), 0);

    space.assign_int("$nfiles", 50000).unwrap();
    let bound = space.ref_attr("$nfiles");
    assert_eq!(attr::get_int(&space, bound.as_ref()), 50000);
}

#[test]
fn descriptor_with_stale_slot_kind_reads_zero() {
    let mut space = VarSpace::new();
    space.assign_int("$mode", 2).unwrap();
    let as_int = space.ref_attr("$mode").unwrap();

    // Overwriting the payload with a different kind leaves the old
    // descriptor reading the type's zero value
    space.assign_str("$mode", "append").unwrap();
    assert_eq!(as_int.get_int(&space), 0);
}

#[test]
fn copy_value_transfers_payload() {
    let mut space = VarSpace::new();
    space.assign_str("$proto", "template").unwrap();
    space.assign_int("$inst", 0).unwrap();

    let src = space.find("proto").unwrap();
    let dst = space.find("inst").unwrap();
    space.copy_value(dst, src).unwrap();

    assert_eq!(space.var_to_string("$inst").unwrap(), "template");
}

#[test]
fn exhausted_arena_degrades_string_literals() {
    init_logs();
    let mut space = VarSpace::with_capacity(0);
    let result = AttrValue::literal_str(&mut space, "no room");
    assert_eq!(result, Err(AllocError::Exhausted("strings")));
}

#[test]
fn exhausted_arena_fails_assignment_with_alloc_error() {
    let mut space = VarSpace::with_capacity(0);
    let err = space.assign_int("$x", 1).unwrap_err();
    assert!(matches!(err, BindError::Alloc(_)));
}

#[test]
fn integer_rendering_is_plain_decimal() {
    let mut space = VarSpace::new();
    space.assign_int("$big", 1000000).unwrap();
    assert_eq!(space.var_to_string("$big").unwrap(), "1000000");
}
