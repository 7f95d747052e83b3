//! Scope resolution: local shadowing and prototype inheritance

use latebind::{VarKind, VarSpace, VarValue};

#[test]
fn local_shadows_global() {
    let mut space = VarSpace::new();
    space.assign_int("$dirwidth", 20).unwrap();
    let local = space.local_assign_int("$dirwidth", 5).unwrap();

    assert_eq!(space.find("dirwidth"), Some(local));
    assert_eq!(space.var_to_string("$dirwidth").unwrap(), "5");
}

#[test]
fn repeated_local_allocation_shadows_not_replaces() {
    let mut space = VarSpace::new();
    let outer = space.local_assign_int("$depth", 1).unwrap();
    let inner = space.local_assign_int("$depth", 2).unwrap();

    assert_ne!(outer, inner);
    assert_eq!(space.find("depth"), Some(inner));

    // The outer local still exists with its own value
    assert_eq!(space.variable(outer).value(), Some(&VarValue::Integer(1)));
}

#[test]
fn global_name_still_reachable_in_its_own_list() {
    let mut space = VarSpace::new();
    space.assign_int("$n", 10).unwrap();
    let global = space.find("n").unwrap();
    space.local_assign_int("$n", 99).unwrap();

    // Ambient search returns the local, but the global is intact
    assert_ne!(space.find("n"), Some(global));
    assert_eq!(space.variable(global).value(), Some(&VarValue::Integer(10)));
}

#[test]
fn prototype_defaults_fill_only_unset_locals() {
    let mut space = VarSpace::new();

    // Prototype component scope: count=7
    space.local_assign_int("$count", 7).unwrap();
    let proto = space.locals();

    // Instance one: count not set before instantiation, inherits 7
    let inherited = space.alloc_local("$count").unwrap();
    space.propagate_prototype_defaults(inherited, &proto);
    assert_eq!(
        space.variable(inherited).value(),
        Some(&VarValue::Integer(7))
    );

    // Instance two: count=3 set before instantiation, override wins
    let overridden = space.local_assign_int("$count", 3).unwrap();
    space.propagate_prototype_defaults(overridden, &proto);
    assert_eq!(
        space.variable(overridden).value(),
        Some(&VarValue::Integer(3))
    );
}

#[test]
fn prototype_propagation_is_scoped_to_supplied_list() {
    let mut space = VarSpace::new();
    space.assign_int("$count", 42).unwrap();

    // The prototype list is empty: the ambient global must not leak in
    let fresh = space.alloc_local("$count").unwrap();
    space.propagate_prototype_defaults(fresh, &[]);
    assert!(!space.variable(fresh).is_set());
}

#[test]
fn local_from_var_reads_ambient_scope() {
    let mut space = VarSpace::new();
    space.assign_str("$fileset", "bigfiles").unwrap();
    let local = space.local_from_var("$myfileset", "$fileset").unwrap();

    assert_eq!(space.variable(local).kind(), VarKind::Local);
    assert_eq!(
        space.variable(local).value(),
        Some(&VarValue::str("bigfiles"))
    );
}

#[test]
fn locals_snapshot_is_newest_first() {
    let mut space = VarSpace::new();
    let a = space.local_assign_int("$a", 1).unwrap();
    let b = space.local_assign_int("$b", 2).unwrap();

    let snapshot = space.locals();
    assert_eq!(snapshot, vec![b, a]);
}
