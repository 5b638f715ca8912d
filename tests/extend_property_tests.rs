use std::collections::BTreeMap;

use cim_capability::{extend, Behavior, Module, Value};
use proptest::prelude::*;

/// Build a module from a name -> is_behavior table
fn module_from(layout: &BTreeMap<String, bool>) -> Module {
    layout
        .iter()
        .fold(Module::builder(), |builder, (name, is_behavior)| {
            if *is_behavior {
                let tag = name.clone();
                builder.behavior(name.clone(), move |_, _| Ok(Value::from(tag.clone())))
            } else {
                builder.data(name.clone(), name.len() as f64)
            }
        })
        .build()
}

fn layout() -> impl Strategy<Value = BTreeMap<String, bool>> {
    proptest::collection::btree_map("[a-z]{1,6}", any::<bool>(), 0..12)
}

proptest! {
    #[test]
    fn extend_copies_exactly_the_behaviors(source_layout in layout()) {
        let source = module_from(&source_layout);
        let target = Module::new();

        extend(&target, &source).unwrap();

        let expected: Vec<&String> = source_layout
            .iter()
            .filter(|(_, is_behavior)| **is_behavior)
            .map(|(name, _)| name)
            .collect();
        let names = target.member_names().unwrap();
        prop_assert_eq!(names.len(), expected.len());

        for (name, is_behavior) in &source_layout {
            if *is_behavior {
                let copied = target.behavior(name).unwrap().unwrap();
                let original = source.behavior(name).unwrap().unwrap();
                prop_assert!(Behavior::ptr_eq(&copied, &original));
            } else {
                prop_assert!(!target.contains(name).unwrap());
            }
        }
    }

    #[test]
    fn extend_links_ancestor_to_source(
        target_layout in layout(),
        source_layout in layout(),
    ) {
        let target = module_from(&target_layout);
        let source = module_from(&source_layout);

        extend(&target, &source).unwrap();

        let ancestor = target.ancestor().unwrap().unwrap();
        prop_assert!(Module::ptr_eq(&ancestor, &source));
    }

    #[test]
    fn last_merge_wins(name in "[a-z]{1,6}") {
        let first = Module::new();
        let first_behavior = first.define_behavior(name.clone(), |_, _| Ok(Value::from(1))).unwrap();
        let second = Module::new();
        let second_behavior = second.define_behavior(name.clone(), |_, _| Ok(Value::from(2))).unwrap();
        let target = Module::new();

        extend(&target, &first).unwrap();
        extend(&target, &second).unwrap();

        let current = target.behavior(&name).unwrap().unwrap();
        prop_assert!(Behavior::ptr_eq(&current, &second_behavior));
        prop_assert!(!Behavior::ptr_eq(&current, &first_behavior));
        prop_assert!(Module::ptr_eq(&target.ancestor().unwrap().unwrap(), &second));
    }

    #[test]
    fn repeated_merge_is_idempotent(
        target_layout in layout(),
        source_layout in layout(),
    ) {
        let target = module_from(&target_layout);
        let source = module_from(&source_layout);

        extend(&target, &source).unwrap();
        let names_once = target.member_names().unwrap();
        let behaviors_once = target.behaviors().unwrap();

        extend(&target, &source).unwrap();
        let names_twice = target.member_names().unwrap();
        let behaviors_twice = target.behaviors().unwrap();

        prop_assert_eq!(names_once, names_twice);
        prop_assert_eq!(behaviors_once.len(), behaviors_twice.len());
        for (name, behavior) in &behaviors_once {
            prop_assert!(Behavior::ptr_eq(behavior, &behaviors_twice[name]));
        }
        prop_assert!(Module::ptr_eq(&target.ancestor().unwrap().unwrap(), &source));
    }
}

/// P5: merging is one level deep; B's behaviors reach C only by walking
#[test]
fn merge_does_not_carry_the_chain() {
    let b = Module::builder()
        .behavior("onlyOnB", |_, _| Ok(Value::from("B")))
        .build();
    let a = Module::builder()
        .behavior("onA", |_, _| Ok(Value::from("A")))
        .build();
    let c = Module::new();

    extend(&a, &b).unwrap();
    extend(&c, &a).unwrap();

    // C's own members are A's behaviors, which by now include B's
    let mut names = c.member_names().unwrap();
    names.sort();
    let mut a_names = a.behaviors().unwrap().keys().cloned().collect::<Vec<_>>();
    a_names.sort();
    assert_eq!(names, a_names);

    // the ancestor is A, never B
    let ancestor = c.ancestor().unwrap().unwrap();
    assert!(Module::ptr_eq(&ancestor, &a));
    assert!(!Module::ptr_eq(&ancestor, &b));

    // a behavior added to B after the merges is only reachable by walking
    b.define_behavior("lateOnB", |_, _| Ok(Value::from("late")))
        .unwrap();
    assert!(!c.contains("lateOnB").unwrap());
    assert!(!ancestor.contains("lateOnB").unwrap());
    let grand_ancestor = ancestor.ancestor().unwrap().unwrap();
    assert!(Module::ptr_eq(&grand_ancestor, &b));
    assert_eq!(
        grand_ancestor.call("lateOnB", &[]).unwrap(),
        Value::from("late")
    );
}
