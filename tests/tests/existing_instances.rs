//! Binding onto instances the caller already owns, and sharing a registry.

use std::sync::Arc;
use std::thread;

use optin_tests::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_bind_into_existing_widget() {
    // GIVEN a widget with prior state
    init_tracing();
    let registry = shop_registry().unwrap();
    let binder = Binder::new(&registry);
    let mut widget = Widget {
        label: "Old".to_string(),
        count: 9,
        ..Widget::default()
    };

    // WHEN a request is bound into it
    let outcomes = binder
        .bind_into(
            &mut widget,
            &request! { "class" => "shop.Gadget", "label" => "New", "f1" => "1.0" },
        )
        .unwrap();

    // THEN the type selector is skipped and untouched members keep their state
    Expect::new()
        .accessor("label", "setLabel")
        .denied("f1")
        .only()
        .verify("bind_into", &outcomes)
        .unwrap();
    assert_eq!(widget.label, "New");
    assert_eq!(widget.count, 9);
    assert_eq!(widget.f1, 0.0);
}

#[test]
fn test_bind_into_unregistered_type() {
    let registry = shop_registry().unwrap();
    let binder = Binder::new(&registry);
    let mut stranger = Stranger::default();

    let result = binder.bind_into(&mut stranger, &request! { "name" => "x" });

    assert!(matches!(result, Err(InstantiateError::TypeNotFound { .. })));
    assert_eq!(stranger.name, "");
}

#[test]
fn test_bind_instance_rebinds_erased_instance() {
    let registry = shop_registry().unwrap();
    let binder = Binder::new(&registry);
    let mut binding = binder
        .instantiate_named(request! { "class" => "shop.Widget", "count" => "1" })
        .unwrap();
    let type_def = registry.get_type_by_name(&binding.type_name).unwrap();

    let outcomes = binder
        .bind_instance(type_def, &mut *binding.instance, &request! { "count" => "2" })
        .unwrap();

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].outcome.is_applied());
    assert_eq!(binding.instance_ref::<Widget>().map(|w| w.count), Some(2));
}

#[test]
fn test_registry_shared_across_threads() {
    // GIVEN one registry shared by several threads
    let registry = Arc::new(shop_registry().unwrap());

    // WHEN each thread binds its own request
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let binder = Binder::new(&registry);
                let binding = binder
                    .instantiate_named(request! { "class" => "shop.Widget", "count" => i })
                    .unwrap();
                binding.downcast::<Widget>().map(|w| w.count)
            })
        })
        .collect();

    // THEN every thread gets its own instance
    let counts: Vec<Option<i32>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![Some(0), Some(1), Some(2), Some(3)]);
}
