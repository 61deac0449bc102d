//! Member precedence integration tests.
//!
//! These tests bind requests onto shop.Widget, which declares one member for
//! each approval combination.

use optin_tests::prelude::*;

fn widget(binding: &Binding) -> &Widget {
    binding.instance_ref::<Widget>().unwrap()
}

mod approval_combinations {
    use super::*;
    use pretty_assertions::assert_eq;

    pub fn scenario() -> Scenario {
        Scenario::new("approval_combinations")
            .request(request! {
                "class" => "shop.Widget",
                "f1" => "2.0",
                "f2" => "2.0",
                "third" => "2.0",
                "f4" => "2.0",
            })
            .expect(|e| {
                e.denied("f1")
                    .field("f2")
                    .accessor("third", "setThird")
                    .accessor("f4", "setF4")
                    .only()
            })
    }

    #[test]
    fn test_approval_combinations() {
        let registry = shop_registry().unwrap();

        let binding = scenario().run(&registry).unwrap();

        let w = widget(&binding);
        assert_eq!(w.f1, 0.0);
        assert_eq!(w.f2, 2.0);
        assert_eq!(w.f3, 2.0);
        assert_eq!(w.f4, 2.0);
        assert_eq!(w.f4_calls, 1);
    }
}

mod approved_field_without_accessor {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_direct_field_mutation() {
        // GIVEN f2 is approved and has no accessor
        let registry = shop_registry().unwrap();

        // WHEN f2 is bound
        let binding = Scenario::new("direct_field")
            .request(request! { "class" => "shop.Widget", "f2" => "3.5" })
            .expect(|e| e.field("f2").only())
            .run(&registry)
            .unwrap();

        // THEN the field is written directly
        assert_eq!(
            binding.outcome("f2"),
            Some(&Outcome::Applied(AppliedVia::field("f2")))
        );
        assert_eq!(widget(&binding).f2, 3.5);
    }
}

mod field_approval_extends_to_accessor {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accessor_runs_for_approved_field() {
        // GIVEN f4 is approved and setF4 is not
        let registry = shop_registry().unwrap();

        // WHEN f4 is bound
        let binding = Scenario::new("field_approval_extends")
            .request(request! { "class" => "shop.Widget", "f4" => "7" })
            .expect(|e| e.accessor("f4", "setF4"))
            .run(&registry)
            .unwrap();

        // THEN the accessor's side effect is observable
        let w = widget(&binding);
        assert_eq!(w.f4, 7.0);
        assert_eq!(w.f4_calls, 1);
    }

    #[test]
    fn test_unapproved_field_and_accessor_denied() {
        let registry = shop_registry().unwrap();

        let binding = Scenario::new("secret")
            .request(request! { "class" => "shop.Widget", "secret" => "hunter2" })
            .expect(|e| e.denied("secret"))
            .run(&registry)
            .unwrap();

        assert_eq!(widget(&binding).secret, "");
        assert_eq!(
            binding.failures().collect::<Vec<_>>(),
            vec![&BindError::permission_denied("shop.Widget", "secret")]
        );
    }
}

mod overloaded_accessors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ambiguous_overloads_bind_nothing() {
        // GIVEN two approved setX accessors taking Int32 and Text, and no field x
        let registry = shop_registry().unwrap();

        // WHEN x is bound
        let binding = Scenario::new("ambiguous")
            .request(request! { "class" => "shop.Widget", "x" => "5" })
            .expect(|e| e.ambiguous("x"))
            .run(&registry)
            .unwrap();

        // THEN neither accessor runs
        assert_eq!(widget(&binding).x, 0);
        match binding.outcome("x") {
            Some(Outcome::Failed(BindError::AmbiguousMember { candidates, .. })) => {
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("expected AmbiguousMember, got {:?}", other),
        }
    }
}

mod accessor_key_matching {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accessor_keys_ignore_case() {
        let registry = shop_registry().unwrap();

        let binding = Scenario::new("accessor_case")
            .request(request! { "class" => "shop.Widget", "LABEL" => "Deluxe", "Third" => "1.5" })
            .expect(|e| e.accessor("LABEL", "setLabel").accessor("Third", "setThird"))
            .run(&registry)
            .unwrap();

        let w = widget(&binding);
        assert_eq!(w.label, "Deluxe");
        assert_eq!(w.f3, 1.5);
    }

    #[test]
    fn test_field_keys_are_case_sensitive() {
        // "F2" matches neither field f2 nor any setF2 accessor
        let registry = shop_registry().unwrap();

        let binding = Scenario::new("field_case")
            .request(request! { "class" => "shop.Widget", "F2" => "1.0" })
            .expect(|e| e.not_found("F2"))
            .run(&registry)
            .unwrap();

        assert_eq!(widget(&binding).f2, 0.0);
    }
}

mod unmatched_keys {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_body_ignored_other_keys_not_found() {
        let registry = shop_registry().unwrap();

        let binding = Scenario::new("unmatched")
            .request(request! {
                "class" => "shop.Widget",
                "body" => "<p>hello</p>",
                "color" => "red",
            })
            .expect(|e| e.ignored("body").not_found("color").only())
            .run(&registry)
            .unwrap();

        assert_eq!(binding.failures().count(), 1);
        assert_eq!(*widget(&binding), Widget::default());
    }

    #[test]
    fn test_custom_ignored_keys() {
        let registry = shop_registry().unwrap();

        Scenario::new("custom_ignored")
            .options(BinderOptions::default().with_ignored_key("csrf_token"))
            .request(request! { "class" => "shop.Widget", "csrf_token" => "abc", "body" => "" })
            .expect(|e| e.ignored("csrf_token").ignored("body"))
            .run(&registry)
            .unwrap();
    }
}

mod partial_binding {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_failures_do_not_abort_request() {
        // GIVEN a request mixing good and bad keys
        let registry = shop_registry().unwrap();

        // WHEN bound
        let binding = Scenario::new("partial")
            .request(request! {
                "class" => "shop.Widget",
                "count" => "twelve",
                "f1" => "1.0",
                "f2" => "4.0",
                "color" => "red",
                "label" => "ok",
            })
            .expect(|e| {
                e.coercion_failed("count")
                    .denied("f1")
                    .field("f2")
                    .not_found("color")
                    .accessor("label", "setLabel")
                    .only()
            })
            .run(&registry)
            .unwrap();

        // THEN outcomes follow request order and good keys are applied
        let keys: Vec<&str> = binding.outcomes.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["count", "f1", "f2", "color", "label"]);
        assert_eq!(binding.applied_keys().collect::<Vec<_>>(), vec!["f2", "label"]);
        let w = widget(&binding);
        assert_eq!((w.count, w.f2, w.label.as_str()), (0, 4.0, "ok"));
    }
}
