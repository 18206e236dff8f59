use super::*;

fn number(value: f64) -> RuntimeValue {
    RuntimeValue::Number(value)
}

mod declarations {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn declare_returns_value() {
        let global = Environment::new_global();

        assert_eq!(Ok(number(1.0)), global.borrow_mut().declare("a", number(1.0), false));
        assert_eq!(Ok(number(1.0)), Environment::get(&global, "a"));
    }

    #[test]
    fn redeclaration_in_same_scope_fails() {
        let global = Environment::new_global();
        global.borrow_mut().declare("a", number(1.0), true).unwrap();

        assert_eq!(Err(RuntimeError::Redeclaration(String::from("a"))), global.borrow_mut().declare("a", number(2.0), true));
        assert_eq!(Ok(number(1.0)), Environment::get(&global, "a"));
    }

    #[test]
    fn shadowing_leaves_parent_untouched() {
        let global = Environment::new_global();
        global.borrow_mut().declare("a", number(1.0), false).unwrap();

        let child = Environment::new_with_parent(&global);
        child.borrow_mut().declare("a", number(2.0), false).unwrap();

        assert_eq!(Ok(number(2.0)), Environment::get(&child, "a"));
        assert_eq!(Ok(number(1.0)), Environment::get(&global, "a"));
    }
}

mod resolution {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn resolves_outward() {
        let global = Environment::new_global();
        global.borrow_mut().declare("a", number(1.0), false).unwrap();

        let child = Environment::new_with_parent(&global);
        let grandchild = Environment::new_with_parent(&child);

        let owner = Environment::resolve(&grandchild, "a").unwrap();
        assert!(Rc::ptr_eq(&global, &owner));
        assert_eq!(Ok(number(1.0)), Environment::get(&grandchild, "a"));
    }

    #[test]
    fn undefined_variable() {
        let global = Environment::new_global();
        let child = Environment::new_with_parent(&global);

        assert_eq!(Err(RuntimeError::UndefinedVariable(String::from("x"))), Environment::get(&child, "x"));
        assert!(matches!(Environment::resolve(&child, "x"), Err(RuntimeError::UndefinedVariable(_))));
    }

    #[test]
    fn siblings_are_invisible() {
        let global = Environment::new_global();
        let left = Environment::new_with_parent(&global);
        let right = Environment::new_with_parent(&global);
        left.borrow_mut().declare("a", number(1.0), false).unwrap();

        assert!(left.borrow().has_own("a"));
        assert!(Environment::get(&right, "a").is_err());
    }

    #[test]
    fn dropped_parent_ends_chain() {
        let global = Environment::new_global();
        global.borrow_mut().declare("a", number(1.0), false).unwrap();
        let child = Environment::new_with_parent(&global);
        drop(global);

        assert_eq!(Err(RuntimeError::UndefinedVariable(String::from("a"))), Environment::get(&child, "a"));
    }
}

mod assignment {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn mutable_can_be_reassigned() {
        let global = Environment::new_global();
        global.borrow_mut().declare("y", number(5.0), true).unwrap();

        assert_eq!(Ok(number(10.0)), Environment::set(&global, "y", number(10.0)));
        assert_eq!(Ok(number(10.0)), Environment::get(&global, "y"));
    }

    #[test]
    fn constant_cannot_be_reassigned() {
        let global = Environment::new_global();
        global.borrow_mut().declare("y", number(5.0), false).unwrap();

        assert_eq!(Err(RuntimeError::AssignToConstant(String::from("y"))), Environment::set(&global, "y", number(10.0)));
        assert_eq!(Ok(number(5.0)), Environment::get(&global, "y"));
    }

    #[test]
    fn constant_is_protected_from_descendants() {
        let global = Environment::new_global();
        global.borrow_mut().declare("y", number(5.0), false).unwrap();
        let child = Environment::new_with_parent(&global);

        assert_eq!(Err(RuntimeError::AssignToConstant(String::from("y"))), Environment::set(&child, "y", number(10.0)));
    }

    #[test]
    fn set_writes_owning_scope() {
        let global = Environment::new_global();
        global.borrow_mut().declare("y", number(5.0), true).unwrap();
        let child = Environment::new_with_parent(&global);

        Environment::set(&child, "y", number(6.0)).unwrap();

        assert!(!child.borrow().has_own("y"));
        assert_eq!(Ok(number(6.0)), Environment::get(&global, "y"));
    }

    #[test]
    fn set_undefined_fails() {
        let global = Environment::new_global();

        assert_eq!(Err(RuntimeError::UndefinedVariable(String::from("x"))), Environment::set(&global, "x", number(5.0)));
    }
}
