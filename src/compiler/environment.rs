use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};
use crate::compiler::error::{RuntimeError, RuntimeResult};
use crate::compiler::value::RuntimeValue;

/// Shared handle to a scope. Children only hold a [`Weak`] link back to it.
pub type Scope = Rc<RefCell<Environment>>;

/// One lexical scope: its own bindings plus a link to the enclosing scope.
#[derive(Debug)]
pub struct Environment {
    variables: HashMap<String, RuntimeValue>,
    constants: HashSet<String>,

    parent: Option<Weak<RefCell<Environment>>>,
}

impl Environment {
    pub fn new_global() -> Scope {
        Rc::new(RefCell::new(Environment {
            variables: HashMap::new(),
            constants: HashSet::new(),

            parent: None,
        }))
    }

    /// The parent has to stay alive for as long as the child is used;
    /// a dropped parent ends the lookup chain.
    pub fn new_with_parent(parent: &Scope) -> Scope {
        Rc::new(RefCell::new(Environment {
            variables: HashMap::new(),
            constants: HashSet::new(),

            parent: Some(Rc::downgrade(parent)),
        }))
    }

    fn parent(&self) -> Option<Scope> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Finds the closest scope, starting at `this`, that declares `name`.
    pub fn resolve(this: &Scope, name: &str) -> RuntimeResult<Scope> {
        let mut scope = Rc::clone(this);

        loop {
            if scope.borrow().variables.contains_key(name) {
                return Ok(scope);
            }

            let parent = scope.borrow().parent();

            match parent {
                Some(parent) => scope = parent,
                None => return Err(RuntimeError::UndefinedVariable(name.to_owned())),
            }
        }
    }

    pub fn declare(&mut self, name: &str, value: RuntimeValue, mutable: bool) -> RuntimeResult<RuntimeValue> {
        if self.variables.contains_key(name) {
            return Err(RuntimeError::Redeclaration(name.to_owned()));
        }

        self.variables.insert(name.to_owned(), value.clone());

        if !mutable {
            self.constants.insert(name.to_owned());
        }

        tracing::trace!(name, mutable, "declared variable");
        Ok(value)
    }

    pub fn set(this: &Scope, name: &str, value: RuntimeValue) -> RuntimeResult<RuntimeValue> {
        let scope = Self::resolve(this, name)?;
        let mut environment = scope.borrow_mut();

        if environment.constants.contains(name) {
            return Err(RuntimeError::AssignToConstant(name.to_owned()));
        }

        environment.variables.insert(name.to_owned(), value.clone());

        tracing::trace!(name, "assigned variable");
        Ok(value)
    }

    pub fn get(this: &Scope, name: &str) -> RuntimeResult<RuntimeValue> {
        let scope = Self::resolve(this, name)?;
        let value = scope.borrow().variables.get(name).cloned();

        value.ok_or_else(|| RuntimeError::UndefinedVariable(name.to_owned()))
    }

    /// Whether `name` is bound in this scope itself, ignoring ancestors.
    pub fn has_own(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }
}

#[cfg(test)]
mod tests;
