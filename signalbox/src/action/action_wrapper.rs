/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::any::{type_name, Any};
use std::fmt;
use std::rc::Rc;

use dyn_clone::DynClone;

use crate::common::TypeDescriptor;
use crate::traits::Signature;

/// Type-erased view of an [`Action`].
///
/// This is what code that does not know a signal's concrete type hands to
/// [`SignalBase::add_action_dyn`](crate::traits::SignalBase::add_action_dyn). The signal
/// recovers the exact action type with [`as_any`](Self::as_any) and rejects anything else.
///
/// Boxed actions can be cloned (`Box<dyn ActionBase>: Clone`); clones share the callable.
pub trait ActionBase: DynClone + Any {
    /// Diagnostic name of the action.
    fn name(&self) -> &str;

    /// Name of the action's exact signature, e.g. `fn(i32) -> f64`.
    fn signature(&self) -> &'static str;

    /// Descriptors of the action's parameters.
    fn arg_types(&self) -> Vec<TypeDescriptor>;

    /// Descriptor of the action's return type.
    fn return_type(&self) -> TypeDescriptor;

    /// Number of parameters the action takes.
    fn num_args(&self) -> usize {
        self.arg_types().len()
    }

    /// Returns the action as [`Any`] so it can be downcast to its concrete type.
    fn as_any(&self) -> &dyn Any;
}

dyn_clone::clone_trait_object!(ActionBase);

/// A named, pre-built callable with the exact signature `S`.
///
/// Actions let a component hand a handler to a signal it only knows through
/// [`SignalBase`](crate::traits::SignalBase). They are immutable; cloning shares the callable.
///
/// ```rust
/// use signalbox::prelude::*;
///
/// let double = Action::<fn(i32) -> i32>::new("double", |x: i32| x * 2);
/// let mut signal: Signal<fn(i32) -> i32> = Signal::new("values");
/// let erased: &mut dyn SignalBase = &mut signal;
///
/// assert!(erased.test_match(&double));
/// erased.add_action_dyn(&double).unwrap();
/// assert_eq!(signal.trigger(21), &[42]);
/// ```
pub struct Action<S: Signature> {
    name: String,
    fun: Rc<S::Shared>,
}

impl<S: Signature> Action<S> {
    /// Wraps an already shared callable.
    pub fn from_shared(name: impl Into<String>, fun: Rc<S::Shared>) -> Self {
        Self {
            name: name.into(),
            fun,
        }
    }

    /// The wrapped callable, typed exactly as declared.
    #[must_use]
    pub fn fun(&self) -> &Rc<S::Shared> {
        &self.fun
    }
}

macro_rules! impl_action_new {
    ($($A:ident $a:ident $idx:tt),*) => {
        impl<R: 'static, $($A: Clone + 'static,)*> Action<fn($($A),*) -> R> {
            /// Creates a named action from a callable with exactly this signature.
            pub fn new<F>(name: impl Into<String>, fun: F) -> Self
            where
                F: Fn($($A),*) -> R + 'static,
            {
                let shared: Rc<dyn Fn($($A),*) -> R> = Rc::new(fun);
                Self::from_shared(name, shared)
            }
        }
    };
}

for_each_signature!(impl_action_new);

impl<S: Signature> Clone for Action<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            fun: Rc::clone(&self.fun),
        }
    }
}

impl<S: Signature> fmt::Debug for Action<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("signature", &type_name::<S>())
            .finish()
    }
}

impl<S: Signature> ActionBase for Action<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> &'static str {
        type_name::<S>()
    }

    fn arg_types(&self) -> Vec<TypeDescriptor> {
        S::arg_types()
    }

    fn return_type(&self) -> TypeDescriptor {
        S::return_type()
    }

    fn num_args(&self) -> usize {
        S::ARITY
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
