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

use std::rc::Rc;

use crate::common::TypeDescriptor;

/// A call signature a [`Signal`](crate::signal::Signal) can be built for.
///
/// Implemented for function-pointer types `fn(A1, .., An) -> R` with up to six parameters,
/// which serve purely as type-level names: `Signal<fn(i32, i32) -> f64>` is a signal whose
/// subscribers take two `i32`s and return an `f64`. Argument types must be `Clone`, since
/// every subscriber receives its own copy of each argument.
pub trait Signature: Sized + 'static {
    /// The arguments as a tuple, e.g. `(i32, i32)`.
    type Args: Clone + 'static;
    /// What each subscriber returns.
    type Output: 'static;
    /// Stored subscriber type, `dyn FnMut(A1, .., An) -> R`.
    type Callback: ?Sized + 'static;
    /// Shareable callable carried by an [`Action`](crate::action::Action), `dyn Fn(A1, .., An) -> R`.
    type Shared: ?Sized + 'static;

    /// Number of declared parameters.
    const ARITY: usize;

    /// Descriptors of the declared parameters, in order.
    fn arg_types() -> Vec<TypeDescriptor>;

    /// Descriptor of the return type.
    fn return_type() -> TypeDescriptor {
        TypeDescriptor::of::<Self::Output>()
    }

    /// Calls `callback` with a fresh copy of `args`.
    fn invoke(callback: &mut Self::Callback, args: &Self::Args) -> Self::Output;

    /// Wraps a shared callable as a stored subscriber.
    fn share(shared: Rc<Self::Shared>) -> Box<Self::Callback>;
}

macro_rules! impl_signature {
    ($($A:ident $a:ident $idx:tt),*) => {
        impl<R: 'static, $($A: Clone + 'static,)*> Signature for fn($($A),*) -> R {
            type Args = ($($A,)*);
            type Output = R;
            type Callback = dyn FnMut($($A),*) -> R;
            type Shared = dyn Fn($($A),*) -> R;

            const ARITY: usize = <[&str]>::len(&[$(stringify!($A)),*]);

            fn arg_types() -> Vec<TypeDescriptor> {
                vec![$(TypeDescriptor::of::<$A>()),*]
            }

            #[allow(unused_variables)]
            #[inline]
            fn invoke(callback: &mut Self::Callback, args: &Self::Args) -> R {
                callback($(args.$idx.clone()),*)
            }

            fn share(shared: Rc<Self::Shared>) -> Box<Self::Callback> {
                Box::new(move |$($a: $A),*| shared($($a),*))
            }
        }
    };
}

for_each_signature!(impl_signature);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_and_descriptors_follow_the_signature() {
        assert_eq!(<fn() as Signature>::ARITY, 0);
        assert_eq!(<fn(i32, String) -> f64 as Signature>::ARITY, 2);
        assert_eq!(
            <fn(i32, String) -> f64 as Signature>::arg_types(),
            vec![TypeDescriptor::of::<i32>(), TypeDescriptor::of::<String>()]
        );
        assert_eq!(
            <fn(u8) -> bool as Signature>::return_type(),
            TypeDescriptor::of::<bool>()
        );
        assert_eq!(<fn(u8) as Signature>::return_type(), TypeDescriptor::of::<()>());
    }

    #[test]
    fn invoke_copies_arguments() {
        let mut callback: Box<dyn FnMut(String, usize) -> usize> =
            Box::new(|text: String, extra: usize| text.len() + extra);
        let args = ("four".to_string(), 1);
        assert_eq!(<fn(String, usize) -> usize as Signature>::invoke(callback.as_mut(), &args), 5);
        assert_eq!(<fn(String, usize) -> usize as Signature>::invoke(callback.as_mut(), &args), 5);
        assert_eq!(args.0, "four");
    }
}
