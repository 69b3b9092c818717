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

//! Call-site descriptors for blind triggers.
//!
//! A blind trigger only knows the values it was handed. [`SignalArg`] describes one such
//! value and converts it into the owned type a signal is declared with; [`ArgPack`] does the
//! same for a whole tuple of arguments and names the concrete signal type the call site
//! expects.

use std::rc::Rc;
use std::sync::Arc;

use crate::common::TypeDescriptor;
use crate::traits::Signature;

/// A value that can be passed to a blind trigger.
///
/// Owned types describe themselves; a shared borrow `&T` describes itself as a reference to
/// `T` and is cloned into a `T` before dispatch, so a signal declared with `T` accepts either.
///
/// Implementations exist for the primitive types, `String`, the unit type, `Vec<T>`,
/// `Option<T>`, `Box<T>`, `Rc<T>`, `Arc<T>`, and `&T`. User types opt in with the
/// [`signal_arg`](crate::signal_arg) attribute or the [`impl_signal_arg!`](crate::impl_signal_arg) macro.
pub trait SignalArg {
    /// The type a signal declares for this argument.
    type Owned: Clone + 'static;

    /// Describes the value as passed at the call site.
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Self::Owned>()
    }

    /// Converts the value into the declared type.
    fn into_owned(self) -> Self::Owned;
}

/// Implements [`SignalArg`] for owned types that are passed through unchanged.
///
/// ```rust
/// use signalbox::impl_signal_arg;
///
/// #[derive(Clone, Debug)]
/// struct Sample(f64);
///
/// impl_signal_arg!(Sample);
/// ```
#[macro_export]
macro_rules! impl_signal_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::SignalArg for $ty {
                type Owned = Self;

                #[inline]
                fn into_owned(self) -> Self {
                    self
                }
            }
        )*
    };
}

crate::impl_signal_arg!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
);

impl<T: Clone + 'static> SignalArg for Vec<T> {
    type Owned = Self;

    fn into_owned(self) -> Self {
        self
    }
}

impl<T: Clone + 'static> SignalArg for Option<T> {
    type Owned = Self;

    fn into_owned(self) -> Self {
        self
    }
}

impl<T: Clone + 'static> SignalArg for Box<T> {
    type Owned = Self;

    fn into_owned(self) -> Self {
        self
    }
}

impl<T: ?Sized + 'static> SignalArg for Rc<T> {
    type Owned = Self;

    fn into_owned(self) -> Self {
        self
    }
}

impl<T: ?Sized + 'static> SignalArg for Arc<T> {
    type Owned = Self;

    fn into_owned(self) -> Self {
        self
    }
}

impl<'a, T> SignalArg for &'a T
where
    T: SignalArg<Owned = T> + Clone + 'static,
{
    type Owned = T;

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::reference_to::<T>()
    }

    fn into_owned(self) -> T {
        T::clone(self)
    }
}

/// A tuple of blind-trigger arguments.
pub trait ArgPack {
    /// The tuple of declared (owned) argument types.
    type Owned: Clone + 'static;
    /// The signature of a signal that accepts these arguments and returns `R`.
    type Target<R: 'static>: Signature<Args = Self::Owned, Output = R>;

    /// Descriptors of the arguments as passed, in order.
    fn descriptors() -> Vec<TypeDescriptor>;

    /// Converts every argument into its declared type.
    fn into_owned(self) -> Self::Owned;
}

macro_rules! impl_arg_pack {
    ($($A:ident $a:ident $idx:tt),*) => {
        impl<$($A: SignalArg,)*> ArgPack for ($($A,)*) {
            type Owned = ($($A::Owned,)*);
            type Target<R: 'static> = fn($($A::Owned),*) -> R;

            fn descriptors() -> Vec<TypeDescriptor> {
                vec![$($A::descriptor()),*]
            }

            #[allow(clippy::unused_unit)]
            fn into_owned(self) -> Self::Owned {
                ($($A::into_owned(self.$idx),)*)
            }
        }
    };
}

for_each_signature!(impl_arg_pack);
