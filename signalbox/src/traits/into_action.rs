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

use crate::traits::Signature;

/// A callable that can be stored as a subscriber of signals with signature `S`.
///
/// Implemented for every closure or function whose parameters are a *prefix* of the
/// parameters of `S` and whose return type is that of `S`. An exact match is stored as is;
/// a shorter parameter list is wrapped in an adapter that forwards the leading arguments and
/// drops the rest. Callables with extra parameters, or with parameters that are not a prefix,
/// have no implementation and are rejected at compile time.
///
/// `Marker` is the callable's own signature; it only exists to keep the implementations
/// apart and is always inferred.
///
/// ```rust
/// use signalbox::prelude::*;
///
/// let mut signal: Signal<fn(i32, String)> = Signal::new("labelled");
/// signal.add_action(|value: i32, label: String| println!("{label}: {value}"));
/// signal.add_action(|value: i32| println!("{value}"));
/// signal.add_action(|| println!("fired"));
/// assert_eq!(signal.num_actions(), 3);
/// ```
pub trait IntoAction<S: Signature, Marker> {
    /// Boxes the callable as a full-signature subscriber.
    fn into_action(self) -> Box<S::Callback>;
}

macro_rules! impl_into_action {
    ([$($A:ident $a:ident),*] => [$($P:ident $p:ident),*]) => {
        impl<F, R, $($A,)*> IntoAction<fn($($A),*) -> R, fn($($P),*) -> R> for F
        where
            F: FnMut($($P),*) -> R + 'static,
            R: 'static,
            $($A: Clone + 'static,)*
        {
            #[allow(unused_variables)]
            fn into_action(mut self) -> Box<dyn FnMut($($A),*) -> R> {
                Box::new(move |$($a: $A),*| self($($p),*))
            }
        }
    };
}

impl_into_action!([] => []);

impl_into_action!([A1 a1] => []);
impl_into_action!([A1 a1] => [A1 a1]);

impl_into_action!([A1 a1, A2 a2] => []);
impl_into_action!([A1 a1, A2 a2] => [A1 a1]);
impl_into_action!([A1 a1, A2 a2] => [A1 a1, A2 a2]);

impl_into_action!([A1 a1, A2 a2, A3 a3] => []);
impl_into_action!([A1 a1, A2 a2, A3 a3] => [A1 a1]);
impl_into_action!([A1 a1, A2 a2, A3 a3] => [A1 a1, A2 a2]);
impl_into_action!([A1 a1, A2 a2, A3 a3] => [A1 a1, A2 a2, A3 a3]);

impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4] => []);
impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4] => [A1 a1]);
impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4] => [A1 a1, A2 a2]);
impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4] => [A1 a1, A2 a2, A3 a3]);
impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4] => [A1 a1, A2 a2, A3 a3, A4 a4]);

impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4, A5 a5] => []);
impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4, A5 a5] => [A1 a1]);
impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4, A5 a5] => [A1 a1, A2 a2]);
impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4, A5 a5] => [A1 a1, A2 a2, A3 a3]);
impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4, A5 a5] => [A1 a1, A2 a2, A3 a3, A4 a4]);
impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4, A5 a5] => [A1 a1, A2 a2, A3 a3, A4 a4, A5 a5]);

impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6] => []);
impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6] => [A1 a1]);
impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6] => [A1 a1, A2 a2]);
impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6] => [A1 a1, A2 a2, A3 a3]);
impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6] => [A1 a1, A2 a2, A3 a3, A4 a4]);
impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6] => [A1 a1, A2 a2, A3 a3, A4 a4, A5 a5]);
impl_into_action!([A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6] => [A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6]);
