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
#![forbid(unsafe_code)]

//! Signalbox Macro Library
//!
//! Procedural macros for the Signalbox dispatch core.
//!
//! # Argument Macro
//!
//! The [`signal_arg`] macro lets a user type be passed to a blind trigger:
//!
//! ```ignore
//! #[signal_arg]
//! pub struct Reading {
//!     pub sensor: u32,
//!     pub value: f64,
//! }
//! ```

use proc_macro::TokenStream;

use quote::quote;
use syn::{parse_macro_input, parse_quote, DeriveInput};

fn has_derive(input: &DeriveInput, trait_name: &str) -> bool {
    input.attrs.iter().any(|attr| {
        if attr.path().is_ident("derive") {
            let mut found = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(trait_name) {
                    found = true;
                }
                Ok(())
            });
            found
        } else {
            false
        }
    })
}

/// Prepares a type for use as a signal argument.
///
/// Signal arguments are copied for every subscriber, and blind triggers describe each value
/// they are handed, so an argument type must be `Clone + 'static` and implement
/// `signalbox::SignalArg`.
///
/// # Usage
///
/// ```ignore
/// use signalbox::prelude::*;
///
/// #[signal_arg]
/// pub struct Reading {
///     pub sensor: u32,
///     pub value: f64,
/// }
///
/// let mut signal: Signal<fn(Reading)> = Signal::new("readings");
/// let erased: &mut dyn SignalBase = &mut signal;
/// let reading = Reading { sensor: 1, value: 0.5 };
/// erased.base_trigger((&reading,)).unwrap();
/// ```
///
/// This expands to:
/// - `#[derive(Clone, Debug)]` (only traits not already present)
/// - an implementation of `signalbox::SignalArg` with `Owned = Self`
/// - a compile-time assertion that the type is `Clone + 'static` (non-generic types only)
#[proc_macro_attribute]
pub fn signal_arg(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    let name = &input.ident;
    let (_, ty_generics, _) = input.generics.split_for_impl();
    let mut generics = input.generics.clone();
    generics
        .make_where_clause()
        .predicates
        .push(parse_quote!(#name #ty_generics: ::core::clone::Clone + 'static));
    let (impl_generics, _, where_clause) = generics.split_for_impl();

    let derives = {
        let mut traits = Vec::new();
        if !has_derive(&input, "Clone") {
            traits.push(quote!(Clone));
        }
        if !has_derive(&input, "Debug") {
            traits.push(quote!(Debug));
        }
        if traits.is_empty() {
            quote!()
        } else {
            quote!(#[derive(#(#traits),*)])
        }
    };

    // Generic types are checked where they are instantiated, through the impl's bounds.
    let assertion = if input.generics.params.is_empty() {
        let assert_ident = quote::format_ident!("_AssertSignalArg_{}", name);
        quote! {
            #[doc(hidden)]
            #[allow(dead_code, non_snake_case)]
            const _: () = {
                fn #assert_ident() {
                    fn assert_bounds<T: Clone + 'static>() {}
                    assert_bounds::<#name>();
                }
            };
        }
    } else {
        quote!()
    };

    let expanded = quote! {
        #derives
        #input

        impl #impl_generics ::signalbox::SignalArg for #name #ty_generics #where_clause {
            type Owned = Self;

            #[inline]
            fn into_owned(self) -> Self {
                self
            }
        }

        #assertion
    };

    TokenStream::from(expanded)
}
