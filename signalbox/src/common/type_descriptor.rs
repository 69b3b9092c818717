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

//! Runtime descriptors for the argument and return types of a signal.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A runtime description of one parameter or return type.
///
/// Signals record one descriptor per declared argument plus one for the return type when
/// they are constructed. Blind triggers build descriptors for the values supplied at the
/// call site and compare the two sequences before dispatching.
///
/// A descriptor for a borrowed argument (`&T`) carries the `TypeId` of `T` and a reference
/// flag, so [`strip_reference`](Self::strip_reference) yields exactly the descriptor of `T`.
#[derive(Clone, Copy, Debug)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
    reference: bool,
}

impl TypeDescriptor {
    /// Describes the owned type `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            reference: false,
        }
    }

    /// Describes a shared borrow of `T`.
    #[must_use]
    pub fn reference_to<T: ?Sized + 'static>() -> Self {
        Self {
            reference: true,
            ..Self::of::<T>()
        }
    }

    /// The descriptor with any reference qualification removed.
    #[must_use]
    pub const fn strip_reference(self) -> Self {
        Self {
            reference: false,
            ..self
        }
    }

    /// `TypeId` of the underlying (unborrowed) type.
    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Name of the underlying (unborrowed) type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this descriptor stands for a borrow.
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        self.reference
    }

    /// Whether `actual`, as passed at a call site, satisfies this recorded descriptor.
    ///
    /// Accepts an exact match, or a match once the reference qualification of `actual`
    /// is stripped.
    #[must_use]
    pub fn accepts(&self, actual: &Self) -> bool {
        *self == *actual || *self == actual.strip_reference()
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.reference == other.reference
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.reference.hash(state);
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reference {
            write!(f, "&{}", self.name)
        } else {
            f.write_str(self.name)
        }
    }
}

/// Joins descriptors into a parenthesized list, e.g. `(i32, &alloc::string::String)`.
pub(crate) fn describe_list(descriptors: &[TypeDescriptor]) -> String {
    let names: Vec<String> = descriptors.iter().map(ToString::to_string).collect();
    format!("({})", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_strips_to_owned() {
        let owned = TypeDescriptor::of::<i32>();
        let borrowed = TypeDescriptor::reference_to::<i32>();
        assert_ne!(owned, borrowed);
        assert_eq!(owned, borrowed.strip_reference());
        assert!(owned.accepts(&borrowed));
        assert!(owned.accepts(&owned));
    }

    #[test]
    fn different_types_never_match() {
        let recorded = TypeDescriptor::of::<i32>();
        assert!(!recorded.accepts(&TypeDescriptor::of::<i64>()));
        assert!(!recorded.accepts(&TypeDescriptor::reference_to::<u32>()));
    }

    #[test]
    fn recorded_reference_does_not_accept_owned() {
        let recorded = TypeDescriptor::reference_to::<String>();
        assert!(!recorded.accepts(&TypeDescriptor::of::<String>()));
    }

    #[test]
    fn display_marks_borrows() {
        assert_eq!(TypeDescriptor::of::<u8>().to_string(), "u8");
        assert_eq!(TypeDescriptor::reference_to::<u8>().to_string(), "&u8");
        let list = describe_list(&[TypeDescriptor::of::<u8>(), TypeDescriptor::reference_to::<bool>()]);
        assert_eq!(list, "(u8, &bool)");
        assert_eq!(describe_list(&[]), "()");
    }
}
