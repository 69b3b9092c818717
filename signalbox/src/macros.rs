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

//! Crate-internal macros shared by the per-arity implementations.

/// Invokes `$m!` once per supported call signature, from zero to six parameters.
///
/// Each parameter is passed as `TypeName binding tuple_index`.
macro_rules! for_each_signature {
    ($m:ident) => {
        $m!();
        $m!(A1 a1 0);
        $m!(A1 a1 0, A2 a2 1);
        $m!(A1 a1 0, A2 a2 1, A3 a3 2);
        $m!(A1 a1 0, A2 a2 1, A3 a3 2, A4 a4 3);
        $m!(A1 a1 0, A2 a2 1, A3 a3 2, A4 a4 3, A5 a5 4);
        $m!(A1 a1 0, A2 a2 1, A3 a3 2, A4 a4 3, A5 a5 4, A6 a6 5);
    };
}
