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
use std::cell::RefCell;
use std::rc::Rc;

use signalbox::prelude::*;

/// One hook call as seen by a [`RecordingManager`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Constructed { manager: &'static str, signal: String },
    Destroyed { manager: &'static str, signal: String },
}

/// A manager that appends every notification it receives to a shared journal.
#[derive(Debug)]
pub struct RecordingManager {
    label: &'static str,
    journal: Rc<RefCell<Vec<Notice>>>,
}

impl RecordingManager {
    pub fn new(label: &'static str, journal: &Rc<RefCell<Vec<Notice>>>) -> Rc<Self> {
        Rc::new(Self {
            label,
            journal: Rc::clone(journal),
        })
    }
}

impl SignalManager for RecordingManager {
    fn notify_construct(&self, signal: &dyn SignalBase) {
        self.journal.borrow_mut().push(Notice::Constructed {
            manager: self.label,
            signal: signal.name().to_string(),
        });
    }

    fn notify_destruct(&self, signal: &dyn SignalBase) {
        self.journal.borrow_mut().push(Notice::Destroyed {
            manager: self.label,
            signal: signal.name().to_string(),
        });
    }
}

pub fn journal() -> Rc<RefCell<Vec<Notice>>> {
    Rc::new(RefCell::new(Vec::new()))
}
