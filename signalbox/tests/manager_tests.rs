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

use crate::setup::*;

mod setup;

#[test]
fn construction_notifies_the_supplied_manager_once() {
    initialize_tracing();
    let journal = journal();
    let manager = RecordingManager::new("m", &journal);

    let signal: Signal<fn(i32)> = Signal::with_manager("created", &manager);
    assert_eq!(
        *journal.borrow(),
        vec![Notice::Constructed {
            manager: "m",
            signal: "created".to_string()
        }]
    );

    drop(signal);
    assert_eq!(journal.borrow().len(), 2);
    assert_eq!(
        journal.borrow()[1],
        Notice::Destroyed {
            manager: "m",
            signal: "created".to_string()
        }
    );
}

#[test]
fn destruction_notifies_in_subscription_order_except_prime() {
    initialize_tracing();
    let journal = journal();
    let first = RecordingManager::new("first", &journal);
    let prime = RecordingManager::new("prime", &journal);
    let last = RecordingManager::new("last", &journal);

    let mut signal: Signal<fn()> = Signal::new("watched");
    signal.subscribe_manager(manager_ref(&first));
    signal.subscribe_manager(manager_ref(&prime));
    signal.subscribe_manager(manager_ref(&last));
    signal.set_prime_manager(manager_ref(&prime));
    assert!(journal.borrow().is_empty());

    drop(signal);
    assert_eq!(
        *journal.borrow(),
        vec![
            Notice::Destroyed {
                manager: "first",
                signal: "watched".to_string()
            },
            Notice::Destroyed {
                manager: "last",
                signal: "watched".to_string()
            },
        ]
    );
}

#[test]
fn dropped_managers_are_skipped() {
    initialize_tracing();
    let journal = journal();
    let gone = RecordingManager::new("gone", &journal);
    let kept = RecordingManager::new("kept", &journal);

    let mut signal: Signal<fn(u8) -> u8> = Signal::with_manager("survivor", &gone);
    signal.subscribe_manager(manager_ref(&kept));
    drop(gone);
    drop(signal);

    let notices = journal.borrow();
    assert_eq!(notices.len(), 2);
    assert_eq!(
        notices[1],
        Notice::Destroyed {
            manager: "kept",
            signal: "survivor".to_string()
        }
    );
}

#[test]
fn subscribers_are_released_before_managers_hear_of_destruction() {
    initialize_tracing();
    struct CountingManager {
        probe: Rc<()>,
        seen: RefCell<Option<(usize, usize)>>,
    }
    impl SignalManager for CountingManager {
        fn notify_construct(&self, _: &dyn SignalBase) {}
        fn notify_destruct(&self, signal: &dyn SignalBase) {
            *self.seen.borrow_mut() = Some((signal.num_actions(), Rc::strong_count(&self.probe)));
        }
    }

    let probe = Rc::new(());
    let manager = Rc::new(CountingManager {
        probe: Rc::clone(&probe),
        seen: RefCell::new(None),
    });
    let mut signal: Signal<fn()> = Signal::with_manager("holder", &manager);
    let captured = Rc::clone(&probe);
    signal.add_action(move || drop(Rc::clone(&captured)));
    assert_eq!(Rc::strong_count(&probe), 3);

    drop(signal);
    assert_eq!(*manager.seen.borrow(), Some((0, 2)));
}

#[test]
fn registry_catalogues_external_signals() -> anyhow::Result<()> {
    initialize_tracing();
    let registry = SignalRegistry::new();
    let external: Signal<fn(String) -> bool> = Signal::with_manager("external", &registry);

    let record = registry
        .record(external.signal_id())
        .ok_or_else(|| anyhow::anyhow!("external signal was not catalogued"))?;
    assert_eq!(record.name(), "external");
    assert!(!record.is_owned());
    assert_eq!(record.return_type(), TypeDescriptor::of::<bool>());
    assert!(!registry.contains("external"));

    drop(external);
    assert!(registry.records().is_empty());
    Ok(())
}

#[test]
fn registry_is_prime_for_its_own_signals() -> anyhow::Result<()> {
    initialize_tracing();
    let journal = journal();
    let observer = RecordingManager::new("observer", &journal);
    let registry = SignalRegistry::with_prefix("owned");

    let name = registry.add::<fn(i32)>("")?;
    registry.with_signal(&name, |signal| signal.subscribe_manager(manager_ref(&observer)))?;
    registry.remove_signal(&name)?;

    assert_eq!(
        *journal.borrow(),
        vec![Notice::Destroyed {
            manager: "observer",
            signal: "owned_0".to_string()
        }]
    );
    assert!(registry.records().is_empty());
    Ok(())
}

#[test]
fn registry_dispatches_by_name() -> anyhow::Result<()> {
    initialize_tracing();
    let registry = SignalRegistry::new();
    registry.add::<fn(i32, i32) -> i32>("combine")?;
    registry.add::<fn(String)>("announce")?;

    let sum = Action::<fn(i32, i32) -> i32>::new("sum", |a: i32, b: i32| a + b);
    assert!(registry.test_match("combine", &sum)?);
    assert!(!registry.test_match("announce", &sum)?);
    let sum_key = registry.add_action("combine", &sum)?;
    registry.add_typed::<fn(i32, i32) -> i32, _>("combine", |a: i32| a * 100)?;

    assert_eq!(registry.trigger_returning::<i32, _>("combine", (2, 3))?, vec![5, 200]);
    registry.remove_action("combine", sum_key)?;
    assert_eq!(registry.trigger_returning::<i32, _>("combine", (2, 3))?, vec![200]);

    let heard = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&heard);
    registry.add_typed::<fn(String), _>("announce", move |text: String| sink.borrow_mut().push(text))?;
    let text = String::from("hello");
    registry.trigger("announce", (&text,))?;
    assert_eq!(*heard.borrow(), vec!["hello".to_string()]);

    assert_eq!(
        registry.trigger("missing", ()),
        Err(SignalError::UnknownSignal("missing".to_string()))
    );
    assert!(matches!(
        registry.add_action("announce", &sum),
        Err(SignalError::ActionMismatch { .. })
    ));
    assert!(matches!(
        registry.trigger("announce", (1,)),
        Err(SignalError::ArgumentMismatch { .. })
    ));
    assert_eq!(registry.names(), vec!["announce".to_string(), "combine".to_string()]);
    Ok(())
}

#[test]
fn reentrant_registry_calls_report_busy() -> anyhow::Result<()> {
    initialize_tracing();
    let registry = SignalRegistry::new();
    registry.add::<fn()>("outer")?;
    registry.add::<fn()>("inner")?;

    let outcome = Rc::new(RefCell::new(None));
    let handle = Rc::downgrade(&registry);
    let slot = Rc::clone(&outcome);
    registry.add_typed::<fn(), _>("outer", move || {
        if let Some(registry) = handle.upgrade() {
            *slot.borrow_mut() = Some(registry.trigger("inner", ()));
        }
    })?;

    registry.trigger("outer", ())?;
    assert_eq!(*outcome.borrow(), Some(Err(SignalError::RegistryBusy)));
    Ok(())
}

#[test]
fn registry_queries_stay_accurate_during_dispatch() -> anyhow::Result<()> {
    initialize_tracing();
    let registry = SignalRegistry::new();
    registry.add::<fn()>("outer")?;
    registry.add::<fn(u8)>("other")?;

    let observed = Rc::new(RefCell::new(None));
    let handle = Rc::downgrade(&registry);
    let slot = Rc::clone(&observed);
    registry.add_typed::<fn(), _>("outer", move || {
        if let Some(registry) = handle.upgrade() {
            *slot.borrow_mut() = Some((
                registry.contains("outer"),
                registry.len(),
                registry.names(),
                registry.is_empty(),
            ));
        }
    })?;

    registry.trigger("outer", ())?;
    assert_eq!(
        *observed.borrow(),
        Some((
            true,
            2,
            vec!["other".to_string(), "outer".to_string()],
            false
        ))
    );

    registry.remove_signal("other")?;
    registry.trigger("outer", ())?;
    assert_eq!(
        *observed.borrow(),
        Some((true, 1, vec!["outer".to_string()], false))
    );
    Ok(())
}
