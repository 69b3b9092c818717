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
//! A small simulation loop wired together with signals.
//!
//! The world fires `on_update` every step and `on_birth` whenever an organism appears.
//! A statistics collector and a console visualizer subscribe without knowing about each
//! other; the visualizer is attached blind through a registry.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use signalbox::prelude::*;

#[signal_arg]
struct Organism {
    id: usize,
    fitness: f64,
}

#[derive(Default)]
struct Stats {
    births: usize,
    best: f64,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .compact()
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let registry = SignalRegistry::new();
    let mut on_update: Signal<fn(usize, f64) -> bool> = Signal::with_manager("on_update", &registry);
    registry.add::<fn(Organism)>("on_birth")?;

    let stats = Rc::new(RefCell::new(Stats::default()));
    let collector = Rc::clone(&stats);
    registry.add_typed::<fn(Organism), _>("on_birth", move |org: Organism| {
        let mut stats = collector.borrow_mut();
        stats.births += 1;
        stats.best = stats.best.max(org.fitness);
    })?;
    let visualize = Action::<fn(Organism)>::new("visualize", |org: Organism| {
        info!(id = org.id, fitness = org.fitness, "organism born");
    });
    registry.add_action("on_birth", &visualize)?;

    let checkpoint = on_update.add_action(|step: usize| step % 4 == 0);
    let watcher = Rc::clone(&stats);
    on_update.add_action(move |_: usize, mean: f64| mean < watcher.borrow().best);

    let mut mean = 0.0;
    for step in 1..=8 {
        let organism = Organism {
            id: step,
            fitness: (step as f64).sqrt(),
        };
        mean += (organism.fitness - mean) / step as f64;
        registry.trigger("on_birth", (&organism,))?;

        let flags = on_update.trigger(step, mean);
        info!(step, mean, ?flags, "update");
        if step == 4 {
            on_update.remove(checkpoint)?;
        }
    }

    let stats = stats.borrow();
    info!(births = stats.births, best = stats.best, signals = registry.records().len(), "done");
    Ok(())
}
