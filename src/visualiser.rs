//! Visualiser app model
//!
//! What the buttons and input fields talk to. Holds the settings, the
//! generated values and the playback session; the front end only forwards
//! events and renders the bar view.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::playback::{PlaybackSession, Scheduler};
use crate::settings::{Settings, SortAlgorithm};
use crate::trace::{self, ValueSequence};
use crate::view::BarView;

pub struct Visualiser<S: Scheduler> {
    settings: Settings,
    values: ValueSequence,
    rng: Pcg32,
    view: Rc<RefCell<dyn BarView>>,
    session: PlaybackSession<S>,
}

impl<S: Scheduler> Visualiser<S> {
    /// Create the visualiser and show a first random sequence
    pub fn new(
        scheduler: S,
        view: Rc<RefCell<dyn BarView>>,
        settings: Settings,
        seed: u64,
    ) -> Self {
        let session = PlaybackSession::new(scheduler, Rc::clone(&view), settings.interval_ms());
        let mut visualiser = Self {
            settings,
            values: ValueSequence::default(),
            rng: Pcg32::seed_from_u64(seed),
            view,
            session,
        };
        visualiser.generate_values();
        visualiser
    }

    /// Abandon any playback and show a fresh random sequence
    pub fn generate_values(&mut self) -> &ValueSequence {
        self.session.reset();
        self.values = ValueSequence::random(self.settings.bar_count, &mut self.rng);
        self.view.borrow_mut().reset(self.values.as_slice());
        log::info!("Generated {} values", self.values.len());
        &self.values
    }

    /// Animate `algorithm` over the bars as currently shown.
    ///
    /// Returns the playback duration in ms, or `None` if a sort is already
    /// animating.
    pub fn request_sort(&mut self, algorithm: SortAlgorithm) -> Option<u64> {
        if self.session.is_active() {
            log::debug!("{} ignored: playback in progress", algorithm.as_str());
            return None;
        }
        self.settings.algorithm = algorithm;
        self.session.set_interval_ms(self.settings.interval_ms());

        let heights = self.view.borrow().heights();
        let trace = trace::trace(algorithm, &heights);
        self.session.start(&trace)
    }

    pub fn set_bar_count_input(&mut self, input: &str) {
        self.settings.set_bar_count_input(input);
    }

    pub fn set_speed_input(&mut self, input: &str) {
        self.settings.set_speed_input(input);
    }

    /// The sequence last produced by [`Visualiser::generate_values`]
    pub fn values(&self) -> &ValueSequence {
        &self.values
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &PlaybackSession<S> {
        &self.session
    }

    pub fn is_sorting(&self) -> bool {
        self.session.is_active()
    }

    pub fn controls_enabled(&self) -> bool {
        self.session.guard().controls_enabled()
    }
}
