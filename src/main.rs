//! Sort Visualiser entry point
//!
//! On wasm32 this wires the page's inputs and buttons to the visualiser and
//! mirrors the bar view into `div.vertical-bar` elements inside the first
//! element with id or class `bar-container`. Natively it replays sorts
//! headlessly on a virtual clock.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

    use sort_visualiser::playback::TimeoutScheduler;
    use sort_visualiser::view::{BarColor, BarList, BarView};
    use sort_visualiser::{Settings, SortAlgorithm, Value, Visualiser, bar_width_percent};

    type App = Visualiser<TimeoutScheduler>;

    /// The page's bar container, matched by id or by class
    const BAR_CONTAINER: &str = "#bar-container, .bar-container";

    /// Bar view backed by DOM elements
    struct DomBars {
        document: Document,
        container: Element,
        model: BarList,
        elements: Vec<HtmlElement>,
    }

    impl DomBars {
        fn new(document: Document, container: Element) -> Self {
            Self {
                document,
                container,
                model: BarList::default(),
                elements: Vec::new(),
            }
        }

        fn style(&self, index: usize, property: &str, value: &str) {
            if let Some(el) = self.elements.get(index) {
                if let Err(e) = el.style().set_property(property, value) {
                    log::warn!("Failed to set {} on bar {}: {:?}", property, index, e);
                }
            }
        }
    }

    impl BarView for DomBars {
        fn set_height(&mut self, index: usize, height: Value) {
            self.model.set_height(index, height);
            self.style(index, "height", &format!("{}%", height));
        }

        fn set_color(&mut self, index: usize, color: BarColor) {
            self.model.set_color(index, color);
            self.style(index, "background-color", color.css());
        }

        fn reset(&mut self, heights: &[Value]) {
            self.model.reset(heights);
            self.container.set_inner_html("");
            self.elements.clear();

            let width = format!("{}%", bar_width_percent(heights.len()));
            for &height in heights {
                let Ok(el) = self.document.create_element("div") else {
                    log::warn!("Failed to create bar element");
                    continue;
                };
                el.set_class_name("vertical-bar");
                let Ok(el) = el.dyn_into::<HtmlElement>() else {
                    continue;
                };
                let style = el.style();
                let _ = style.set_property("height", &format!("{}%", height));
                let _ = style.set_property("width", &width);
                let _ = style.set_property("background-color", BarColor::Idle.css());
                if let Err(e) = self.container.append_child(&el) {
                    log::warn!("Failed to append bar: {:?}", e);
                }
                self.elements.push(el);
            }
        }

        fn heights(&self) -> Vec<Value> {
            self.model.heights()
        }

        fn len(&self) -> usize {
            self.model.len()
        }
    }

    /// Read a text input by id ("" if missing)
    fn input_value(document: &Document, id: &str) -> String {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    /// Dim and disable (or restore) every sort button
    fn set_sort_buttons_enabled(document: &Document, enabled: bool) {
        for algorithm in SortAlgorithm::ALL {
            let Some(btn) = document
                .get_element_by_id(algorithm.button_id())
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let style = btn.style();
            let _ = style.set_property("opacity", if enabled { "1" } else { "0.5" });
            let _ = style.set_property("pointer-events", if enabled { "auto" } else { "none" });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Sort Visualiser starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let container = document
            .query_selector(BAR_CONTAINER)
            .ok()
            .flatten()
            .expect("no bar container");

        let settings = Settings::from_inputs(
            &input_value(&document, "num-bars"),
            &input_value(&document, "delay-interval"),
        );
        let seed = js_sys::Date::now() as u64;
        let view = Rc::new(RefCell::new(DomBars::new(document.clone(), container)));
        let app = Rc::new(RefCell::new(Visualiser::new(
            TimeoutScheduler::new(),
            view,
            settings,
            seed,
        )));
        log::info!("Visualiser initialized with seed: {}", seed);

        {
            let document = document.clone();
            app.borrow()
                .session()
                .guard()
                .set_listener(move |enabled| set_sort_buttons_enabled(&document, enabled));
        }

        setup_generate_button(&document, app.clone());
        for algorithm in SortAlgorithm::ALL {
            setup_sort_button(&document, app.clone(), algorithm);
        }

        log::info!("Sort Visualiser running!");
    }

    fn setup_generate_button(document: &Document, app: Rc<RefCell<App>>) {
        let Some(btn) = document.get_element_by_id("generate-values-btn") else {
            log::warn!("No generate button");
            return;
        };
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut app = app.borrow_mut();
            app.set_bar_count_input(&input_value(&doc, "num-bars"));
            let _ = app.generate_values();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_sort_button(document: &Document, app: Rc<RefCell<App>>, algorithm: SortAlgorithm) {
        let Some(btn) = document.get_element_by_id(algorithm.button_id()) else {
            log::debug!("No button for {}", algorithm.as_str());
            return;
        };
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut app = app.borrow_mut();
            app.set_speed_input(&input_value(&doc, "delay-interval"));
            let _ = app.request_sort(algorithm);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use sort_visualiser::settings::parse_bar_count;
    use sort_visualiser::{
        BarList, BarView, Settings, SortAlgorithm, VirtualScheduler, Visualiser, trace,
    };

    env_logger::init();
    log::info!("Sort Visualiser (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let mut settings = Settings::default();
    let mut seed = 12345;
    for arg in &args {
        if let Some(n) = arg.strip_prefix("--bars=") {
            settings.bar_count = parse_bar_count(n);
        } else if let Some(s) = arg.strip_prefix("--seed=") {
            seed = s.parse().unwrap_or(seed);
        } else if let Some(s) = arg.strip_prefix("--speed=") {
            settings.set_speed_input(s);
        }
    }
    let mut algorithms: Vec<SortAlgorithm> =
        args.iter().filter_map(|a| SortAlgorithm::from_str(a)).collect();
    if algorithms.is_empty() {
        algorithms = SortAlgorithm::ALL.to_vec();
    }

    for algorithm in algorithms {
        let scheduler = VirtualScheduler::new();
        let bars = Rc::new(RefCell::new(BarList::default()));
        let mut vis = Visualiser::new(scheduler.clone(), bars.clone(), settings.clone(), seed);

        if json {
            let t = trace::trace(algorithm, vis.values().as_slice());
            match serde_json::to_string(&t) {
                Ok(out) => println!("{}", out),
                Err(e) => log::error!("Failed to serialize trace: {}", e),
            }
        }

        let total = vis.request_sort(algorithm).unwrap_or(0);
        let fired = scheduler.run_until_idle();
        let sorted = bars.borrow().heights().is_sorted();
        log::info!(
            "{}: {} bars, {} ops fired, {} ms at {} ms/tick, sorted: {}",
            algorithm.as_str(),
            bars.borrow().len(),
            fired,
            total,
            settings.interval_ms(),
            sorted
        );
    }
}
