//! Secret Santa entry point
//!
//! Web: wires the page's dropdown and buttons to the command handlers.
//! Native: prints the current assignments from a JSON file store.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, HtmlSelectElement, KeyboardEvent, MouseEvent};

    use secret_santa::persistence::LocalStorage;
    use secret_santa::{
        AssignmentStore, Error, ResetOutcome, Settings, reset_assignments, show_assignment,
        startup_check,
    };

    const RESET_PROMPT: &str = "Are you sure you want to reset all Secret Santa assignments? \
        This will generate completely new assignments for everyone!";

    /// Page state shared between event handlers
    struct App {
        store: AssignmentStore<LocalStorage>,
        rng: Pcg32,
    }

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn select_element(document: &Document) -> Option<HtmlSelectElement> {
        document
            .get_element_by_id("nameSelect")?
            .dyn_into::<HtmlSelectElement>()
            .ok()
    }

    fn set_result_visible(document: &Document, visible: bool) {
        if let Some(el) = document
            .get_element_by_id("assignmentResult")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let display = if visible { "block" } else { "none" };
            let _ = el.style().set_property("display", display);

            if visible {
                let opts = web_sys::ScrollIntoViewOptions::new();
                opts.set_behavior(web_sys::ScrollBehavior::Smooth);
                opts.set_block(web_sys::ScrollLogicalPosition::Center);
                el.scroll_into_view_with_scroll_into_view_options(&opts);
            }
        }
    }

    /// Reveal the receiver for whoever is selected in the dropdown
    fn on_show(app: &Rc<RefCell<App>>) {
        let document = document();
        let selected = select_element(&document).map(|s| s.value());

        let mut guard = app.borrow_mut();
        let App { store, rng } = &mut *guard;
        match show_assignment(store, selected.as_deref(), rng) {
            Ok(receiver) => {
                if let Some(el) = document.get_element_by_id("recipientName") {
                    el.set_text_content(Some(&receiver));
                }
                set_result_visible(&document, true);
            }
            Err(Error::NoSelection) => alert("Please select your name from the dropdown!"),
            Err(e) => {
                log::error!("Could not show assignment: {}", e);
                alert(&format!("Something went wrong: {}", e));
            }
        }
    }

    /// Admin reset, gated by a confirmation dialog
    fn on_reset(app: &Rc<RefCell<App>>) {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(RESET_PROMPT).ok())
            .unwrap_or(false);

        match reset_assignments(&mut app.borrow_mut().store, confirmed) {
            Ok(ResetOutcome::Reset) => {
                let document = document();
                set_result_visible(&document, false);
                if let Some(select) = select_element(&document) {
                    select.set_value("");
                }
                alert("All assignments have been reset! New assignments will be generated.");
            }
            Ok(ResetOutcome::Cancelled) => {}
            Err(e) => log::error!("Reset failed: {}", e),
        }
    }

    fn setup_handlers(app: Rc<RefCell<App>>) {
        let document = document();

        if let Some(btn) = document.get_element_by_id("getAssignmentBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                on_show(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Enter on the dropdown submits too
        if let Some(select) = document.get_element_by_id("nameSelect") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Enter" {
                    on_show(&app);
                }
            });
            let _ =
                select.add_event_listener_with_callback("keypress", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("resetBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                on_reset(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Secret Santa starting...");

        let storage = match LocalStorage::open() {
            Ok(storage) => storage,
            Err(e) => {
                log::error!("{}", e);
                alert("This page needs LocalStorage to remember assignments.");
                return;
            }
        };

        let settings = Settings::load(&storage);
        let mut store = settings.store(storage);

        let seed = js_sys::Date::now() as u64;
        let mut rng = Pcg32::seed_from_u64(seed);

        match startup_check(&mut store, &mut rng) {
            Ok(status) => log::info!("Startup: {:?}", status),
            Err(e) => log::error!("Startup check failed: {}", e),
        }

        setup_handlers(Rc::new(RefCell::new(App { store, rng })));
        log::info!("Secret Santa ready");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use secret_santa::persistence::FileStorage;
    use secret_santa::{Settings, startup_check};

    env_logger::init();
    log::info!("Secret Santa (native) starting...");

    let path = std::env::var("SECRET_SANTA_STORE").unwrap_or_else(|_| "secret_santa.json".into());
    let storage = match FileStorage::open(&path) {
        Ok(storage) => storage,
        Err(e) => {
            log::error!("Could not open {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let settings = Settings::load(&storage);
    let mut store = settings.store(storage);
    let mut rng = Pcg32::from_rng(&mut rand::rng());

    let assignments = match startup_check(&mut store, &mut rng)
        .and_then(|status| {
            log::info!("Startup: {:?}", status);
            store.get_assignments(&mut rng)
        }) {
        Ok(assignments) => assignments,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    for giver in store.roster().iter() {
        if let Some(receiver) = assignments.get(giver) {
            println!("{giver} -> {receiver}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
