//! Frame loop hook: builds the machine and drives it from
//! `requestAnimationFrame`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use slot_core::{EventBus, GameEvent, MachineLayout, RandomSymbols, SlotConfig, SlotMachine};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::assets::SymbolImages;
use crate::clock::PerformanceClock;
use crate::draw;

pub type BrowserMachine = SlotMachine<RandomSymbols, PerformanceClock>;

/// Handle returned by `use_slot_loop`.
#[derive(Clone)]
pub struct SlotLoopHandle {
    machine: Rc<RefCell<Option<BrowserMachine>>>,
    layout: Rc<RefCell<Option<MachineLayout>>>,
}

impl SlotLoopHandle {
    /// Starts a spin if the canvas point (`x`, `y`) lies on the SPIN control.
    pub fn click(&self, x: f64, y: f64) -> bool {
        self.is_over_button(x, y) && self.spin()
    }

    pub fn spin(&self) -> bool {
        self.machine.borrow_mut().as_mut().is_some_and(SlotMachine::spin)
    }

    pub fn is_over_button(&self, x: f64, y: f64) -> bool {
        self.layout
            .borrow()
            .as_ref()
            .is_some_and(|layout| layout.spin_button.contains(x, y))
    }
}

/// Resizes the canvas to the window. Returns true if the size changed.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fit_to_window(canvas: &HtmlCanvasElement) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let size = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or_default() as u32;
    let width = size(window.inner_width());
    let height = size(window.inner_height());

    if canvas.width() == width && canvas.height() == height {
        return false;
    }
    canvas.set_width(width);
    canvas.set_height(height);
    true
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

#[hook]
pub fn use_slot_loop(canvas_ref: NodeRef, config: SlotConfig, bus: Arc<EventBus>) -> SlotLoopHandle {
    let machine = use_mut_ref(|| None::<BrowserMachine>);
    let layout = use_mut_ref(|| None::<MachineLayout>);

    {
        let machine = machine.clone();
        let layout = layout.clone();

        use_effect_with(config, move |config| {
            match SlotMachine::from_config(config.clone(), PerformanceClock::new(), bus.clone()) {
                Ok(built) => {
                    *machine.borrow_mut() = Some(built);
                    *layout.borrow_mut() = None;
                    bus.publish(&GameEvent::AppStarted);
                }
                Err(e) => tracing::error!(error = %e, "Failed to build slot machine"),
            }

            let images = SymbolImages::load(&config.symbols);
            let config = config.clone();
            let frame_id = Rc::new(Cell::new(None::<i32>));
            let frame_id_cleanup = frame_id.clone();

            // Closure reference for cleanup (to break reference cycle)
            let closure: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
            let closure_clone = closure.clone();
            let closure_cleanup = closure.clone();

            *closure.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    let mut current_layout = layout.borrow_mut();
                    if fit_to_window(&canvas) || current_layout.is_none() {
                        *current_layout = Some(MachineLayout::centered(
                            &config,
                            f64::from(canvas.width()),
                            f64::from(canvas.height()),
                        ));
                    }

                    let mut machine = machine.borrow_mut();
                    if let (Some(machine), Some(layout)) = (machine.as_mut(), current_layout.as_ref()) {
                        machine.render_frame();
                        if let Some(ctx) = context_2d(&canvas) {
                            draw::render(&ctx, machine, layout, &images);
                        }
                    }
                }

                // Request next frame
                if let Some(window) = web_sys::window() {
                    if let Some(ref cb) = *closure_clone.borrow() {
                        frame_id.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
                    }
                }
            }));

            // Start the loop
            if let Some(window) = web_sys::window() {
                if let Some(ref cb) = *closure.borrow() {
                    frame_id_cleanup.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
                }
            }

            move || {
                if let Some(id) = frame_id_cleanup.get() {
                    if let Some(window) = web_sys::window() {
                        let _ = window.cancel_animation_frame(id);
                    }
                }
                *closure_cleanup.borrow_mut() = None;
            }
        });
    }

    SlotLoopHandle { machine, layout }
}
