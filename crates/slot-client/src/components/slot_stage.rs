//! Full-window canvas hosting the slot machine.

use slot_core::SlotConfig;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::app::SlotContext;
use crate::hooks::use_slot_loop;

#[derive(Properties, PartialEq)]
pub struct SlotStageProps {
    pub config: SlotConfig,
}

/// Canvas position of a mouse event.
fn canvas_point(canvas_ref: &NodeRef, event: &MouseEvent) -> Option<(f64, f64)> {
    let canvas = canvas_ref.cast::<HtmlCanvasElement>()?;
    let rect = canvas.get_bounding_client_rect();
    Some((
        f64::from(event.client_x()) - rect.left(),
        f64::from(event.client_y()) - rect.top(),
    ))
}

#[function_component(SlotStage)]
pub fn slot_stage(props: &SlotStageProps) -> Html {
    let slot = use_context::<SlotContext>().unwrap_or_else(|| {
        tracing::warn!("SlotContext not found, events will not be logged");
        SlotContext::default()
    });
    let canvas_ref = use_node_ref();
    let hovering = use_state(|| false);
    let handle = use_slot_loop(canvas_ref.clone(), props.config.clone(), slot.bus.clone());

    let onclick = {
        let handle = handle.clone();
        let canvas_ref = canvas_ref.clone();
        Callback::from(move |e: MouseEvent| {
            if let Some((x, y)) = canvas_point(&canvas_ref, &e) {
                handle.click(x, y);
            }
        })
    };

    let onmousemove = {
        let canvas_ref = canvas_ref.clone();
        let hovering = hovering.clone();
        Callback::from(move |e: MouseEvent| {
            let over = canvas_point(&canvas_ref, &e).is_some_and(|(x, y)| handle.is_over_button(x, y));
            if over != *hovering {
                hovering.set(over);
            }
        })
    };

    let class = classes!("slot-stage", (*hovering).then_some("clickable"));

    html! {
        <canvas ref={canvas_ref} {class} {onclick} {onmousemove} />
    }
}
