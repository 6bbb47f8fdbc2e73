// ============================================================================
// NOTIFICATION PANEL VIEW - Render DOM del panel (Rust puro)
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{on_click, ClickListener, ElementBuilder};
use crate::models::notification::NotificationEntry;
use crate::views::panel_view::{
    LivePanel, PanelAction, PanelView, DASHBOARD_LINK_TEXT, DASHBOARD_URL, ENV_EXAMPLE_LINE,
    HISTORY_TITLE, NOT_CONFIGURED_TITLE, SERVICE_WORKER_PATH, SUBTITLE, TITLE,
};

/// Panel renderizado y los listeners de sus botones.
/// Los listeners deben vivir mientras el elemento esté montado.
pub struct RenderedPanel {
    pub element: Element,
    pub listeners: Vec<ClickListener>,
}

/// Renderizar el panel completo
pub fn render_notification_panel(
    view: &PanelView,
    on_action: Rc<dyn Fn(PanelAction)>,
) -> Result<RenderedPanel, JsValue> {
    match view {
        PanelView::NotConfigured => Ok(RenderedPanel {
            element: render_not_configured()?,
            listeners: Vec::new(),
        }),
        PanelView::Live(panel) => render_live_panel(panel, on_action),
    }
}

/// Panel de instrucciones cuando falta ONESIGNAL_APP_ID
fn render_not_configured() -> Result<Element, JsValue> {
    let env_code = ElementBuilder::new("code")?.text(".env").build();
    let intro = ElementBuilder::new("p")?
        .class("subtitle")
        .append_text("Create a ")?
        .child(env_code)?
        .append_text(" file in the project root with:")?
        .build();

    let env_line = ElementBuilder::new("pre")?
        .class("env-example")
        .text(ENV_EXAMPLE_LINE)
        .build();

    let dashboard_link = ElementBuilder::new("a")?
        .attr("href", DASHBOARD_URL)?
        .attr("target", "_blank")?
        .attr("rel", "noopener noreferrer")?
        .text(DASHBOARD_LINK_TEXT)
        .build();
    let worker_code = ElementBuilder::new("code")?
        .text(&format!("public/{}", SERVICE_WORKER_PATH))
        .build();
    let help = ElementBuilder::new("p")?
        .class("subtitle setup-help")
        .append_text("Get your App ID from ")?
        .child(dashboard_link)?
        .append_text(". Add the OneSignal Service Worker to ")?
        .child(worker_code)?
        .append_text(" (see README).")?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("card card-not-configured")
        .child(ElementBuilder::new("h1")?.text(NOT_CONFIGURED_TITLE).build())?
        .child(intro)?
        .child(env_line)?
        .child(help)?
        .build())
}

fn render_live_panel(panel: &LivePanel, on_action: Rc<dyn Fn(PanelAction)>) -> Result<RenderedPanel, JsValue> {
    let mut listeners = Vec::new();
    let button = match panel.action {
        Some(action) => {
            let (button, listener) = render_action_button(action, on_action)?;
            listeners.push(listener);
            Some(button)
        }
        None => None,
    };

    let status = ElementBuilder::new("span")?
        .class(panel.status.css_class())
        .text(panel.status.text())
        .build();

    let controls = ElementBuilder::new("div")?
        .class("panel-controls")
        .child(status)?
        .child_opt(button)?
        .build();

    let hint = ElementBuilder::new("p")?
        .class("panel-hint")
        .text(panel.hint)
        .build();

    let card = ElementBuilder::new("div")?
        .class("card")
        .child(controls)?
        .child(hint)?
        .build();

    let history = if panel.history.is_empty() {
        None
    } else {
        Some(render_history(&panel.history)?)
    };

    let element = ElementBuilder::new("div")?
        .class("notification-panel")
        .child(ElementBuilder::new("h1")?.text(TITLE).build())?
        .child(ElementBuilder::new("p")?.class("subtitle").text(SUBTITLE).build())?
        .child(card)?
        .child_opt(history)?
        .build();

    Ok(RenderedPanel { element, listeners })
}

fn render_action_button(
    action: PanelAction,
    on_action: Rc<dyn Fn(PanelAction)>,
) -> Result<(Element, ClickListener), JsValue> {
    let button = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class(action.css_class())
        .text(action.label())
        .build();

    let listener = on_click(&button, move |_e: web_sys::MouseEvent| {
        on_action(action);
    })?;

    Ok((button, listener))
}

/// Historial, más reciente primero
fn render_history(entries: &[NotificationEntry]) -> Result<Element, JsValue> {
    let mut list = ElementBuilder::new("ul")?;
    for entry in entries {
        list = list.child(render_history_item(entry)?)?;
    }

    Ok(ElementBuilder::new("div")?
        .class("card notification-log")
        .child(ElementBuilder::new("h4")?.text(HISTORY_TITLE).build())?
        .child(list.build())?
        .build())
}

fn render_history_item(entry: &NotificationEntry) -> Result<Element, JsValue> {
    let mut item = ElementBuilder::new("li")?
        .child(ElementBuilder::new("strong")?.text(&entry.title).build())?;
    if entry.has_body() {
        item = item.append_text(&format!(" — {}", entry.body))?;
    }
    Ok(item
        .append_text(" ")?
        .child(ElementBuilder::new("small")?.text(&format!("({})", entry.received_at)).build())?
        .build())
}
