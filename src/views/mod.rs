pub mod panel_view;
pub mod notification_panel;

pub use panel_view::{describe_panel, LivePanel, PanelAction, PanelView, StatusLabel};
pub use notification_panel::render_notification_panel;
