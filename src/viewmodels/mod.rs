pub mod panel_viewmodel;

pub use panel_viewmodel::NotificationPanelViewModel;
