pub mod notification;
pub mod push_event;

pub use notification::{NotificationEntry, NotificationLog, MAX_NOTIFICATIONS};
pub use push_event::{PushEvent, PushEventKind, PushNotification};
