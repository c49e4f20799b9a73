pub mod analytics;
pub mod livestream;
pub mod media;
pub mod notification;
pub mod post;
pub mod user;

pub use analytics::{Analytics, AnalyticsAction};
pub use livestream::{Livestream, StreamStatus};
pub use media::{MediaKind, MediaRecord};
pub use notification::{Notification, NotificationKind};
pub use post::{MediaAttachment, Post};
pub use user::{User, UserSnapshot};
