pub mod analytics;
pub mod livestream;
pub mod media;
pub mod notification;
pub mod post;
pub mod user;

pub use analytics::AnalyticsStore;
pub use livestream::LivestreamStore;
pub use media::MediaStore;
pub use notification::NotificationStore;
pub use post::{PostSort, PostStore};
pub use user::UserStore;
