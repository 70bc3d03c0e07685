//! Domain types for the club API.
//!
//! These types represent validated domain objects separate from database row
//! types. They serialize to the camelCase JSON the REST surface exposes.

pub mod booking;
pub mod caddie;
pub mod event;
pub mod loyalty;
pub mod member;
pub mod menu;
pub mod notification;
pub mod order;
pub mod session;

pub use booking::Booking;
pub use caddie::Caddie;
pub use event::{Event, EventRegistration};
pub use loyalty::LoyaltyTransaction;
pub use member::{Member, User};
pub use menu::MenuItem;
pub use notification::Notification;
pub use order::{Order, OrderItem};
pub use session::{CurrentUser, session_keys};
