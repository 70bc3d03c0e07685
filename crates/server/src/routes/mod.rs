//! HTTP route handlers for the club API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                          - Liveness check
//! GET    /health/ready                    - Readiness check (database ping)
//!
//! # Auth
//! POST   /api/auth/register               - Register a member account
//! POST   /api/auth/login                  - Login
//! POST   /api/auth/logout                 - Logout
//! GET    /api/auth/me                     - Current user + member profile
//!
//! # Members
//! GET    /api/members                     - List members (staff)
//! GET    /api/members/{id}                - Member detail (self or staff)
//! PATCH  /api/members/{id}                - Update profile (self or staff; tier admin-only)
//! DELETE /api/members/{id}                - Remove a member (admin)
//!
//! # Caddies
//! GET    /api/caddies                     - Roster (?available=true)
//! POST   /api/caddies                     - Add caddie (admin)
//! GET    /api/caddies/{id}                - Caddie detail
//! PATCH  /api/caddies/{id}                - Update caddie (admin)
//! DELETE /api/caddies/{id}                - Remove caddie (admin)
//!
//! # Bookings
//! GET    /api/bookings/slots?date=        - Tee sheet for a day
//! GET    /api/bookings                    - Own bookings; staff see all (?date=)
//! POST   /api/bookings                    - Book a tee time (member)
//! GET    /api/bookings/{id}               - Booking detail (owner or staff)
//! PATCH  /api/bookings/{id}               - Amend/reschedule (owner or staff)
//! DELETE /api/bookings/{id}               - Cancel (owner or staff)
//!
//! # Menu
//! GET    /api/menu                        - Available items (?category=), cached
//! POST   /api/menu                        - Add item (admin)
//! PATCH  /api/menu/{id}                   - Update item (admin)
//! DELETE /api/menu/{id}                   - Remove item (admin)
//!
//! # Orders
//! GET    /api/orders                      - Own orders; staff see all (?status=)
//! POST   /api/orders                      - Place an order (member)
//! GET    /api/orders/{id}                 - Order detail (owner or staff)
//! PATCH  /api/orders/{id}/status          - Advance kitchen status (staff)
//!
//! # Events
//! GET    /api/events                      - Upcoming events (?all=true for staff)
//! POST   /api/events                      - Schedule event (admin)
//! GET    /api/events/{id}                 - Event detail
//! PATCH  /api/events/{id}                 - Update event (admin)
//! DELETE /api/events/{id}                 - Cancel event (admin)
//! POST   /api/events/{id}/register        - Register (member)
//! DELETE /api/events/{id}/register        - Withdraw registration (member)
//! GET    /api/events/{id}/registrations   - Registration list (staff)
//!
//! # Loyalty
//! GET    /api/loyalty                     - Own balance + tier
//! GET    /api/loyalty/transactions        - Own ledger, newest first
//! POST   /api/loyalty/adjust              - Manual credit/debit (admin)
//!
//! # Notifications
//! GET    /api/notifications               - Own notifications (?unread=true)
//! POST   /api/notifications/{id}/read     - Mark one read
//! POST   /api/notifications/read-all      - Mark all read
//! ```

pub mod auth;
pub mod bookings;
pub mod caddies;
pub mod events;
pub mod loyalty;
pub mod members;
pub mod menu;
pub mod notifications;
pub mod orders;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the member routes router.
pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(members::list))
        .route(
            "/{id}",
            get(members::show)
                .patch(members::update)
                .delete(members::remove),
        )
}

/// Create the caddie routes router.
pub fn caddie_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(caddies::list).post(caddies::create))
        .route(
            "/{id}",
            get(caddies::show)
                .patch(caddies::update)
                .delete(caddies::remove),
        )
}

/// Create the booking routes router.
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(bookings::list).post(bookings::create))
        .route("/slots", get(bookings::slots))
        .route(
            "/{id}",
            get(bookings::show)
                .patch(bookings::update)
                .delete(bookings::cancel),
        )
}

/// Create the menu routes router.
pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::list).post(menu::create))
        .route("/{id}", patch(menu::update).delete(menu::remove))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list).post(orders::create))
        .route("/{id}", get(orders::show))
        .route("/{id}/status", patch(orders::update_status))
}

/// Create the event routes router.
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list).post(events::create))
        .route(
            "/{id}",
            get(events::show)
                .patch(events::update)
                .delete(events::cancel),
        )
        .route(
            "/{id}/register",
            post(events::register).delete(events::unregister),
        )
        .route("/{id}/registrations", get(events::registrations))
}

/// Create the loyalty routes router.
pub fn loyalty_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(loyalty::balance))
        .route("/transactions", get(loyalty::transactions))
        .route("/adjust", post(loyalty::adjust))
}

/// Create the notification routes router.
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list))
        .route("/{id}/read", post(notifications::mark_read))
        .route("/read-all", post(notifications::mark_all_read))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/members", member_routes())
        .nest("/api/caddies", caddie_routes())
        .nest("/api/bookings", booking_routes())
        .nest("/api/menu", menu_routes())
        .nest("/api/orders", order_routes())
        .nest("/api/events", event_routes())
        .nest("/api/loyalty", loyalty_routes())
        .nest("/api/notifications", notification_routes())
}
