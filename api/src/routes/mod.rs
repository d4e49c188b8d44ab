//! API route definitions

pub mod items;
pub mod markets;
pub mod notes;
pub mod sectors;
pub mod status;
pub mod watchlist;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Market routes
        .route("/markets", get(markets::get_markets))
        .route("/markets/exploding", get(markets::get_new_and_exploding))
        .route("/markets/focus", get(markets::get_daily_focus))
        .route("/search", get(markets::search_coins))
        .route("/trending", get(markets::get_trending))
        // Sector routes
        .route("/sectors", get(sectors::get_sectors))
        .route("/sectors/:id", get(sectors::get_sector))
        // Watchlist routes
        .route("/watchlist", get(watchlist::get_watchlist))
        .route(
            "/watchlist/:id",
            post(watchlist::toggle_watch).delete(watchlist::unwatch),
        )
        // Notes routes
        .route("/notes", get(notes::get_notes).put(notes::put_notes))
        // Refresh status
        .route("/status", get(status::get_status))
}
