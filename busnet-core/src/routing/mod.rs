//! Shortest-path search over the transit network

pub mod dijkstra;
mod state;

pub use dijkstra::{dijkstra_travel_times, travel_time_between, travel_time_by_id};
