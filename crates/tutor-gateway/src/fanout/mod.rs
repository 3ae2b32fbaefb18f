//! Delivery fan-out
//!
//! Pushes room events to live connections and enqueues notification jobs
//! for recipients without one.

mod room_fanout;

pub use room_fanout::RoomFanout;
