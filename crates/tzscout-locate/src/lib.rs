//! Resolving the user's UTC offset bucket from their location.
//!
//! Geolocation goes through an HTTP service, points are mapped to IANA zones
//! with the bundled boundary polygons, and the offset in effect at the
//! requested instant is computed with `chrono-tz`.

pub mod geo;
pub mod resolver;
pub mod zone;
