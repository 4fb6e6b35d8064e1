//! Pure scheduling core: effective status, occupancy, track layout,
//! calendar windows and status reconciliation planning.
//!
//! Everything in this module is side-effect free and takes `now` as a
//! parameter; persistence and clocks live in the service layer.

pub mod calendar;
pub mod reconcile;
pub mod status;
pub mod tracks;

pub use calendar::{classify_day, day_starts, logical_day_start};
pub use reconcile::{plan_asset_status, plan_status_writes};
pub use status::{effective_status, is_occupying, parse_instant, resolve};
pub use tracks::{layout_tracks, TrackLayout};
