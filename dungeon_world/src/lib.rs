//! # Dungeon World
//!
//! The world-side collaborators of the dungeon puzzle system: entity ids,
//! creatures and their inventories, items (including the key factory), props
//! with their trigger chains, doors, regions and notice delivery.
//!
//! Nothing in this crate knows about puzzles. Props that should report back to
//! a puzzle carry an [`EventForwarder`] in their trigger chain, and triggering
//! such a prop yields a [`PropEvent`] for the caller to route.
//!
//! ## Region affinity
//!
//! Props are shared through [`PropHandle`] (`Rc<RefCell<Prop>>`). These handles
//! are deliberately `!Send`: a region and everything registered in it is
//! driven by a single simulation loop and never crosses threads.

pub mod entities;
pub mod mechanics;
pub mod notice;
pub mod props;
pub mod region;

pub use entities::*;
pub use mechanics::*;
pub use notice::*;
pub use props::*;
pub use region::*;
