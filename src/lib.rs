//! Spatial reasoning engine for an AI-assisted infinite canvas.
//!
//! The engine turns a read-only snapshot of canvas shapes into layout
//! decisions an agent can act on: grouped row layouts, enclosing frames,
//! cluster overviews of large canvases, and non-overlapping positions for new
//! shapes. It never mutates the canvas; every operation returns placement
//! instructions or a serializable summary, and applying them is the caller's
//! job.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | Per-session alias registries and async tool dispatch |
//! | [`tools`] | Agent tool definitions and typed tool inputs |
//! | [`refs`] | Short `s1, s2, ...` aliases for canonical shape ids |
//! | [`group`] | Grouping strategies (grid, type, metadata, spatial cell) |
//! | [`layout`] | Row-packing layout of grouped shapes |
//! | [`frame`] | Bounding frame around a shape subset |
//! | [`cluster`] | Grid flood-fill clustering and canvas overview |
//! | [`place`] | Non-overlapping placement search |
//! | [`shape`] | Snapshot data model, canonical ids, one-line briefs |
//! | [`geom`] | Points, rects, and bounds |
//! | [`config`] | `EngineConfig` and its `SPATIAL_*` environment overrides |
//! | [`consts`] | Default policy values (shape size, cell size, row width, etc.) |
//! | [`error`] | `SpatialError` and the `ErrorCode` trait |

pub mod cluster;
pub mod config;
pub mod consts;
pub mod error;
pub mod frame;
pub mod geom;
pub mod group;
pub mod layout;
pub mod place;
pub mod refs;
pub mod session;
pub mod shape;
pub mod tools;
