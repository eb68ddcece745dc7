/*!
# Multi-Agent Path Finding Building Blocks

This module provides the two primitives that outer MAPF coordinators
(prioritized planning, WHCA*, conflict-based search) compose:

- [`ReservationTable`]: time-indexed vertex and edge occupancy shared across
  agents, plus additive per-(time, vertex) weights.
- [`SpaceTimeAStar`]: single-agent planning in the product state space of
  vertices and time, respecting the reservation table.

The coordinators themselves are out of scope; they own the reservation
table, serialize updates to it, and hand it by reference to space-time
queries.
*/

pub mod reservation;
pub mod space_time;

pub use reservation::ReservationTable;
pub use space_time::SpaceTimeAStar;
