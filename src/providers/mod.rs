//! Provider-specific payload types and mock generators.
//!
//! Each provider has its own submodule defining the typed payload shapes
//! of its endpoint families and one mock generator per family. Generators
//! take the same parameters a live call would send and never perform I/O.

pub mod carbon_interface;
pub mod climate_trace;
pub mod nasa_power;
pub mod open_weather;
pub mod un_sdg;
pub mod world_bank;
