pub mod consts;
pub mod display;
pub mod engine;
pub mod error;
pub mod grid;
pub mod io;
pub mod mix;
pub mod pad;
pub mod pipeline;
pub mod primitive;
pub mod reconstruct;
pub mod region;
pub mod spectral;
pub mod transform;
