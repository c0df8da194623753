//! Controller layer: navigation notifications turned into effect cues, and
//! egui input turned into navigation requests.

pub mod events;
pub mod orchestration;
