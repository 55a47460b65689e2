//! UI components: the particle field hero and the work-item board.

pub mod board;
pub mod particle_field;
