//! Desktop window for the mystic orb.
//!
//! A macroquad application that shows the live orb next to a name form,
//! reveals predictions on a card, and exports the card as a PNG.

pub mod app;
pub mod input;
pub mod options;
pub mod theme;
pub mod view;
pub mod widget;
