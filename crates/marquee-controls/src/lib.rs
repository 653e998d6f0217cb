//! Capability-based controllers binding Marquee widgets to behaviour delegates.

mod button;
mod entity;
mod group;
#[cfg(feature = "scroller")]
mod scroller;
mod tabs;
mod toggle;
mod view;
mod widget;

pub use button::*;
pub use entity::*;
pub use group::*;
#[cfg(feature = "scroller")]
pub use scroller::*;
pub use tabs::*;
pub use toggle::*;
pub use view::*;
pub use widget::*;
