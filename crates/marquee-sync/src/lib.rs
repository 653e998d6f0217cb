//! Editor-side module and define synchronization for Marquee projects.

mod defines;
mod descriptor;
mod error;
mod gate;
mod layout;
mod platform;
mod settings;
mod sync;

pub use defines::*;
pub use descriptor::*;
pub use error::*;
pub use gate::*;
pub use layout::*;
pub use platform::*;
pub use settings::*;
pub use sync::*;
