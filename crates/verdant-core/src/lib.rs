pub mod background;
pub mod color;
pub mod constants;
pub mod particles;
pub mod random;
pub mod shapes;
pub mod stage;
pub mod surface;
pub mod viewport;

pub use background::*;
pub use color::*;
pub use particles::*;
pub use random::*;
pub use stage::*;
pub use surface::*;
pub use viewport::*;
