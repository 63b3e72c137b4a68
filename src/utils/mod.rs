pub use self::physics::*;
pub use self::voigt::*;

mod physics;
mod voigt;
