pub mod controls;
pub mod gesture;
pub mod input;
pub mod layout;
pub mod router;

pub use controls::ControlKind;
pub use input::TouchEvent;
pub use layout::ControlLayout;
pub use router::TouchRouter;
