pub use iconbutton_core::*;
