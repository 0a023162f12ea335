pub mod buttons;
pub mod keyboard;

pub use buttons::wire_nav_buttons;
pub use keyboard::wire_keydown;
