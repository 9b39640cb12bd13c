pub mod button;

pub use button::{ButtonProps, ButtonSize, ButtonType, base_button, secondary_button};
