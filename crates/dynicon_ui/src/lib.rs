//! UI components and theming for Dynicon.

pub mod assets;
pub mod button;
pub mod icon;
pub mod theme;

pub use assets::IconAssets;
pub use button::{Button, ButtonVariant};
pub use icon::Icon;
pub use theme::{DemoTheme, ThemeColors};
