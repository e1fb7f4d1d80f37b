//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: platform, status, and the theme toggle glyph
//! - `Message`: a single conversation entry
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: single-line question editor
//! - `PlatformSelect`: the platform dropdown
//! - `MessageList`: scrollable conversation view
//!
//! Components receive external data as props (struct fields), never by
//! reaching into global state. Each file keeps its state type, event type,
//! rendering, event handling, and tests together.
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (Top status bar + theme toggle)
//! ├── message.rs         (Single message renderer)
//! ├── message_list.rs    (Scrollable message container)
//! ├── platform_select.rs (Platform dropdown)
//! └── input_box/         (Question editor + cursor)
//! ```

pub mod input_box;
pub mod message;
pub mod message_list;
pub mod platform_select;
mod title_bar;

pub use input_box::{INPUT_HEIGHT, InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use platform_select::{PlatformEvent, PlatformSelect};
pub use title_bar::TitleBar;
