// Terminal UI using Ratatui

pub mod components;
pub mod events;
pub mod focus;
pub mod header;
pub mod headless;
pub mod help;
pub mod listeners;
pub mod registry;
pub mod router;
pub mod shell;
pub mod sidebar;
pub mod state;
pub mod tabs;
pub mod viewport;
pub mod widgets;

pub use events::{handle_key, handle_mouse, run_ui};
pub use help::{HelpModal, HelpModalState, HelpSection};
pub use registry::{NavigationEntry, NavigationRegistry};
pub use router::ContentRouter;
pub use shell::Shell;
pub use state::AppState;
pub use viewport::Viewport;
