mod central_panel;
mod designs_panel;
mod message_bar;
mod tools_panel;
mod tutorial_window;

pub use central_panel::central_panel;
pub use designs_panel::designs_panel;
pub use message_bar::message_bar;
pub use tools_panel::tools_panel;
pub use tutorial_window::tutorial_window;
