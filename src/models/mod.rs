pub mod folder_entry;
pub mod icon_file;
pub mod view_state;

pub use folder_entry::*;
pub use icon_file::*;
pub use view_state::*;
