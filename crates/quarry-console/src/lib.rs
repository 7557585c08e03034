//! Query console engine for Quarry.
//!
//! Five cooperating stages behind one [`QueryConsole`] instance:
//! schema directory → selection state → query synthesizer → query executor
//! → result renderer. Remote collaborators (metadata/data service, toast
//! sink, link construction) are injected traits, so every stage tests in
//! isolation without a UI host.

mod console;
mod directory;
mod render;
mod selection;
mod services;
mod synthesize;

pub use console::{ConsoleSnapshot, QueryConsole};
pub use directory::SchemaDirectory;
pub use render::{attach_links, derive_columns, sort_rows};
pub use selection::SelectionState;
pub use services::{BasePathLinker, LinkResolver, Notifier, RecordService, TracingNotifier};
pub use synthesize::synthesize_query;
