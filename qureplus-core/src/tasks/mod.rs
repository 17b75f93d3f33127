pub mod session_sweeper;

pub use session_sweeper::spawn_session_sweeper;
