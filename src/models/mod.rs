pub mod admin;
pub mod application;
pub mod campus;
pub mod room;
pub mod room_type;

pub use admin::Admin;
pub use application::{Application, ApplicationStatus};
pub use campus::Campus;
pub use room::Room;
pub use room_type::RoomType;
