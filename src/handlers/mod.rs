mod admins;
mod lookups;
mod rooms;

pub use admins::{handle_reset_password, handle_signup};
pub use lookups::{handle_campuses, handle_room_statuses, handle_room_types};
pub use rooms::{
    handle_create_room, handle_get_room, handle_list_rooms, handle_occupancy, handle_room_applications,
    handle_toggle_room, handle_update_room,
};
