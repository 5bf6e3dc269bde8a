mod friends;
mod hobby;
mod similar;
mod user;

pub use friends::{FriendRequest, FriendStatus};
pub use hobby::{Hobby, HobbyId, HobbyRef};
pub use similar::{FilterParams, PageData, SimilarUser};
pub use user::{Avatar, Profile, ProfileUpdate, User};

use time::{Date, PrimitiveDateTime};

time::serde::format_description!(day_stamp, Date, "[year]-[month]-[day]");
time::serde::format_description!(
    minute_stamp,
    PrimitiveDateTime,
    "[year]-[month]-[day] [hour]:[minute]"
);
