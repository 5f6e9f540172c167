mod class_info;
mod material_info;
mod user_role;

pub use class_info::ClassInfo;
pub use material_info::{MaterialInfo, MaterialType};
pub use user_role::UserRole;
