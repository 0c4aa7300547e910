pub use super::alliance::Entity as Alliance;
pub use super::alliance_setting::Entity as AllianceSetting;
pub use super::furnace_change::Entity as FurnaceChange;
pub use super::invalid_id::Entity as InvalidId;
pub use super::member::Entity as Member;
pub use super::nickname_change::Entity as NicknameChange;
