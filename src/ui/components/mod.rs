pub mod card_editor;
pub mod card_face;
pub mod deck_bar;
pub mod menu;
pub mod study_sidebar;
pub mod summary;
pub mod topic_list;
