pub mod calendar_view;
pub mod closet_list;
pub mod color;
pub mod confirm_delete;
pub mod editor;
pub mod filter_chips;
pub mod form;
pub mod generator_view;
pub mod help;
pub mod item_view;
pub mod onboarding;
pub mod outfit_list;
pub mod settings_view;
pub mod status_bar;
pub mod tabs;
