pub mod export_buttons;
pub mod header;
pub mod loading_overlay;
pub mod result_tables;
pub mod upload_area;
